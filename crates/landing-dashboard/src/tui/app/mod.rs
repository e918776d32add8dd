//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, panic hooks, and the core render loop.
//! Layout state lives in the headless [`Dashboard`]; this module maps
//! terminal cells to layout points and keys to dashboard operations.

use std::collections::HashMap;
use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::Rect as CellRect;
use ratatui::prelude::{CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::edit_mode::ModeTransition;
use crate::gold::{GoldPanel, GoldUpdate};
use crate::interaction::HitTarget;
use crate::layout::{Point, Widget};
use crate::store::KeyValueStore;
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::ui::render_dashboard;
use crate::widgets::clock::{zones_from_config, ClockZone};
use crate::widgets::gold::{tab_at, TAB_ROW};
use crate::widgets::{WidgetBody, WidgetRegistry};

/// How long a footer status message stays visible.
pub const STATUS_MESSAGE_DURATION: Duration = Duration::from_secs(3);

/// Core application state for the TUI.
pub struct App<S: KeyValueStore> {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Count of ticks processed (useful for testing/diagnostics).
    pub tick_count: u64,
    /// Widgets, edit mode, interaction and persistence.
    pub dashboard: Dashboard<S>,
    /// Gold widget display state.
    pub gold: GoldPanel,
    /// Clock zones, first one being the main time.
    pub zones: Vec<ClockZone>,
    /// Whether typed characters go into the notes pad.
    pub notes_focused: bool,
    /// Temporary status message shown in footer, with expiry time.
    pub status_message: Option<(String, Instant)>,
    /// Area the widgets are drawn in (everything above the footer).
    ///
    /// Updated during each render pass; mouse presses outside it are ignored.
    pub canvas: CellRect,
    /// Body renderer per widget kind.
    bodies: HashMap<String, Box<dyn WidgetBody>>,
    /// Manual gold refresh requests, when a fetcher is running.
    refresh_tx: Option<mpsc::Sender<()>>,
    tick_rate: Duration,
}

impl<S: KeyValueStore> App<S> {
    /// Creates an app around a loaded dashboard.
    pub fn new(dashboard: Dashboard<S>, config: &Config, tick_rate: Duration) -> Self {
        let registry = WidgetRegistry::new();
        let mut bodies = HashMap::new();
        for widget in dashboard.widgets() {
            bodies
                .entry(widget.kind.clone())
                .or_insert_with(|| registry.create_or_placeholder(&widget.kind));
        }
        let container = dashboard.container();
        Self {
            should_quit: false,
            tick_count: 0,
            dashboard,
            gold: GoldPanel::new(&config.gold),
            zones: zones_from_config(&config.clock),
            notes_focused: false,
            status_message: None,
            canvas: CellRect::new(0, 0, container.width as u16, container.height as u16),
            bodies,
            refresh_tx: None,
            tick_rate,
        }
    }

    /// Routes manual refreshes to a running fetcher.
    pub fn with_refresh(mut self, refresh_tx: mpsc::Sender<()>) -> Self {
        self.refresh_tx = Some(refresh_tx);
        self
    }

    /// Body renderer for a widget.
    pub fn body(&self, widget: &Widget) -> Option<&dyn WidgetBody> {
        self.bodies.get(&widget.kind).map(|b| b.as_ref())
    }

    /// Shows a footer message for [`STATUS_MESSAGE_DURATION`].
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now() + STATUS_MESSAGE_DURATION));
    }

    /// Clears the status message if its expiry time has passed.
    pub fn expire_status_message(&mut self) {
        if let Some((_, expiry)) = &self.status_message {
            if Instant::now() >= *expiry {
                self.status_message = None;
            }
        }
    }

    /// Folds a fetcher message into the gold panel.
    pub fn apply_gold_update(&mut self, update: GoldUpdate) {
        self.gold.apply(update);
    }

    /// Performs a key action.
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::ToggleEditMode => self.toggle_edit_mode(),
            Action::NextGoldTab => self.gold.next_tab(),
            Action::RefreshGold => self.request_refresh(),
            Action::FocusNotes => self.notes_focused = true,
        }
    }

    /// Flips edit mode, reporting a failed layout save in the footer.
    pub fn toggle_edit_mode(&mut self) {
        self.notes_focused = false;
        match self.dashboard.toggle_edit_mode() {
            Ok(ModeTransition::Entered) => {
                self.set_status("Edit mode: drag a title bar to move, the ◢ corner to resize")
            }
            Ok(ModeTransition::Exited) => self.set_status("Layout saved"),
            Err(e) => self.set_status(format!("Layout not saved: {e}")),
        }
    }

    /// Asks the fetcher for an immediate retrieval.
    pub fn request_refresh(&mut self) {
        let Some(tx) = &self.refresh_tx else {
            self.set_status("Gold refresh unavailable");
            return;
        };
        match tx.try_send(()) {
            Ok(()) => debug!("gold refresh requested"),
            // A queued request already covers this one.
            Err(mpsc::error::TrySendError::Full(())) => debug!("gold refresh already queued"),
            Err(mpsc::error::TrySendError::Closed(())) => {
                warn!("gold fetcher is gone");
                self.set_status("Gold refresh unavailable");
            }
        }
    }

    /// Appends a character to the notes pad.
    pub fn type_note(&mut self, c: char) {
        if let Err(e) = self.dashboard.push_note_char(c) {
            warn!(error = %e, "notes not saved");
            self.set_status(format!("Notes not saved: {e}"));
        }
    }

    /// Removes the last character of the notes pad.
    pub fn erase_note(&mut self) {
        if let Err(e) = self.dashboard.pop_note_char() {
            warn!(error = %e, "notes not saved");
            self.set_status(format!("Notes not saved: {e}"));
        }
    }

    /// Handles a mouse event.
    ///
    /// In edit mode presses, drags and releases drive the dashboard's
    /// interaction controller. In view mode a press focuses the notes pad
    /// or selects a gold tab.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let point = Point::new(f64::from(mouse.column), f64::from(mouse.row));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !self.canvas_contains(mouse.column, mouse.row) {
                    return;
                }
                if self.dashboard.is_edit_mode() {
                    self.dashboard.pointer_down(point);
                } else {
                    self.click(point);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                if self.dashboard.is_interacting() {
                    self.dashboard.pointer_move(point);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Err(e) = self.dashboard.pointer_up() {
                    self.set_status(format!("Layout not saved: {e}"));
                }
            }
            _ => {}
        }
    }

    fn canvas_contains(&self, column: u16, row: u16) -> bool {
        column >= self.canvas.x
            && column < self.canvas.right()
            && row >= self.canvas.y
            && row < self.canvas.bottom()
    }

    /// View-mode press.
    fn click(&mut self, point: Point) {
        let target = self.dashboard.hit_test(point);
        let Some(widget) = target.widget().and_then(|key| self.dashboard.widget(key)) else {
            self.notes_focused = false;
            return;
        };
        self.notes_focused = widget.kind == "notes";

        if widget.kind == "gold" && matches!(target, HitTarget::Body(_)) {
            // Body coordinates start inside the border.
            let rect = widget.bounding_box(self.dashboard.container()).snapped();
            let column = point.x.floor() - rect.x - 1.0;
            let row = point.y.floor() - rect.y - 1.0;
            if row == f64::from(TAB_ROW) && column >= 0.0 {
                if let Some(purity) = tab_at(column as u16) {
                    self.gold.set_tab(purity);
                }
            }
        }
    }

    /// Runs the TUI application: sets up terminal, enters event loop, restores on exit.
    pub async fn run(&mut self, gold_rx: mpsc::Receiver<GoldUpdate>) -> io::Result<()> {
        // Install panic hook that restores terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop(gold_rx).await;

        restore_terminal()?;
        result
    }

    /// Main event loop: renders UI and processes events.
    async fn event_loop(&mut self, mut gold_rx: mpsc::Receiver<GoldUpdate>) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let mut event_handler = EventHandler::new(self.tick_rate);
        let mut reader = EventStream::new();

        loop {
            // Drain fetcher updates before rendering
            while let Ok(update) = gold_rx.try_recv() {
                self.apply_gold_update(update);
            }

            terminal.draw(|frame| render_dashboard(frame, self))?;

            match event_handler.next(&mut reader).await? {
                Event::Key(key) => {
                    let action = handle_key_event(self, key);
                    self.apply_action(action);
                }
                Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                Event::Tick => {
                    self.tick_count += 1;
                    self.expire_status_message();
                }
                // The next draw picks up the new size.
                Event::Resize(_, _) => {}
            }

            if self.should_quit {
                if self.dashboard.is_interacting() {
                    // Keep a half-finished gesture.
                    let _ = self.dashboard.pointer_up();
                }
                return Ok(());
            }
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
