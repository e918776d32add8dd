//! Event handling for the TUI.
//!
//! Wraps crossterm events and adds a tick variant for periodic redraws (the
//! clock needs one even when nothing is pressed).

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::store::KeyValueStore;
use crate::tui::app::App;

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI refresh.
    Tick,
}

/// Fastest accepted redraw tick.
pub const MIN_TICK_RATE: Duration = Duration::from_millis(10);

/// Event handler that merges terminal input events with periodic ticks.
pub struct EventHandler {
    /// Tick interval duration.
    tick_rate: Duration,
    /// Created on first use so the handler can be built outside a runtime.
    tick: Option<Interval>,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    ///
    /// Rates below [`MIN_TICK_RATE`] are raised to it.
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate: tick_rate.max(MIN_TICK_RATE),
            tick: None,
        }
    }

    /// Tick interval duration.
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Waits for the next event, returning either a terminal event or a tick.
    ///
    /// The tick schedule persists across calls, so a steady stream of input
    /// does not starve the periodic redraw.
    pub async fn next(&mut self, reader: &mut EventStream) -> std::io::Result<Event> {
        let rate = self.tick_rate;
        let tick = self.tick.get_or_insert_with(|| {
            let mut tick = interval(rate);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            tick
        });

        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        // Release and repeat events are reported on some platforms
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind != KeyEventKind::Press => continue,
                        Some(Ok(CrosstermEvent::Key(key))) => return Ok(Event::Key(key)),
                        Some(Ok(CrosstermEvent::Mouse(mouse))) => return Ok(Event::Mouse(mouse)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        // Ignore focus, paste events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                _ = tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// Action produced by handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No action to take.
    None,
    /// Quit the application.
    Quit,
    /// Enter or leave edit mode.
    ToggleEditMode,
    /// Switch the gold widget to the other purity.
    NextGoldTab,
    /// Fetch gold rates now.
    RefreshGold,
    /// Start typing into the notes pad.
    FocusNotes,
}

/// Handles a key event, editing notes directly when the pad is focused.
///
/// Ctrl-C always quits. While the notes pad is focused every printable key
/// goes into it and Esc leaves the pad; otherwise single-letter bindings
/// apply.
pub fn handle_key_event<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c')) {
        return Action::Quit;
    }

    if app.notes_focused {
        return handle_notes_key(app, key);
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('e') => Action::ToggleEditMode,
        KeyCode::Tab | KeyCode::Char('t') => Action::NextGoldTab,
        KeyCode::Char('r') => Action::RefreshGold,
        KeyCode::Char('n') if !app.dashboard.is_edit_mode() => Action::FocusNotes,
        KeyCode::Esc if app.dashboard.is_edit_mode() => Action::ToggleEditMode,
        _ => Action::None,
    }
}

/// Keys while the notes pad is focused.
fn handle_notes_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => app.notes_focused = false,
        KeyCode::Enter => app.type_note('\n'),
        KeyCode::Backspace => app.erase_note(),
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.type_note(c)
        }
        _ => {}
    }
    Action::None
}

#[cfg(test)]
mod tests;
