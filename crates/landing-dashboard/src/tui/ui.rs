//! Main rendering orchestration for the TUI dashboard.
//!
//! Draws every widget as a bordered panel at its layout position (one layout
//! px is one cell) and a one-row footer with key hints, status messages and
//! the edit-mode badge.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use crate::layout::{Size, Widget};
use crate::store::KeyValueStore;
use crate::tui::app::App;
use crate::widgets::WidgetContext;

/// Rows reserved for the footer.
pub const FOOTER_HEIGHT: u16 = 1;

/// Symbol drawn on the resize affordance in edit mode.
pub const RESIZE_HANDLE: &str = "◢";

/// Footer hints in view mode.
const VIEW_HINTS: &str = "[e] Edit layout  [Tab] 22K/24K  [r] Refresh  [n] Notes  [q] Quit";

/// Footer hints in edit mode.
const EDIT_HINTS: &str = "[drag title] Move  [drag ◢] Resize  [e/Esc] Done  [q] Quit";

/// Footer hints while typing notes.
const NOTES_HINTS: &str = "Typing notes  [Esc] Done";

/// Badge shown at the right of the footer in edit mode.
const EDIT_BADGE: &str = " EDIT ";

/// Splits the frame into the widget canvas and the footer row.
pub fn split_frame(area: Rect) -> (Rect, Rect) {
    let footer_height = FOOTER_HEIGHT.min(area.height);
    let canvas = Rect {
        height: area.height - footer_height,
        ..area
    };
    let footer = Rect {
        y: area.y + canvas.height,
        height: footer_height,
        ..area
    };
    (canvas, footer)
}

/// Renders the widgets and the footer.
///
/// Reports the canvas size to the dashboard as the layout container, so
/// percentages and centering follow the terminal size.
pub fn render_dashboard<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>) {
    let (canvas, footer) = split_frame(frame.area());
    app.canvas = canvas;
    app.dashboard
        .set_container(Size::new(f64::from(canvas.width), f64::from(canvas.height)));

    let app = &*app;
    let edit_mode = app.dashboard.is_edit_mode();
    let ctx = WidgetContext::new(&app.zones, &app.gold)
        .with_notes(app.dashboard.notes(), app.notes_focused)
        .with_edit_mode(edit_mode);

    for widget in app.dashboard.widgets() {
        render_widget(frame, app, widget, canvas, &ctx);
    }

    frame.render_widget(Paragraph::new(footer_line(app, footer.width)), footer);
}

fn render_widget<S: KeyValueStore>(
    frame: &mut Frame,
    app: &App<S>,
    widget: &Widget,
    canvas: Rect,
    ctx: &WidgetContext,
) {
    let rect = widget.bounding_box(app.dashboard.container()).snapped();
    let Some(cells) = rect.to_cells(canvas) else {
        return;
    };

    let focused = ctx.notes_focused && widget.kind == "notes";
    let border_style = if ctx.edit_mode {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::bordered()
        .border_style(border_style)
        .title(Span::styled(
            format!(" {} ", widget.title),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(cells);

    // Later widgets paint over earlier ones.
    frame.render_widget(Clear, cells);
    frame.render_widget(block, cells);

    if let Some(body) = app.body(widget) {
        let mut paragraph = Paragraph::new(body.render(inner.width, ctx));
        if widget.kind == "notes" {
            paragraph = paragraph.wrap(Wrap { trim: false });
        }
        frame.render_widget(paragraph, inner);
    }

    if ctx.edit_mode {
        let handle_x = rect.x + rect.width - 1.0;
        let handle_y = rect.y + rect.height - 1.0;
        let visible = handle_x >= f64::from(cells.x)
            && handle_x < f64::from(cells.right())
            && handle_y >= f64::from(cells.y)
            && handle_y < f64::from(cells.bottom());
        if visible {
            if let Some(cell) = frame.buffer_mut().cell_mut((handle_x as u16, handle_y as u16)) {
                cell.set_symbol(RESIZE_HANDLE)
                    .set_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            }
        }
    }
}

/// Footer: status message or hints on the left, edit badge on the right.
fn footer_line<S: KeyValueStore>(app: &App<S>, width: u16) -> Line<'static> {
    let (text, style) = match &app.status_message {
        Some((message, _)) => (message.clone(), Style::default().fg(Color::Yellow)),
        None => {
            let hints = if app.notes_focused {
                NOTES_HINTS
            } else if app.dashboard.is_edit_mode() {
                EDIT_HINTS
            } else {
                VIEW_HINTS
            };
            (hints.to_string(), Style::default().fg(Color::DarkGray))
        }
    };

    let mut spans = vec![Span::styled(text.clone(), style)];
    if app.dashboard.is_edit_mode() {
        let used = text.chars().count() + EDIT_BADGE.len();
        let padding = usize::from(width).saturating_sub(used);
        if padding > 0 {
            spans.push(Span::raw(" ".repeat(padding)));
            spans.push(Span::styled(
                EDIT_BADGE,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_utils::{
        assert_fg_color, find_row_with_text, make_app, row_contains, row_text, test_terminal,
    };

    #[test]
    fn test_split_frame_reserves_footer() {
        let (canvas, footer) = split_frame(Rect::new(0, 0, 80, 25));
        assert_eq!(canvas, Rect::new(0, 0, 80, 24));
        assert_eq!(footer, Rect::new(0, 24, 80, 1));
    }

    #[test]
    fn test_split_frame_zero_height() {
        let (canvas, footer) = split_frame(Rect::new(0, 0, 80, 0));
        assert_eq!(canvas.height, 0);
        assert_eq!(footer.height, 0);
    }

    #[test]
    fn test_render_sets_container_from_canvas() {
        let mut app = make_app();
        let mut terminal = test_terminal(100, 31);
        terminal.draw(|f| render_dashboard(f, &mut app)).expect("draw");
        assert_eq!(app.dashboard.container(), Size::new(100.0, 30.0));
        assert_eq!(app.canvas, Rect::new(0, 0, 100, 30));
    }

    #[test]
    fn test_render_default_layout_titles() {
        let mut app = make_app();
        let mut terminal = test_terminal(80, 25);
        terminal.draw(|f| render_dashboard(f, &mut app)).expect("draw");
        let buffer = terminal.backend().buffer();
        // Clock is centered: 36 wide in 80 columns starts at column 22.
        assert!(row_text(buffer, 1)[22..].starts_with("┌ Clock "));
        assert!(row_contains(buffer, 9, " Gold Rates "));
        assert!(row_contains(buffer, 9, " Notes "));
        assert!(row_contains(buffer, 10, " 22K   24K "));
        assert!(row_contains(buffer, 24, "[e] Edit layout"));
    }

    #[test]
    fn test_edit_mode_shows_handle_and_badge() {
        let mut app = make_app();
        app.toggle_edit_mode();
        app.status_message = None;
        let mut terminal = test_terminal(80, 25);
        terminal.draw(|f| render_dashboard(f, &mut app)).expect("draw");
        let buffer = terminal.backend().buffer();
        // Gold panel spans columns 2..36 and rows 9..19.
        assert_eq!(buffer.cell((35, 18)).expect("cell").symbol(), RESIZE_HANDLE);
        assert_fg_color(buffer, 2, 9, Color::Yellow);
        assert!(row_contains(buffer, 24, "EDIT"));
        assert!(row_contains(buffer, 24, "[drag title] Move"));
    }

    #[test]
    fn test_status_message_replaces_hints() {
        let mut app = make_app();
        app.set_status("Layout saved");
        let mut terminal = test_terminal(80, 25);
        terminal.draw(|f| render_dashboard(f, &mut app)).expect("draw");
        let buffer = terminal.backend().buffer();
        assert_eq!(find_row_with_text(buffer, "Layout saved"), Some(24));
        assert!(!row_contains(buffer, 24, "[e] Edit layout"));
    }

    #[test]
    fn test_widget_outside_canvas_is_skipped() {
        let mut app = make_app();
        let mut terminal = test_terminal(20, 5);
        terminal.draw(|f| render_dashboard(f, &mut app)).expect("draw");
        let buffer = terminal.backend().buffer();
        assert!(find_row_with_text(buffer, "Notes").is_none());
    }

    #[test]
    fn test_render_tiny_terminal_no_panic() {
        let mut app = make_app();
        for (w, h) in [(1, 1), (2, 2), (10, 1), (3, 40)] {
            let mut terminal = test_terminal(w, h);
            terminal.draw(|f| render_dashboard(f, &mut app)).expect("draw");
        }
    }
}
