//! Notes pad widget.
//!
//! Shows the stored notes text. While focused a cursor block follows the
//! last character; an empty unfocused pad shows a hint instead.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use super::{WidgetBody, WidgetContext};

/// Hint shown in an empty, unfocused pad.
pub const PLACEHOLDER: &str = "Click to write notes...";

const CURSOR: &str = "█";

/// Notes body.
pub struct NotesWidget;

impl NotesWidget {
    /// Create a new `NotesWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for NotesWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Factory function for the widget registry.
pub fn create() -> Box<dyn WidgetBody> {
    Box::new(NotesWidget::new())
}

impl WidgetBody for NotesWidget {
    fn render(&self, _width: u16, context: &WidgetContext) -> Text<'static> {
        if context.notes.is_empty() && !context.notes_focused {
            return Text::from(Line::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ));
        }

        let mut lines: Vec<Line<'static>> = context
            .notes
            .split('\n')
            .map(|line| Line::raw(line.to_string()))
            .collect();
        if context.notes_focused {
            if let Some(last) = lines.last_mut() {
                last.push_span(Span::styled(CURSOR, Style::default().fg(Color::Gray)));
            }
        }
        Text::from(lines)
    }

    fn id(&self) -> &'static str {
        "notes"
    }

    fn min_width(&self) -> u16 {
        10
    }
}
