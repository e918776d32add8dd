//! Gold rates widget.
//!
//! A tab row selects the purity; below it one row per weight preset, then
//! the freshness label and, when showing fallback values, their date.
//!
//! ```text
//!  22K   24K
//!
//! 1g                  ₹8,120
//! 8g                 ₹64,960
//! 10g                ₹81,200
//!
//! Updated: 14:05
//! ```

use gold_rates::Purity;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use super::{WidgetBody, WidgetContext};
use crate::gold::GoldStatus;

/// Row of the tab strip inside the widget body.
pub const TAB_ROW: u16 = 0;

/// Columns taken by one tab label such as ` 22K `.
const TAB_WIDTH: u16 = 5;

/// Gap between tabs.
const TAB_GAP: u16 = 1;

/// Purity tab under a body-relative column on [`TAB_ROW`].
pub fn tab_at(column: u16) -> Option<Purity> {
    Purity::ALL.into_iter().enumerate().find_map(|(i, purity)| {
        let start = i as u16 * (TAB_WIDTH + TAB_GAP);
        (start..start + TAB_WIDTH).contains(&column).then_some(purity)
    })
}

/// Gold rates body.
pub struct GoldWidget;

impl GoldWidget {
    /// Create a new `GoldWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for GoldWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Factory function for the widget registry.
pub fn create() -> Box<dyn WidgetBody> {
    Box::new(GoldWidget::new())
}

fn tab_line(active: Purity) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, purity) in Purity::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" ".repeat(usize::from(TAB_GAP))));
        }
        let style = if purity == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", purity.label()), style));
    }
    Line::from(spans)
}

fn price_line(label: String, price: String, width: u16) -> Line<'static> {
    let used = label.chars().count() + price.chars().count();
    let pad = usize::from(width).saturating_sub(used).max(1);
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::raw(" ".repeat(pad)),
        Span::styled(price, Style::default().fg(Color::Yellow)),
    ])
}

impl WidgetBody for GoldWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Text<'static> {
        let panel = context.gold;
        let mut lines = vec![tab_line(panel.active_tab()), Line::default()];

        lines.extend(
            panel
                .rows()
                .into_iter()
                .map(|(label, price)| price_line(label, price, width)),
        );
        lines.push(Line::default());

        let status_style = match panel.status() {
            GoldStatus::Updating => Style::default().fg(Color::Yellow),
            GoldStatus::Live { .. } => Style::default().fg(Color::DarkGray),
            GoldStatus::Offline => Style::default().fg(Color::Red),
        };
        lines.push(Line::styled(panel.status_label(), status_style));
        if let Some(note) = panel.fallback_note() {
            lines.push(Line::styled(note, Style::default().fg(Color::DarkGray)));
        }

        Text::from(lines)
    }

    fn id(&self) -> &'static str {
        "gold"
    }

    fn min_width(&self) -> u16 {
        20
    }
}
