//! Multi-timezone clock widget.
//!
//! The first zone supplies the date line and the main time; the remaining
//! zones are listed as `label HH:MM` pairs underneath.
//!
//! ```text
//!      Sunday, March 1
//!       14:05  India
//!
//!  France 09:35  USA 03:35
//! ```

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};
use tracing::warn;

use super::{WidgetBody, WidgetContext};
use crate::config::schema::{ClockConfig, ZoneConfig, ZoneRule};

/// A labelled time zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockZone {
    /// Display label.
    pub label: String,
    /// UTC to local mapping.
    pub rule: ZoneRule,
}

impl ClockZone {
    /// Creates a zone.
    pub fn new(label: impl Into<String>, rule: ZoneRule) -> Self {
        Self {
            label: label.into(),
            rule,
        }
    }

    /// Zone following IANA rules, daylight saving included.
    pub fn named(label: impl Into<String>, tz: Tz) -> Self {
        Self::new(label, ZoneRule::Named(tz))
    }

    /// Zone at a constant offset.
    pub fn fixed(label: impl Into<String>, offset: FixedOffset) -> Self {
        Self::new(label, ZoneRule::Fixed(offset))
    }

    /// The UTC zone, used when nothing valid is configured.
    pub fn utc() -> Self {
        Self::fixed("UTC", Utc.fix())
    }

    /// Resolves a configured zone; `None` if it does not parse.
    pub fn from_config(config: &ZoneConfig) -> Option<Self> {
        config.rule().map(|rule| Self::new(config.label.clone(), rule))
    }

    /// `now` in this zone, with the offset in effect at that instant.
    pub fn local_time(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        let offset = match self.rule {
            ZoneRule::Named(tz) => tz.offset_from_utc_datetime(&now.naive_utc()).fix(),
            ZoneRule::Fixed(offset) => offset,
        };
        now.with_timezone(&offset)
    }
}

/// Builds clock zones, skipping ones that do not resolve. Never empty.
pub fn zones_from_config(config: &ClockConfig) -> Vec<ClockZone> {
    let zones: Vec<ClockZone> = config
        .zones
        .iter()
        .filter_map(|zone| {
            let parsed = ClockZone::from_config(zone);
            if parsed.is_none() {
                warn!(label = %zone.label, tz = ?zone.tz, offset = ?zone.utc_offset, "skipping invalid clock zone");
            }
            parsed
        })
        .collect();
    if zones.is_empty() {
        vec![ClockZone::utc()]
    } else {
        zones
    }
}

/// Long date, e.g. `Sunday, March 1`.
pub fn format_date(time: &DateTime<FixedOffset>) -> String {
    time.format("%A, %B %-d").to_string()
}

/// 24-hour time, e.g. `14:05`.
pub fn format_time(time: &DateTime<FixedOffset>) -> String {
    time.format("%H:%M").to_string()
}

/// Clock body.
pub struct ClockWidget;

impl ClockWidget {
    /// Create a new `ClockWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClockWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Factory function for the widget registry.
pub fn create() -> Box<dyn WidgetBody> {
    Box::new(ClockWidget::new())
}

impl WidgetBody for ClockWidget {
    fn render(&self, _width: u16, context: &WidgetContext) -> Text<'static> {
        let fallback = ClockZone::utc();
        let (main, rest) = match context.zones.split_first() {
            Some((main, rest)) => (main, rest),
            None => (&fallback, &[][..]),
        };
        let main_time = main.local_time(context.now);

        let mut lines = vec![
            Line::styled(format_date(&main_time), Style::default().add_modifier(Modifier::BOLD)).centered(),
            Line::from(vec![
                Span::styled(
                    format_time(&main_time),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", main.label), Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ];

        if !rest.is_empty() {
            let mut spans = Vec::with_capacity(rest.len() * 3);
            for (i, zone) in rest.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw("  "));
                }
                spans.push(Span::styled(format!("{} ", zone.label), Style::default().fg(Color::DarkGray)));
                spans.push(Span::raw(format_time(&zone.local_time(context.now))));
            }
            lines.push(Line::default());
            lines.push(Line::from(spans).centered());
        }

        Text::from(lines)
    }

    fn id(&self) -> &'static str {
        "clock"
    }

    fn min_width(&self) -> u16 {
        // Longest date: "Wednesday, September 30"
        23
    }
}
