//! Widget context providing shared state for widget rendering.
//!
//! The [`WidgetContext`] struct carries the data that widget bodies may
//! need during a frame: wall-clock time, the configured zones, gold panel
//! state and the notes text. It is passed by reference to each body's
//! `render` method.

use chrono::{DateTime, Utc};

use super::clock::ClockZone;
use crate::gold::GoldPanel;

/// Shared context passed to widget bodies during rendering.
///
/// All fields are borrowed so a frame never clones application state.
///
/// # Example
///
/// ```
/// use landing_dashboard::config::schema::GoldConfig;
/// use landing_dashboard::gold::GoldPanel;
/// use landing_dashboard::widgets::context::WidgetContext;
///
/// let gold = GoldPanel::new(&GoldConfig::default());
/// let ctx = WidgetContext::new(&[], &gold).with_notes("milk", false);
/// assert_eq!(ctx.notes, "milk");
/// assert!(!ctx.edit_mode);
/// ```
#[derive(Debug)]
pub struct WidgetContext<'a> {
    /// Current time; each zone converts it to its own offset.
    pub now: DateTime<Utc>,

    /// Clock zones, first one being the main time.
    pub zones: &'a [ClockZone],

    /// Gold rates and freshness.
    pub gold: &'a GoldPanel,

    /// Notes pad contents.
    pub notes: &'a str,

    /// Whether the notes pad receives typed characters.
    pub notes_focused: bool,

    /// Whether the dashboard is in edit mode.
    pub edit_mode: bool,
}

impl<'a> WidgetContext<'a> {
    /// Creates a context at the current time with empty notes.
    pub fn new(zones: &'a [ClockZone], gold: &'a GoldPanel) -> Self {
        Self {
            now: Utc::now(),
            zones,
            gold,
            notes: "",
            notes_focused: false,
            edit_mode: false,
        }
    }

    /// Pins the rendering time.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Sets the notes text and focus.
    pub fn with_notes(mut self, notes: &'a str, focused: bool) -> Self {
        self.notes = notes;
        self.notes_focused = focused;
        self
    }

    /// Sets the edit-mode flag.
    pub fn with_edit_mode(mut self, edit_mode: bool) -> Self {
        self.edit_mode = edit_mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::GoldConfig;
    use chrono::TimeZone;

    #[test]
    fn test_builders_set_fields() {
        let gold = GoldPanel::new(&GoldConfig::default());
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 35, 0).single().expect("valid time");
        let ctx = WidgetContext::new(&[], &gold)
            .with_now(now)
            .with_notes("buy", true)
            .with_edit_mode(true);
        assert_eq!(ctx.now, now);
        assert_eq!(ctx.notes, "buy");
        assert!(ctx.notes_focused);
        assert!(ctx.edit_mode);
        assert!(ctx.zones.is_empty());
    }
}
