//! Cell-space geometry primitives and CSS-like length literals.
//!
//! One `px` is one terminal cell. Style values are kept as the literal
//! strings they were written with (`"40px"`, `"27.5px"`, `"50%"`, `""`) and
//! only resolved to numbers when a bounding box is needed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A pointer position in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Column.
    pub x: f64,
    /// Row.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Columns.
    pub width: f64,
    /// Rows.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A resolved rectangle in cells. Width and height may be zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rounds every edge to the nearest cell boundary.
    pub fn snapped(&self) -> Rect {
        let left = self.x.round();
        let top = self.y.round();
        let right = (self.x + self.width).round();
        let bottom = (self.y + self.height).round();
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Whether the snapped rectangle covers the cell at `point`.
    pub fn contains_cell(&self, point: Point) -> bool {
        let r = self.snapped();
        let (px, py) = (point.x.floor(), point.y.floor());
        px >= r.x && px < r.x + r.width && py >= r.y && py < r.y + r.height
    }

    /// Converts to a ratatui rect clipped to `area`.
    ///
    /// Returns `None` when nothing of the rectangle is visible, including
    /// degenerate (zero or negative) sizes.
    pub fn to_cells(&self, area: ratatui::layout::Rect) -> Option<ratatui::layout::Rect> {
        let r = self.snapped();
        if r.width <= 0.0 || r.height <= 0.0 {
            return None;
        }
        let left = r.x.max(f64::from(area.x));
        let top = r.y.max(f64::from(area.y));
        let right = (r.x + r.width).min(f64::from(area.right()));
        let bottom = (r.y + r.height).min(f64::from(area.bottom()));
        if right <= left || bottom <= top {
            return None;
        }
        Some(ratatui::layout::Rect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }
}

/// A literal style length such as `"40px"`, `"50%"` or `""` (unset).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleLength(String);

impl StyleLength {
    /// Wraps a literal without validating it.
    pub fn new(literal: impl Into<String>) -> Self {
        Self(literal.into())
    }

    /// The unset value (`""`).
    pub fn unset() -> Self {
        Self(String::new())
    }

    /// An absolute cell length, e.g. `StyleLength::px(27.5)` is `"27.5px"`.
    pub fn px(value: f64) -> Self {
        // -0 would otherwise print as "-0px".
        let value = if value == 0.0 { 0.0 } else { value };
        Self(format!("{value}px"))
    }

    /// A percentage of the container extent, e.g. `"50%"`.
    pub fn percent(value: f64) -> Self {
        Self(format!("{value}%"))
    }

    /// The literal as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no value is set.
    pub fn is_unset(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Leading numeric value, ignoring any unit; 0 when absent or malformed.
    ///
    /// `"40px"` and `"40%"` both read as 40.
    pub fn leading_number(&self) -> f64 {
        gold_rates::leading_number(self.0.trim()).unwrap_or(0.0)
    }

    /// Resolves against the container extent on the same axis.
    ///
    /// `px` values are absolute, `%` values are relative to `extent` and a
    /// bare `0` is zero. Anything else (including unset) is `None`.
    pub fn resolve(&self, extent: f64) -> Option<f64> {
        let s = self.0.trim();
        if let Some(n) = s.strip_suffix("px") {
            return n.trim().parse().ok();
        }
        if let Some(n) = s.strip_suffix('%') {
            return n.trim().parse::<f64>().ok().map(|p| p / 100.0 * extent);
        }
        match s.parse::<f64>() {
            Ok(n) if n == 0.0 => Some(0.0),
            _ => None,
        }
    }
}

impl fmt::Display for StyleLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StyleLength {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Self-relative centering shift applied after positioning.
///
/// Each component moves the widget by half of its own size on that axis,
/// so a widget at `left: 50%` with `TranslateX` is horizontally centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    /// No shift.
    #[default]
    None,
    /// Shift left by half the width.
    TranslateX,
    /// Shift up by half the height.
    TranslateY,
    /// Shift on both axes.
    Translate,
}

impl Transform {
    /// Adds the horizontal component.
    pub fn with_x(self) -> Self {
        match self {
            Transform::None | Transform::TranslateX => Transform::TranslateX,
            Transform::TranslateY | Transform::Translate => Transform::Translate,
        }
    }

    /// Adds the vertical component.
    pub fn with_y(self) -> Self {
        match self {
            Transform::None | Transform::TranslateY => Transform::TranslateY,
            Transform::TranslateX | Transform::Translate => Transform::Translate,
        }
    }

    /// Whether the horizontal component is present.
    pub fn shifts_x(self) -> bool {
        matches!(self, Transform::TranslateX | Transform::Translate)
    }

    /// Whether the vertical component is present.
    pub fn shifts_y(self) -> bool {
        matches!(self, Transform::TranslateY | Transform::Translate)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Transform::None => "none",
            Transform::TranslateX => "translateX(-50%)",
            Transform::TranslateY => "translateY(-50%)",
            Transform::Translate => "translate(-50%, -50%)",
        };
        f.write_str(s)
    }
}
