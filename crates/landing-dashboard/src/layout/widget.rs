//! Dashboard widgets as positioned panels.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Size, StyleLength, Transform};

/// Size used on an axis whose style length is unset or unresolvable.
pub const FALLBACK_SIZE: Size = Size::new(30.0, 8.0);

/// Stable identifier of a widget, used as the persistence key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetKey(String);

impl WidgetKey {
    /// Creates a key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Default position on one axis: centered on the container or a literal.
///
/// Written in configuration as `"center"` (or `"centered"`) or as any other
/// style literal such as `"4px"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AxisSpec {
    /// Centered on the container axis.
    Centered,
    /// Literal position value.
    Literal(StyleLength),
}

impl From<String> for AxisSpec {
    fn from(s: String) -> Self {
        match s.trim() {
            "center" | "centered" => AxisSpec::Centered,
            _ => AxisSpec::Literal(StyleLength::new(s)),
        }
    }
}

impl From<AxisSpec> for String {
    fn from(spec: AxisSpec) -> Self {
        match spec {
            AxisSpec::Centered => "center".to_string(),
            AxisSpec::Literal(len) => len.as_str().to_string(),
        }
    }
}

impl From<&str> for AxisSpec {
    fn from(s: &str) -> Self {
        AxisSpec::from(s.to_string())
    }
}

/// Default placement declared for a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Horizontal default.
    pub x: AxisSpec,
    /// Vertical default.
    pub y: AxisSpec,
    /// Default width (may be unset).
    pub width: StyleLength,
    /// Default height (may be unset).
    pub height: StyleLength,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            x: AxisSpec::Literal(StyleLength::px(0.0)),
            y: AxisSpec::Literal(StyleLength::px(0.0)),
            width: StyleLength::unset(),
            height: StyleLength::unset(),
        }
    }
}

/// Current inline style of a widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetStyle {
    /// Left offset.
    pub left: StyleLength,
    /// Top offset.
    pub top: StyleLength,
    /// Width.
    pub width: StyleLength,
    /// Height.
    pub height: StyleLength,
    /// Self-relative centering shift.
    pub transform: Transform,
}

/// A positioned panel on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    /// Persistence key.
    pub key: WidgetKey,
    /// Body kind rendered inside the panel (`clock`, `gold`, `notes`).
    pub kind: String,
    /// Header title.
    pub title: String,
    /// Declared defaults.
    pub placement: Placement,
    /// Current style.
    pub style: WidgetStyle,
}

impl Widget {
    /// Creates a widget with an empty style; see
    /// [`apply_layout`](super::init::apply_layout).
    pub fn new(
        key: impl Into<WidgetKey>,
        kind: impl Into<String>,
        title: impl Into<String>,
        placement: Placement,
    ) -> Self {
        Self {
            key: key.into(),
            kind: kind.into(),
            title: title.into(),
            placement,
            style: WidgetStyle::default(),
        }
    }

    /// Rendered bounding box inside a container of the given size.
    ///
    /// Unset or unresolvable sizes fall back to [`FALLBACK_SIZE`]; unset
    /// offsets are 0. The transform shift is applied last.
    pub fn bounding_box(&self, container: Size) -> Rect {
        let width = self
            .style
            .width
            .resolve(container.width)
            .unwrap_or(FALLBACK_SIZE.width);
        let height = self
            .style
            .height
            .resolve(container.height)
            .unwrap_or(FALLBACK_SIZE.height);
        let mut x = self.style.left.resolve(container.width).unwrap_or(0.0);
        let mut y = self.style.top.resolve(container.height).unwrap_or(0.0);
        if self.style.transform.shifts_x() {
            x -= width / 2.0;
        }
        if self.style.transform.shifts_y() {
            y -= height / 2.0;
        }
        Rect::new(x, y, width, height)
    }
}

impl From<String> for WidgetKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}
