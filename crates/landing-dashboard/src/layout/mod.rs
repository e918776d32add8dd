//! Widget geometry model.
//!
//! [`geometry`] holds the cell-space primitives and style literals,
//! [`widget`] the positioned panel type and [`init`] the startup resolution
//! of stored versus default geometry.

pub mod geometry;
pub mod init;
pub mod widget;

pub use geometry::{Point, Rect, Size, StyleLength, Transform};
pub use init::{apply_defaults, apply_layout, apply_record};
pub use widget::{AxisSpec, Placement, Widget, WidgetKey, WidgetStyle, FALLBACK_SIZE};
