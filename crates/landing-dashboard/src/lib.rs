//! Landing Dashboard library
//!
//! A terminal landing page made of free-floating widget panels: a
//! multi-timezone clock, retail gold rates and a notes pad. In edit mode the
//! panels can be dragged by their header and resized from their bottom-right
//! corner; the resulting geometry is kept in a local key-value store and
//! restored on the next start.
//!
//! The layout engine ([`layout`], [`interaction`], [`edit_mode`], [`store`]
//! and the [`dashboard::Dashboard`] aggregate) has no terminal dependency.
//! The [`tui`] module drives it from crossterm events.

/// Configuration loading, schema and XDG path resolution.
pub mod config;

/// Headless dashboard aggregate tying layout, interaction and persistence.
pub mod dashboard;

/// Two-state edit mode switch and geometry normalization.
pub mod edit_mode;

/// Gold-rate fetch scheduling and display state.
pub mod gold;

/// Pointer-driven drag and resize state machine.
pub mod interaction;

/// Widget geometry model and startup layout resolution.
pub mod layout;

/// Tracing subscriber setup.
pub mod logging;

/// Persistent key-value store and geometry snapshots.
pub mod store;

/// Terminal user interface.
pub mod tui;

/// Widget body renderers (clock, gold, notes).
pub mod widgets;

pub use dashboard::Dashboard;
pub use layout::{AxisSpec, Placement, Point, Rect, Size, StyleLength, Transform, Widget, WidgetKey};
pub use store::{FileStore, GeometrySnapshot, KeyValueStore, LayoutRecord, MemoryStore, StoreError};
