//! Widget body system.
//!
//! A panel's frame (position, size, title, border) comes from the layout
//! model; what is drawn inside it comes from a [`WidgetBody`] chosen by the
//! panel's `kind`. Bodies are stateless renderers that read everything
//! from a [`WidgetContext`].
//!
//! # Built-in Kinds
//!
//! | Kind    | Body           |
//! |---------|----------------|
//! | `clock` | [`clock::ClockWidget`] |
//! | `gold`  | [`gold::GoldWidget`]   |
//! | `notes` | [`notes::NotesWidget`] |
//!
//! Unknown kinds render as a placeholder naming the kind.

pub mod clock;
pub mod context;
pub mod gold;
pub mod notes;

pub use context::WidgetContext;

use std::collections::HashMap;

use ratatui::{
    style::{Color, Style},
    text::{Line, Text},
};
use tracing::warn;

/// Renders the inside of a panel.
///
/// Implementors must be `Send + Sync` so bodies can live in the app state
/// shared with the event loop.
pub trait WidgetBody: Send + Sync {
    /// Renders the body for an inner area `width` columns wide.
    fn render(&self, width: u16, context: &WidgetContext) -> Text<'static>;

    /// Kind identifier, e.g. `"clock"`.
    fn id(&self) -> &'static str;

    /// Narrowest inner width the body reads well at.
    fn min_width(&self) -> u16;
}

/// Factory producing a fresh body.
pub type WidgetFactory = fn() -> Box<dyn WidgetBody>;

/// Registry mapping kind identifiers to body factories.
pub struct WidgetRegistry {
    factories: HashMap<&'static str, WidgetFactory>,
}

impl WidgetRegistry {
    /// Creates a registry with the built-in kinds.
    pub fn new() -> Self {
        let mut reg = Self {
            factories: HashMap::new(),
        };
        reg.register("clock", clock::create);
        reg.register("gold", gold::create);
        reg.register("notes", notes::create);
        reg
    }

    /// Register a body factory for the given kind.
    ///
    /// Overwrites any existing factory for the same kind.
    pub fn register(&mut self, id: &'static str, factory: WidgetFactory) {
        self.factories.insert(id, factory);
    }

    /// Creates a body by kind, `None` if unregistered.
    pub fn create(&self, id: &str) -> Option<Box<dyn WidgetBody>> {
        self.factories.get(id).map(|f| f())
    }

    /// Creates a body by kind, substituting a placeholder for unknown kinds.
    pub fn create_or_placeholder(&self, id: &str) -> Box<dyn WidgetBody> {
        self.create(id).unwrap_or_else(|| {
            warn!(kind = id, "unknown widget kind, rendering placeholder");
            Box::new(PlaceholderWidget { kind: id.to_string() })
        })
    }

    /// Registered kinds, sorted.
    pub fn available_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.factories.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Stand-in body for an unregistered kind.
struct PlaceholderWidget {
    kind: String,
}

impl WidgetBody for PlaceholderWidget {
    fn render(&self, _width: u16, _context: &WidgetContext) -> Text<'static> {
        Text::from(Line::styled(
            format!("[{}]", self.kind),
            Style::default().fg(Color::DarkGray),
        ))
    }

    fn id(&self) -> &'static str {
        "placeholder"
    }

    fn min_width(&self) -> u16 {
        // kind + brackets + 1 padding
        (self.kind.chars().count() as u16).saturating_add(3)
    }
}
