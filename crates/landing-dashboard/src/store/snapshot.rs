//! Serialized geometry of all widgets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::layout::{StyleLength, Widget, WidgetKey};

/// The four style edges of one widget, stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutRecord {
    /// Left offset literal.
    pub left: StyleLength,
    /// Top offset literal.
    pub top: StyleLength,
    /// Width literal.
    pub width: StyleLength,
    /// Height literal.
    pub height: StyleLength,
}

impl LayoutRecord {
    /// Copies the current style edges of `widget`.
    pub fn of(widget: &Widget) -> Self {
        Self {
            left: widget.style.left.clone(),
            top: widget.style.top.clone(),
            width: widget.style.width.clone(),
            height: widget.style.height.clone(),
        }
    }
}

/// Widget key to record map, serialized as a JSON object.
///
/// Keys are ordered so that identical geometry always serializes to the same
/// bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeometrySnapshot(BTreeMap<WidgetKey, LayoutRecord>);

impl GeometrySnapshot {
    /// Captures the current style of every widget.
    pub fn capture(widgets: &[Widget]) -> Self {
        Self(
            widgets
                .iter()
                .map(|w| (w.key.clone(), LayoutRecord::of(w)))
                .collect(),
        )
    }

    /// Record for `key`, if stored.
    pub fn get(&self, key: &WidgetKey) -> Option<&LayoutRecord> {
        self.0.get(key)
    }

    /// Inserts or replaces a record.
    pub fn insert(&mut self, key: WidgetKey, record: LayoutRecord) {
        self.0.insert(key, record);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot has no records.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&WidgetKey, &LayoutRecord)> {
        self.0.iter()
    }

    /// Compact JSON encoding.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decodes a stored JSON value.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
