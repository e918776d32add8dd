//! Geometry store.
//!
//! Widget geometry and notes live in a flat string key-value store, the same
//! shape a browser's local storage has. Geometry is one JSON value under
//! [`LAYOUT_KEY`]; notes are raw text under [`NOTES_KEY`].

mod file;
mod snapshot;

pub use file::FileStore;
pub use snapshot::{GeometrySnapshot, LayoutRecord};

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use crate::layout::Widget;

/// Store key of the serialized geometry snapshot.
pub const LAYOUT_KEY: &str = "dashboardLayout";

/// Store key of the notes text.
pub const NOTES_KEY: &str = "dashboardNotes";

/// Errors raised while persisting store contents.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to write the store file or its parent directory.
    #[error("Failed to write store file: {path}")]
    Write {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The final rename failed; the new contents remain in `temp_path`.
    #[error("Failed to replace store file atomically: {path} - Safety copy at: {temp_path}")]
    WriteAtomic {
        /// Destination path.
        path: PathBuf,
        /// Temp file left behind.
        temp_path: PathBuf,
    },

    /// A value could not be serialized.
    #[error("Failed to serialize {key}: {message}")]
    Serialize {
        /// Store key being written.
        key: String,
        /// Description of the failure.
        message: String,
    },
}

/// Flat string-to-string persistent storage.
pub trait KeyValueStore {
    /// Stored value for `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Deletes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, useful for tests and for running without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Serializes the current geometry of all widgets and writes it under
/// [`LAYOUT_KEY`], replacing the previous snapshot.
pub fn commit<S: KeyValueStore + ?Sized>(widgets: &[Widget], store: &mut S) -> Result<(), StoreError> {
    let snapshot = GeometrySnapshot::capture(widgets);
    let json = snapshot.to_json().map_err(|e| StoreError::Serialize {
        key: LAYOUT_KEY.to_string(),
        message: e.to_string(),
    })?;
    store.set(LAYOUT_KEY, json)?;
    debug!(widgets = snapshot.len(), "layout committed");
    Ok(())
}

/// Reads the stored snapshot.
///
/// Returns `None` when nothing is stored or the stored value does not
/// decode; a malformed value is logged and otherwise treated as absent.
pub fn load_snapshot<S: KeyValueStore + ?Sized>(store: &S) -> Option<GeometrySnapshot> {
    let raw = store.get(LAYOUT_KEY)?;
    match GeometrySnapshot::from_json(&raw) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(error = %e, "stored layout is malformed, using defaults");
            None
        }
    }
}

/// Stored notes text, empty when none.
pub fn load_notes<S: KeyValueStore + ?Sized>(store: &S) -> String {
    store.get(NOTES_KEY).unwrap_or_default()
}

/// Persists the notes text verbatim.
pub fn save_notes<S: KeyValueStore + ?Sized>(store: &mut S, text: &str) -> Result<(), StoreError> {
    store.set(NOTES_KEY, text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{apply_layout, Placement, WidgetKey};

    fn widgets() -> Vec<Widget> {
        let mut clock = Widget::new("clock", "clock", "Clock", Placement::default());
        clock.style.left = "12.5px".into();
        clock.style.top = "3px".into();
        clock.style.width = "36px".into();
        clock.style.height = "7px".into();
        let mut notes = Widget::new("notes", "notes", "Notes", Placement::default());
        notes.style.left = "50%".into();
        vec![clock, notes]
    }

    #[test]
    fn commit_writes_layout_key() {
        let mut store = MemoryStore::new();
        commit(&widgets(), &mut store).expect("commit");
        let raw = store.get(LAYOUT_KEY).expect("layout stored");
        assert!(raw.contains(r#""clock":{"left":"12.5px""#));
    }

    #[test]
    fn commit_is_idempotent() {
        let ws = widgets();
        let mut store = MemoryStore::new();
        commit(&ws, &mut store).expect("first commit");
        let first = store.get(LAYOUT_KEY);
        commit(&ws, &mut store).expect("second commit");
        assert_eq!(store.get(LAYOUT_KEY), first);
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn commit_then_load_round_trips_styles() {
        let ws = widgets();
        let mut store = MemoryStore::new();
        commit(&ws, &mut store).expect("commit");

        let mut fresh = ws.clone();
        for w in &mut fresh {
            w.style = Default::default();
        }
        let snapshot = load_snapshot(&store);
        apply_layout(&mut fresh, snapshot.as_ref());

        for (before, after) in ws.iter().zip(&fresh) {
            assert_eq!(before.style.left, after.style.left);
            assert_eq!(before.style.top, after.style.top);
            assert_eq!(before.style.width, after.style.width);
            assert_eq!(before.style.height, after.style.height);
        }
    }

    #[test]
    fn load_snapshot_absent_is_none() {
        assert!(load_snapshot(&MemoryStore::new()).is_none());
    }

    #[test]
    fn load_snapshot_malformed_is_none() {
        let mut store = MemoryStore::new();
        store.set(LAYOUT_KEY, "{oops".to_string()).expect("set");
        assert!(load_snapshot(&store).is_none());
    }

    #[test]
    fn snapshot_keeps_entries_of_unknown_widgets_until_next_commit() {
        let mut store = MemoryStore::new();
        store
            .set(
                LAYOUT_KEY,
                r#"{"ghost":{"left":"1px","top":"1px","width":"1px","height":"1px"}}"#.to_string(),
            )
            .expect("set");
        let snapshot = load_snapshot(&store).expect("decodes");
        assert!(snapshot.get(&WidgetKey::from("ghost")).is_some());

        commit(&widgets(), &mut store).expect("commit");
        let snapshot = load_snapshot(&store).expect("decodes");
        assert!(snapshot.get(&WidgetKey::from("ghost")).is_none());
    }

    #[test]
    fn notes_round_trip_verbatim() {
        let mut store = MemoryStore::new();
        assert_eq!(load_notes(&store), "");
        save_notes(&mut store, "buy milk\n  ₹ later").expect("save");
        assert_eq!(load_notes(&store), "buy milk\n  ₹ later");
    }

    #[test]
    fn remove_absent_key_is_ok() {
        let mut store = MemoryStore::new();
        assert!(store.remove(LAYOUT_KEY).is_ok());
    }
}
