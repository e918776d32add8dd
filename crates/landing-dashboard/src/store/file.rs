//! JSON-file backed store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, warn};

use super::{KeyValueStore, StoreError};
use crate::config::xdg;

/// Key-value store persisted as a single JSON object file.
///
/// Every mutation rewrites the file atomically (temp file, fsync, rename).
/// An unreadable or malformed file opens as an empty store; a malformed file
/// is renamed aside to `<name>.corrupt` first so the next write does not
/// destroy it.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. Never fails; see the type docs.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    let aside = path.with_extension("json.corrupt");
                    warn!(path = %path.display(), error = %e, "store file is malformed, starting empty");
                    if let Err(e) = fs::rename(&path, &aside) {
                        warn!(path = %aside.display(), error = %e, "could not move malformed store aside");
                    }
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no store file yet");
                BTreeMap::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "store file unreadable, starting empty");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            xdg::ensure_dir(parent).map_err(|e| StoreError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| StoreError::Serialize {
            key: "*".to_string(),
            message: e.to_string(),
        })?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "storage.json".to_string());
        let timestamp = Local::now().format("%Y%m%d-%H%M%S%.3f");
        let temp_path = self
            .path
            .with_file_name(format!("{file_name}.tmp.{timestamp}"));

        fs::write(&temp_path, json).map_err(|e| StoreError::Write {
            path: temp_path.clone(),
            source: e,
        })?;
        let file = fs::File::open(&temp_path).map_err(|e| StoreError::Write {
            path: temp_path.clone(),
            source: e,
        })?;
        file.sync_all().map_err(|e| StoreError::Write {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &self.path).map_err(|_| StoreError::WriteAtomic {
            path: self.path.clone(),
            temp_path: temp_path.clone(),
        })?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{LAYOUT_KEY, NOTES_KEY};
    use tempfile::tempdir;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::open(dir.path().join("storage.json"));
        assert!(store.get(LAYOUT_KEY).is_none());
    }

    #[test]
    fn set_persists_across_reopen() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested/storage.json");
        let mut store = FileStore::open(&path);
        store.set(NOTES_KEY, "hello".to_string()).expect("set");

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get(NOTES_KEY).as_deref(), Some("hello"));
    }

    #[test]
    fn write_leaves_no_temp_files() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");
        let mut store = FileStore::open(&path);
        store.set(LAYOUT_KEY, "{}".to_string()).expect("set");

        let names: Vec<_> = fs::read_dir(dir.path())
            .expect("read_dir")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["storage.json".to_string()]);
    }

    #[test]
    fn malformed_file_opens_empty_and_is_kept_aside() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json at all").expect("write");

        let store = FileStore::open(&path);
        assert!(store.get(LAYOUT_KEY).is_none());
        let aside = dir.path().join("storage.json.corrupt");
        assert_eq!(fs::read_to_string(aside).expect("aside copy"), "not json at all");
    }

    #[test]
    fn remove_deletes_key_on_disk() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");
        let mut store = FileStore::open(&path);
        store.set(LAYOUT_KEY, "{}".to_string()).expect("set");
        store.set(NOTES_KEY, "n".to_string()).expect("set");
        store.remove(LAYOUT_KEY).expect("remove");

        let reopened = FileStore::open(&path);
        assert!(reopened.get(LAYOUT_KEY).is_none());
        assert_eq!(reopened.get(NOTES_KEY).as_deref(), Some("n"));
    }

    #[test]
    fn file_is_a_json_object_of_strings() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");
        let mut store = FileStore::open(&path);
        store.set(NOTES_KEY, "x".to_string()).expect("set");

        let raw = fs::read_to_string(&path).expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value[NOTES_KEY], "x");
    }
}
