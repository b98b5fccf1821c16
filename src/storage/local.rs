//! Client-side key-value store
//!
//! The session record and the per-user budget caches are plain strings
//! stored under string keys. [`KeyValueStore`] abstracts that so the budget
//! code runs against a file on disk or an in-memory map in tests.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::warn;

use crate::error::EventsxError;

use super::file_io::write_json_atomic;

/// Synchronous string key-value storage
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, EventsxError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), EventsxError>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), EventsxError>;
}

/// A key-value store persisted as a single JSON object on disk
///
/// Every call re-reads the file so separate processes see each other's
/// writes. There is no locking: concurrent writers race and the last write
/// wins. A file that no longer parses reads as an empty store and is
/// replaced on the next write.
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, EventsxError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            EventsxError::Storage(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring malformed local store");
                Ok(BTreeMap::new())
            }
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, EventsxError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), EventsxError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        write_json_atomic(&self.path, &entries)
    }

    fn remove(&self, key: &str) -> Result<(), EventsxError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            write_json_atomic(&self.path, &entries)?;
        }
        Ok(())
    }
}

/// An in-memory key-value store
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, EventsxError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), EventsxError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), EventsxError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        entries.remove(key);
        Ok(())
    }
}
