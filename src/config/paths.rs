//! Path management for EventsX
//!
//! Resolves where configuration, data files, the local store and the audit
//! log live.
//!
//! ## Path Resolution Order
//!
//! 1. `EVENTSX_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/eventsx` on Linux,
//!    `~/Library/Application Support/eventsx` on macOS, `%APPDATA%\eventsx`
//!    on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::EventsxError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "EVENTSX_DATA_DIR";

/// Manages all paths used by EventsX
#[derive(Debug, Clone)]
pub struct EventsxPaths {
    base_dir: PathBuf,
}

impl EventsxPaths {
    /// Create a new EventsxPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, EventsxError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create EventsxPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the client-side key-value store
    ///
    /// Holds the session record and the per-user budget caches.
    pub fn local_store_file(&self) -> PathBuf {
        self.base_dir.join("local_storage.json")
    }

    /// Get the path to events.json (the event catalog)
    pub fn events_file(&self) -> PathBuf {
        self.data_dir().join("events.json")
    }

    /// Get the path to enrollments.json (the enrollment ledger)
    pub fn enrollments_file(&self) -> PathBuf {
        self.data_dir().join("enrollments.json")
    }

    /// Get the path to users.json
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), EventsxError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| EventsxError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| EventsxError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, EventsxError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| EventsxError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("eventsx"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EventsxPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(
            paths.local_store_file(),
            temp_dir.path().join("local_storage.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EventsxPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EventsxPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.events_file(),
            temp_dir.path().join("data").join("events.json")
        );
        assert_eq!(
            paths.enrollments_file(),
            temp_dir.path().join("data").join("enrollments.json")
        );
        assert_eq!(
            paths.users_file(),
            temp_dir.path().join("data").join("users.json")
        );
    }
}
