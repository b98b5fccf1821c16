//! Storage layer for EventsX
//!
//! Provides JSON file storage with atomic writes for the catalog, the
//! enrollment ledger and users, plus the string key-value store that holds
//! the session and budget caches.

pub mod enrollments;
pub mod events;
pub mod file_io;
pub mod init;
pub mod local;
pub mod users;

pub use enrollments::EnrollmentRepository;
pub use events::EventRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use local::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use users::UserRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::EventsxPaths;
use crate::error::EventsxResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: EventsxPaths,
    pub events: EventRepository,
    pub enrollments: EnrollmentRepository,
    pub users: UserRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: EventsxPaths) -> EventsxResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            events: EventRepository::new(paths.events_file()),
            enrollments: EnrollmentRepository::new(paths.enrollments_file()),
            users: UserRepository::new(paths.users_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &EventsxPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> EventsxResult<()> {
        self.events.load()?;
        self.enrollments.load()?;
        self.users.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> EventsxResult<()> {
        self.events.save()?;
        self.enrollments.save()?;
        self.users.save()?;
        Ok(())
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> EventsxResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update in the audit log, with a summary of changed fields
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> EventsxResult<()> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> EventsxResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
