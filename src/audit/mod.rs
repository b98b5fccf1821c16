//! Audit logging system for EventsX
//!
//! Records create, update and delete operations on events, users,
//! enrollments and budget items in an append-only JSONL log.
//!
//! - `AuditEntry`: a single entry with timestamp, operation, entity
//!   information and optional before/after values.
//! - `AuditLogger`: appends entries to the log file and reads them back.
//! - `generate_diff`: human-readable summary of changed fields.
//!
//! # Example
//!
//! ```rust,ignore
//! use eventsx::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::Event,
//!     event.id.to_string(),
//!     Some(event.title.clone()),
//!     &event,
//! );
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
