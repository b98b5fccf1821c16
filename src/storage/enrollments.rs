//! Enrollment repository for JSON storage
//!
//! The enrollment ledger. Holds at most one enrollment per (user, event).

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::EventsxError;
use crate::models::{Enrollment, EventId, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct EnrollmentData {
    enrollments: Vec<Enrollment>,
}

/// Repository for enrollment persistence
pub struct EnrollmentRepository {
    path: PathBuf,
    data: RwLock<Vec<Enrollment>>,
}

impl EnrollmentRepository {
    /// Create a new enrollment repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load enrollments from disk
    pub fn load(&self) -> Result<(), EventsxError> {
        let file_data: EnrollmentData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = file_data.enrollments;
        Ok(())
    }

    /// Save enrollments to disk
    pub fn save(&self) -> Result<(), EventsxError> {
        let data = self
            .data
            .read()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = EnrollmentData {
            enrollments: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Find the enrollment for a (user, event) pair
    pub fn find(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Option<Enrollment>, EventsxError> {
        let data = self
            .data
            .read()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|e| e.is_for(user_id, event_id)).cloned())
    }

    /// All enrollments for a user, oldest first
    pub fn get_for_user(&self, user_id: UserId) -> Result<Vec<Enrollment>, EventsxError> {
        let data = self
            .data
            .read()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut enrollments: Vec<_> = data.iter().filter(|e| e.user_id == user_id).cloned().collect();
        enrollments.sort_by_key(|e| e.enrolled_at);
        Ok(enrollments)
    }

    /// Insert an enrollment
    ///
    /// Returns false and leaves the ledger untouched if the pair is already
    /// enrolled.
    pub fn insert(&self, enrollment: Enrollment) -> Result<bool, EventsxError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if data
            .iter()
            .any(|e| e.is_for(enrollment.user_id, enrollment.event_id))
        {
            return Ok(false);
        }

        data.push(enrollment);
        Ok(true)
    }

    /// Remove the enrollment for a (user, event) pair
    pub fn remove(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Option<Enrollment>, EventsxError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let position = data.iter().position(|e| e.is_for(user_id, event_id));
        Ok(position.map(|index| data.remove(index)))
    }

    /// Remove every enrollment for an event (used when the event is deleted)
    pub fn remove_for_event(&self, event_id: EventId) -> Result<usize, EventsxError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.len();
        data.retain(|e| e.event_id != event_id);
        Ok(before - data.len())
    }

    /// Count enrollments
    pub fn count(&self) -> Result<usize, EventsxError> {
        let data = self
            .data
            .read()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
