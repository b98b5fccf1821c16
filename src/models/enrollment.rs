//! Enrollment model
//!
//! Links a user to an event. The pair (user, event) is unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EnrollmentId, EventId, UserId};

/// A user's enrollment in an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(user_id: UserId, event_id: EventId) -> Self {
        Self {
            id: EnrollmentId::new(),
            user_id,
            event_id,
            enrolled_at: Utc::now(),
        }
    }

    /// Whether this enrollment is for the given (user, event) pair
    pub fn is_for(&self, user_id: UserId, event_id: EventId) -> bool {
        self.user_id == user_id && self.event_id == event_id
    }
}
