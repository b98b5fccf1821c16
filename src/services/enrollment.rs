//! Enrollment service
//!
//! Enrolling records the (user, event) pair in the ledger. The budget flow
//! additionally snapshots the event into the user's budget cache.

use tracing::{info, warn};

use crate::audit::EntityType;
use crate::error::{EventsxError, EventsxResult};
use crate::models::{CachedBudgetItem, Enrollment, Event, EventId, SessionUser, UserId};
use crate::storage::{KeyValueStore, Storage};

use super::budget_cache::BudgetCache;
use super::catalog::CatalogService;

/// An enrollment together with its event
#[derive(Debug, Clone)]
pub struct EnrolledEvent {
    pub enrollment: Enrollment,
    pub event: Event,
}

/// Result of enrolling through the budget flow
#[derive(Debug, Clone)]
pub struct BudgetEnrollment {
    pub enrollment: Enrollment,
    pub event: Event,

    /// False when the event was already in the budget cache
    pub cached: bool,
}

/// Service for the enrollment ledger
pub struct EnrollmentService<'a> {
    storage: &'a Storage,
}

impl<'a> EnrollmentService<'a> {
    /// Create a new enrollment service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Enroll a user in an event
    ///
    /// Fails with a duplicate error if the user is already enrolled.
    pub fn enroll(&self, user: &SessionUser, event_id: EventId) -> EventsxResult<Enrollment> {
        let event = CatalogService::new(self.storage).get_required(event_id)?;
        self.enroll_in(user, &event)
    }

    fn enroll_in(&self, user: &SessionUser, event: &Event) -> EventsxResult<Enrollment> {
        let enrollment = Enrollment::new(user.id, event.id);

        if !self.storage.enrollments.insert(enrollment.clone())? {
            return Err(EventsxError::Duplicate {
                entity_type: "Enrollment",
                identifier: event.title.clone(),
            });
        }
        self.storage.enrollments.save()?;

        self.storage.log_create(
            EntityType::Enrollment,
            enrollment.id.to_string(),
            Some(event.title.clone()),
            &enrollment,
        )?;

        info!(user = %user.id, event = %event.id, "enrolled");
        Ok(enrollment)
    }

    /// A user's enrollments with event details, earliest event first
    ///
    /// Enrollments whose event no longer exists are skipped.
    pub fn list_for_user(&self, user_id: UserId) -> EventsxResult<Vec<EnrolledEvent>> {
        let mut enrolled = Vec::new();

        for enrollment in self.storage.enrollments.get_for_user(user_id)? {
            match self.storage.events.get(enrollment.event_id)? {
                Some(event) => enrolled.push(EnrolledEvent { enrollment, event }),
                None => warn!(enrollment = %enrollment.id, "enrollment refers to a missing event"),
            }
        }

        enrolled.sort_by(|a, b| a.event.date.cmp(&b.event.date));
        Ok(enrolled)
    }

    /// Whether a user is enrolled in an event
    pub fn is_enrolled(&self, user_id: UserId, event_id: EventId) -> EventsxResult<bool> {
        Ok(self.storage.enrollments.find(user_id, event_id)?.is_some())
    }

    /// Remove a user's enrollment in an event
    pub fn unenroll(&self, user: &SessionUser, event_id: EventId) -> EventsxResult<Enrollment> {
        let enrollment = self
            .storage
            .enrollments
            .remove(user.id, event_id)?
            .ok_or_else(|| EventsxError::enrollment_not_found(event_id.to_string()))?;
        self.storage.enrollments.save()?;

        self.storage.log_delete(
            EntityType::Enrollment,
            enrollment.id.to_string(),
            None,
            &enrollment,
        )?;

        info!(user = %user.id, event = %event_id, "unenrolled");
        Ok(enrollment)
    }

    /// Enroll and add the event to the user's budget cache
    ///
    /// The event is fetched first so the cached price is the catalog's
    /// current cost. If the fetch or the enrollment fails the cache is left
    /// untouched.
    pub fn enroll_for_budget(
        &self,
        store: &dyn KeyValueStore,
        user: &SessionUser,
        event_id: EventId,
    ) -> EventsxResult<BudgetEnrollment> {
        let event = CatalogService::new(self.storage).get_required(event_id)?;
        let enrollment = self.enroll_in(user, &event)?;

        let mut cache = BudgetCache::load(store, Some(user.id))?;
        let item = CachedBudgetItem::from(&event);
        let cached = cache.insert(item.clone());
        if cached {
            cache.save(store)?;
            self.storage.log_create(
                EntityType::BudgetItem,
                event.id.to_string(),
                Some(event.title.clone()),
                &item,
            )?;
        }

        Ok(BudgetEnrollment {
            enrollment,
            event,
            cached,
        })
    }
}
