//! Event catalog service
//!
//! Browsing and searching the catalog is open to everyone; creating,
//! updating and deleting events requires an admin session.

use chrono::NaiveDate;
use rand::seq::IndexedRandom;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{EventsxError, EventsxResult};
use crate::models::{Event, EventCategory, EventId, EventPatch, SessionUser};
use crate::storage::Storage;

/// Criteria for searching the catalog; `None` matches everything
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Case-insensitive substring of the title or description
    pub keyword: Option<String>,

    /// Category name; "all" or blank matches every category
    pub category: Option<String>,

    /// Case-insensitive substring of the location
    pub location: Option<String>,

    pub date: Option<NaiveDate>,
}

impl EventFilter {
    /// Whether an event satisfies every criterion
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(keyword) = &self.keyword {
            if !event.matches_keyword(keyword) {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if !category_matches(category, event.category) {
                return false;
            }
        }

        if let Some(location) = &self.location {
            if !event.matches_location(location) {
                return false;
            }
        }

        self.date.map_or(true, |date| event.date == date)
    }
}

/// Category names are compared case-insensitively; unknown names match nothing
fn category_matches(name: &str, category: EventCategory) -> bool {
    let name = name.trim();
    if name.is_empty() || name.eq_ignore_ascii_case("all") {
        return true;
    }
    name.parse::<EventCategory>().is_ok_and(|c| c == category)
}

fn ensure_admin(actor: &SessionUser) -> EventsxResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(EventsxError::Forbidden("Only admins can manage events".into()))
    }
}

/// Service for the event catalog
pub struct CatalogService<'a> {
    storage: &'a Storage,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All events, earliest first
    pub fn list(&self) -> EventsxResult<Vec<Event>> {
        self.storage.events.get_all()
    }

    /// Get an event by ID
    pub fn get(&self, id: EventId) -> EventsxResult<Option<Event>> {
        self.storage.events.get(id)
    }

    /// Get an event by ID, failing if it does not exist
    pub fn get_required(&self, id: EventId) -> EventsxResult<Event> {
        self.get(id)?
            .ok_or_else(|| EventsxError::event_not_found(id.to_string()))
    }

    /// Find an event by title, full ID or short display ID
    pub fn find(&self, identifier: &str) -> EventsxResult<Option<Event>> {
        let identifier = identifier.trim();

        if let Some(event) = self.storage.events.get_by_title(identifier)? {
            return Ok(Some(event));
        }

        if let Ok(id) = identifier.parse::<EventId>() {
            return self.storage.events.get(id);
        }

        let wanted = identifier.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .find(|e| e.id.to_string() == wanted || e.id.short() == wanted))
    }

    /// Find an event, failing if nothing matches
    pub fn find_required(&self, identifier: &str) -> EventsxResult<Event> {
        self.find(identifier)?
            .ok_or_else(|| EventsxError::event_not_found(identifier.trim()))
    }

    /// Events in a category, earliest first
    ///
    /// An unknown category yields an empty list.
    pub fn by_category(&self, category: &str) -> EventsxResult<Vec<Event>> {
        let Ok(category) = category.parse::<EventCategory>() else {
            return Ok(Vec::new());
        };

        Ok(self
            .list()?
            .into_iter()
            .filter(|e| e.category == category)
            .collect())
    }

    /// Events matching a filter, earliest first
    pub fn filter(&self, filter: &EventFilter) -> EventsxResult<Vec<Event>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect())
    }

    /// Two events picked at random, or every event when there are two or fewer
    pub fn random_two(&self) -> EventsxResult<Vec<Event>> {
        let events = self.list()?;
        if events.len() <= 2 {
            return Ok(events);
        }

        Ok(events
            .choose_multiple(&mut rand::rng(), 2)
            .cloned()
            .collect())
    }

    /// Add an event to the catalog
    pub fn create(&self, actor: &SessionUser, event: Event) -> EventsxResult<Event> {
        ensure_admin(actor)?;

        event
            .validate()
            .map_err(|e| EventsxError::Validation(e.to_string()))?;

        self.storage.events.upsert(event.clone())?;
        self.storage.events.save()?;

        self.storage.log_create(
            EntityType::Event,
            event.id.to_string(),
            Some(event.title.clone()),
            &event,
        )?;

        info!(event = %event.id, admin = %actor.id, "created event");
        Ok(event)
    }

    /// Apply a partial update to an event
    pub fn update(&self, actor: &SessionUser, id: EventId, patch: EventPatch) -> EventsxResult<Event> {
        ensure_admin(actor)?;

        let before = self.get_required(id)?;
        let mut event = before.clone();

        if !event.apply(patch) {
            return Ok(event);
        }

        event
            .validate()
            .map_err(|e| EventsxError::Validation(e.to_string()))?;

        self.storage.events.upsert(event.clone())?;
        self.storage.events.save()?;

        self.storage.log_update(
            EntityType::Event,
            event.id.to_string(),
            Some(event.title.clone()),
            &before,
            &event,
        )?;

        info!(event = %event.id, admin = %actor.id, "updated event");
        Ok(event)
    }

    /// Delete an event and every enrollment in it
    pub fn delete(&self, actor: &SessionUser, id: EventId) -> EventsxResult<Event> {
        ensure_admin(actor)?;

        let event = self
            .storage
            .events
            .delete(id)?
            .ok_or_else(|| EventsxError::event_not_found(id.to_string()))?;
        self.storage.events.save()?;

        let removed = self.storage.enrollments.remove_for_event(id)?;
        if removed > 0 {
            self.storage.enrollments.save()?;
        }

        self.storage.log_delete(
            EntityType::Event,
            event.id.to_string(),
            Some(event.title.clone()),
            &event,
        )?;

        info!(event = %event.id, enrollments = removed, "deleted event");
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::EventsxPaths;
    use crate::models::{Enrollment, Money, Role, UserId};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = EventsxPaths::with_base_dir(temp_dir.path().to_path_buf());
        crate::storage::initialize_storage(&paths).unwrap();
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn actor(role: Role) -> SessionUser {
        SessionUser {
            id: UserId::new(),
            name: "Test".into(),
            email: "test@eventsx.com".into(),
            role,
        }
    }

    fn new_event(title: &str) -> Event {
        Event::new(
            title,
            "A talk",
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            "Main Auditorium",
            EventCategory::Seminar,
            Money::from_units(8),
        )
    }

    #[test]
    fn test_list_sorted_by_date() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CatalogService::new(&storage);

        let events = service.list().unwrap();
        assert_eq!(events.len(), 7);
        assert_eq!(events[0].title, "Web Design Sprint");
        assert_eq!(events[6].title, "Entrepreneurship Workshop");
        assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_by_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CatalogService::new(&storage);

        assert_eq!(service.by_category("Workshop").unwrap().len(), 3);
        assert_eq!(service.by_category("summit").unwrap().len(), 1);
        assert!(service.by_category("party").unwrap().is_empty());
    }

    #[test]
    fn test_filter() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CatalogService::new(&storage);

        let filter = EventFilter {
            keyword: Some("python".into()),
            ..Default::default()
        };
        assert_eq!(service.filter(&filter).unwrap().len(), 1);

        let filter = EventFilter {
            category: Some("all".into()),
            location: Some("auditorium".into()),
            ..Default::default()
        };
        assert_eq!(service.filter(&filter).unwrap().len(), 2);

        let filter = EventFilter {
            category: Some("seminar".into()),
            date: NaiveDate::from_ymd_opt(2026, 3, 18),
            ..Default::default()
        };
        let found = service.filter(&filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Research Poster Day");

        let filter = EventFilter {
            category: Some("party".into()),
            ..Default::default()
        };
        assert!(service.filter(&filter).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_title_and_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CatalogService::new(&storage);

        let event = service.find("networking night").unwrap().unwrap();
        assert_eq!(
            service.find(&event.id.as_uuid().to_string()).unwrap().unwrap().id,
            event.id
        );
        assert_eq!(service.find(&event.id.to_string()).unwrap().unwrap().id, event.id);
        assert_eq!(service.find(&event.id.short()).unwrap().unwrap().id, event.id);
        assert!(service.find("Nonexistent").unwrap().is_none());
        assert!(service.find_required("Nonexistent").unwrap_err().is_not_found());
    }

    #[test]
    fn test_random_two() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CatalogService::new(&storage);

        let picked = service.random_two().unwrap();
        assert_eq!(picked.len(), 2);
        assert_ne!(picked[0].id, picked[1].id);
    }

    #[test]
    fn test_random_two_with_few_events() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(EventsxPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let service = CatalogService::new(&storage);
        let admin = actor(Role::Admin);

        assert!(service.random_two().unwrap().is_empty());
        service.create(&admin, new_event("Only One")).unwrap();
        assert_eq!(service.random_two().unwrap().len(), 1);
    }

    #[test]
    fn test_mutations_require_admin() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CatalogService::new(&storage);
        let student = actor(Role::Student);
        let event = service.find_required("Networking Night").unwrap();

        assert!(matches!(
            service.create(&student, new_event("Sneaky")),
            Err(EventsxError::Forbidden(_))
        ));
        assert!(matches!(
            service.update(&student, event.id, EventPatch::default()),
            Err(EventsxError::Forbidden(_))
        ));
        assert!(matches!(
            service.delete(&student, event.id),
            Err(EventsxError::Forbidden(_))
        ));
        assert_eq!(service.list().unwrap().len(), 7);
    }

    #[test]
    fn test_create_validates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CatalogService::new(&storage);
        let admin = actor(Role::Admin);

        let mut bad = new_event("Bad");
        bad.location = String::new();
        assert!(service.create(&admin, bad).unwrap_err().is_validation());

        let created = service.create(&admin, new_event("Guest Lecture")).unwrap();
        assert_eq!(service.get_required(created.id).unwrap().title, "Guest Lecture");
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_update_patches_and_audits() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CatalogService::new(&storage);
        let admin = actor(Role::Admin);
        let event = service.find_required("Networking Night").unwrap();

        let updated = service
            .update(
                &admin,
                event.id,
                EventPatch {
                    cost: Some(Money::from_units(18)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.cost, Money::from_units(18));
        assert_eq!(updated.location, event.location);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].diff_summary.as_deref(), Some("cost: 1500 -> 1800"));

        let err = service
            .update(
                &admin,
                event.id,
                EventPatch {
                    cost: Some(Money::from_cents(-100)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get_required(event.id).unwrap().cost, Money::from_units(18));

        assert!(service
            .update(&admin, EventId::new(), EventPatch::default())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete_removes_enrollments() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CatalogService::new(&storage);
        let admin = actor(Role::Admin);
        let event = service.find_required("Networking Night").unwrap();

        storage
            .enrollments
            .insert(Enrollment::new(UserId::new(), event.id))
            .unwrap();

        service.delete(&admin, event.id).unwrap();
        assert_eq!(storage.enrollments.count().unwrap(), 0);
        assert!(service.get(event.id).unwrap().is_none());
        assert!(service.delete(&admin, event.id).unwrap_err().is_not_found());
    }
}
