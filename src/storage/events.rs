//! Event repository for JSON storage
//!
//! Manages loading and saving the event catalog to events.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::EventsxError;
use crate::models::{Event, EventId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable catalog data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct EventData {
    pub(crate) events: Vec<Event>,
}

/// Repository for event persistence
pub struct EventRepository {
    path: PathBuf,
    data: RwLock<HashMap<EventId, Event>>,
}

impl EventRepository {
    /// Create a new event repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load events from disk
    pub fn load(&self) -> Result<(), EventsxError> {
        let file_data: EventData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for event in file_data.events {
            data.insert(event.id, event);
        }

        Ok(())
    }

    /// Save events to disk, ordered by date
    pub fn save(&self) -> Result<(), EventsxError> {
        let events = self.get_all()?;
        write_json_atomic(&self.path, &EventData { events })
    }

    /// Get an event by ID
    pub fn get(&self, id: EventId) -> Result<Option<Event>, EventsxError> {
        let data = self
            .data
            .read()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all events sorted by date ascending (title breaks ties)
    pub fn get_all(&self) -> Result<Vec<Event>, EventsxError> {
        let data = self
            .data
            .read()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut events: Vec<_> = data.values().cloned().collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));
        Ok(events)
    }

    /// Find an event whose title matches exactly (case-insensitive)
    pub fn get_by_title(&self, title: &str) -> Result<Option<Event>, EventsxError> {
        let wanted = title.trim().to_lowercase();
        Ok(self
            .get_all()?
            .into_iter()
            .find(|e| e.title.to_lowercase() == wanted))
    }

    /// Insert or update an event
    pub fn upsert(&self, event: Event) -> Result<(), EventsxError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(event.id, event);
        Ok(())
    }

    /// Delete an event, returning it if it existed
    pub fn delete(&self, id: EventId) -> Result<Option<Event>, EventsxError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id))
    }

    /// Count events
    pub fn count(&self) -> Result<usize, EventsxError> {
        let data = self
            .data
            .read()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventCategory, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, EventRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = EventRepository::new(temp_dir.path().join("events.json"));
        (temp_dir, repo)
    }

    fn event(title: &str, month: u32) -> Event {
        Event::new(
            title,
            "description",
            NaiveDate::from_ymd_opt(2026, month, 1).unwrap(),
            "Main Auditorium",
            EventCategory::Seminar,
            Money::from_units(5),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_get_all_sorted_by_date() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(event("Summer", 7)).unwrap();
        repo.upsert(event("Winter", 1)).unwrap();
        repo.upsert(event("Spring", 4)).unwrap();

        let titles: Vec<_> = repo.get_all().unwrap().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Winter", "Spring", "Summer"]);
    }

    #[test]
    fn test_get_by_title() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(event("Career Prep Seminar", 2)).unwrap();

        assert!(repo.get_by_title("career prep seminar").unwrap().is_some());
        assert!(repo.get_by_title("Career").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let e = event("Research Poster Day", 3);
        let id = e.id;
        repo.upsert(e).unwrap();
        repo.save().unwrap();

        let repo2 = EventRepository::new(temp_dir.path().join("events.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap().unwrap().title, "Research Poster Day");
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let e = event("Networking Night", 4);
        let id = e.id;
        repo.upsert(e).unwrap();

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
