//! Storage initialization
//!
//! Handles first-run setup and the sample event catalog

use chrono::NaiveDate;

use crate::config::paths::EventsxPaths;
use crate::error::{EventsxError, EventsxResult};
use crate::models::{Event, EventCategory, Money};

use super::events::EventData;
use super::file_io::write_json_atomic;

/// (title, description, date, location, category, cost in whole units)
const SAMPLE_EVENTS: [(&str, &str, &str, &str, EventCategory, i64); 7] = [
    (
        "Web Design Sprint",
        "Learn modern web design techniques and best practices",
        "2026-01-10",
        "Lab A - Main Campus",
        EventCategory::Workshop,
        10,
    ),
    (
        "Career Prep Seminar",
        "Get ready for your career with tips from industry experts",
        "2026-02-05",
        "Auditorium - Building 3",
        EventCategory::Seminar,
        0,
    ),
    (
        "Research Poster Day",
        "Showcase your research and network with peers",
        "2026-03-18",
        "Hall C - Innovation Center",
        EventCategory::Seminar,
        5,
    ),
    (
        "Networking Night",
        "Connect with professionals and fellow students",
        "2026-04-02",
        "Conference Room 2",
        EventCategory::Networking,
        15,
    ),
    (
        "Python Programming Workshop",
        "Hands-on Python programming workshop for beginners",
        "2026-04-15",
        "Computer Lab B",
        EventCategory::Workshop,
        12,
    ),
    (
        "AI & Machine Learning Summit",
        "Explore the latest trends in AI and Machine Learning",
        "2026-05-10",
        "Main Auditorium",
        EventCategory::Summit,
        20,
    ),
    (
        "Entrepreneurship Workshop",
        "Learn how to start your own business",
        "2026-07-20",
        "Business Center",
        EventCategory::Workshop,
        60,
    ),
];

/// Initialize storage for a fresh installation
///
/// Creates the directory layout and seeds the sample catalog. Returns the
/// number of events seeded (zero when a catalog already exists).
pub fn initialize_storage(paths: &EventsxPaths) -> EventsxResult<usize> {
    paths.ensure_directories()?;

    if !paths.events_file().exists() {
        return create_sample_events(paths);
    }

    Ok(0)
}

fn create_sample_events(paths: &EventsxPaths) -> EventsxResult<usize> {
    let mut events = Vec::with_capacity(SAMPLE_EVENTS.len());

    for (title, description, date, location, category, cost) in SAMPLE_EVENTS {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| EventsxError::Config(format!("Bad sample date {}: {}", date, e)))?;
        events.push(Event::new(
            title,
            description,
            date,
            location,
            category,
            Money::from_units(cost),
        ));
    }

    let count = events.len();
    write_json_atomic(paths.events_file(), &EventData { events })?;
    Ok(count)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &EventsxPaths) -> bool {
    !paths.events_file().exists()
}
