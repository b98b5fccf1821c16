//! Event display formatting
//!
//! Formats catalog events and enrollments for terminal output.

use tabled::{settings::Style, Table, Tabled};

use crate::config::settings::Settings;
use crate::models::Event;
use crate::services::EnrolledEvent;

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

impl EventRow {
    fn new(event: &Event, settings: &Settings) -> Self {
        Self {
            id: event.id.to_string(),
            date: event.date.format(&settings.date_format).to_string(),
            title: truncate(&event.title, 32),
            category: event.category.to_string(),
            location: truncate(&event.location, 28),
            cost: event.cost.format_with_symbol(&settings.currency_symbol),
        }
    }
}

/// Format a list of events as a table
pub fn format_event_list(events: &[Event], settings: &Settings) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }

    let rows: Vec<_> = events.iter().map(|e| EventRow::new(e, settings)).collect();
    let mut table = Table::new(rows);
    table.with(Style::psql());

    format!("{}\n\n{} event(s)", table, events.len())
}

/// Format a single event's details
pub fn format_event_details(event: &Event, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Event: {}\n", event.title));
    output.push_str(&format!("  ID:          {}\n", event.id));
    output.push_str(&format!(
        "  Date:        {}\n",
        event.date.format(&settings.date_format)
    ));
    output.push_str(&format!("  Location:    {}\n", event.location));
    output.push_str(&format!("  Category:    {}\n", event.category));
    output.push_str(&format!(
        "  Cost:        {}\n",
        event.cost.format_with_symbol(&settings.currency_symbol)
    ));
    output.push('\n');
    output.push_str(&format!("  {}\n", event.description));

    output
}

/// Format a user's enrollments
pub fn format_enrollment_list(enrolled: &[EnrolledEvent], settings: &Settings) -> String {
    if enrolled.is_empty() {
        return "You are not enrolled in any events.".to_string();
    }

    let rows: Vec<_> = enrolled
        .iter()
        .map(|e| EventRow::new(&e.event, settings))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::psql());

    format!("{}\n\n{} enrollment(s)", table, enrolled.len())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventCategory, Money};
    use chrono::NaiveDate;

    fn event() -> Event {
        Event::new(
            "AI & Machine Learning Summit",
            "Explore the latest trends in AI and Machine Learning",
            NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(),
            "Main Auditorium",
            EventCategory::Summit,
            Money::from_units(20),
        )
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_event_list(&[], &Settings::default()), "No events found.");
        assert_eq!(
            format_enrollment_list(&[], &Settings::default()),
            "You are not enrolled in any events."
        );
    }

    #[test]
    fn test_event_list_contains_columns() {
        let output = format_event_list(&[event()], &Settings::default());
        assert!(output.contains("Title"));
        assert!(output.contains("AI & Machine Learning Summit"));
        assert!(output.contains("2026-05-10"));
        assert!(output.contains("$20.00"));
        assert!(output.ends_with("1 event(s)"));
    }

    #[test]
    fn test_event_details() {
        let settings = Settings {
            date_format: "%d/%m/%Y".into(),
            ..Default::default()
        };
        let output = format_event_details(&event(), &settings);
        assert!(output.starts_with("Event: AI & Machine Learning Summit"));
        assert!(output.contains("10/05/2026"));
        assert!(output.contains("summit"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long title indeed", 10), "a very ...");
    }
}
