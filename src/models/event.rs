//! Event model
//!
//! Events are the catalog entries users browse, enroll in and budget for.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::EventId;
use super::money::Money;

/// Kind of event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Workshop,
    Seminar,
    Networking,
    Summit,
}

impl EventCategory {
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Workshop,
        EventCategory::Seminar,
        EventCategory::Networking,
        EventCategory::Summit,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Workshop => "workshop",
            EventCategory::Seminar => "seminar",
            EventCategory::Networking => "networking",
            EventCategory::Summit => "summit",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = String;

    /// Case-insensitive parse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| format!("Unknown category: {}", s.trim()))
    }
}

/// An event in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
    pub category: EventCategory,

    /// Ticket price
    #[serde(default)]
    pub cost: Money,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Create a new event with a fresh id
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        location: impl Into<String>,
        category: EventCategory,
        cost: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EventId::new(),
            title: title.into(),
            description: description.into(),
            date,
            location: location.into(),
            category,
            cost,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update
    ///
    /// Returns true if any field changed. Does not validate.
    pub fn apply(&mut self, patch: EventPatch) -> bool {
        let before = self.clone();

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(cost) = patch.cost {
            self.cost = cost;
        }

        let changed = *self != before;
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.title.trim().is_empty() {
            return Err(EventValidationError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(EventValidationError::MissingField("description"));
        }
        if self.location.trim().is_empty() {
            return Err(EventValidationError::MissingField("location"));
        }
        if self.cost.is_negative() {
            return Err(EventValidationError::NegativeCost(self.cost));
        }
        Ok(())
    }

    /// Case-insensitive keyword match on title or description
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        keyword.is_empty()
            || self.title.to_lowercase().contains(&keyword)
            || self.description.to_lowercase().contains(&keyword)
    }

    /// Case-insensitive substring match on location
    pub fn matches_location(&self, location: &str) -> bool {
        let location = location.trim().to_lowercase();
        location.is_empty() || self.location.to_lowercase().contains(&location)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Field changes for an event update; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub category: Option<EventCategory>,
    pub cost: Option<Money>,
}

/// Validation errors for events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    MissingField(&'static str),
    NegativeCost(Money),
}

impl fmt::Display for EventValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Event {} is required", field),
            Self::NegativeCost(cost) => write!(f, "Event cost cannot be negative ({})", cost),
        }
    }
}

impl std::error::Error for EventValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Event {
        Event::new(
            "Networking Night",
            "Connect with professionals and fellow students",
            NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
            "Conference Room 2",
            EventCategory::Networking,
            Money::from_units(15),
        )
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Workshop".parse::<EventCategory>(), Ok(EventCategory::Workshop));
        assert_eq!(" summit ".parse::<EventCategory>(), Ok(EventCategory::Summit));
        assert!("party".parse::<EventCategory>().is_err());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&EventCategory::Networking).unwrap();
        assert_eq!(json, "\"networking\"");
    }

    #[test]
    fn test_validation() {
        let mut event = sample();
        assert!(event.validate().is_ok());

        event.title = "  ".into();
        assert_eq!(
            event.validate(),
            Err(EventValidationError::MissingField("title"))
        );

        let mut event = sample();
        event.cost = Money::from_cents(-1);
        assert!(matches!(
            event.validate(),
            Err(EventValidationError::NegativeCost(_))
        ));
    }

    #[test]
    fn test_cost_defaults_to_zero() {
        let event = sample();
        let mut value = serde_json::to_value(&event).unwrap();
        value.as_object_mut().unwrap().remove("cost");
        let back: Event = serde_json::from_value(value).unwrap();
        assert!(back.cost.is_zero());
    }

    #[test]
    fn test_apply_patch() {
        let mut event = sample();
        assert!(!event.apply(EventPatch::default()));

        let changed = event.apply(EventPatch {
            cost: Some(Money::from_units(20)),
            location: Some("Main Auditorium".into()),
            ..Default::default()
        });
        assert!(changed);
        assert_eq!(event.cost, Money::from_units(20));
        assert_eq!(event.location, "Main Auditorium");
        assert_eq!(event.title, "Networking Night");
    }

    #[test]
    fn test_matching() {
        let event = sample();
        assert!(event.matches_keyword("NETWORK"));
        assert!(event.matches_keyword("professionals"));
        assert!(event.matches_keyword(""));
        assert!(!event.matches_keyword("python"));

        assert!(event.matches_location("room"));
        assert!(!event.matches_location("lab"));
    }
}
