//! Budget item model
//!
//! A snapshot of an event taken when it is added to a user's budget. The
//! price is copied at that moment and does not follow later catalog edits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::event::{Event, EventCategory};
use super::ids::EventId;
use super::money::Money;

/// An event held in the local budget cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedBudgetItem {
    pub id: EventId,
    pub title: String,

    /// Ticket price at caching time; absent prices count as zero
    #[serde(default)]
    pub price: Option<Money>,

    pub date: NaiveDate,
    pub category: EventCategory,
}

impl CachedBudgetItem {
    /// The price this item contributes to the ticket total
    pub fn price(&self) -> Money {
        self.price.unwrap_or_default()
    }
}

impl From<&Event> for CachedBudgetItem {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            price: Some(event.cost),
            date: event.date,
            category: event.category,
        }
    }
}
