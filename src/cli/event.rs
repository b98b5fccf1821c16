//! Event CLI commands
//!
//! Implements CLI commands for browsing and managing the event catalog.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_event_details, format_event_list};
use crate::error::{EventsxError, EventsxResult};
use crate::models::{Event, EventCategory, EventPatch, Money};
use crate::services::user::require_admin;
use crate::services::{CatalogService, EventFilter};
use crate::storage::{KeyValueStore, Storage};

/// Event subcommands
#[derive(Subcommand)]
pub enum EventCommands {
    /// List all events, earliest first
    List,
    /// Show event details
    Show {
        /// Event title or ID
        event: String,
    },
    /// List events in a category
    Category {
        /// workshop, seminar, networking or summit
        category: String,
    },
    /// Suggest two events at random
    Random,
    /// Search events
    Search {
        /// Text to look for in titles and descriptions
        keyword: Option<String>,
        /// Category name, or "all"
        #[arg(short, long)]
        category: Option<String>,
        /// Text to look for in locations
        #[arg(short, long)]
        location: Option<String>,
        /// Exact event date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Add an event (admin only)
    Add {
        /// Event title
        title: String,
        /// Event description
        #[arg(long)]
        description: String,
        /// Event date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Event location
        #[arg(short, long)]
        location: String,
        /// workshop, seminar, networking or summit
        #[arg(short, long)]
        category: String,
        /// Ticket price (e.g. "12.50")
        #[arg(long, default_value = "0")]
        cost: String,
    },
    /// Update an event (admin only)
    Update {
        /// Event title or ID
        event: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        cost: Option<String>,
    },
    /// Delete an event and its enrollments (admin only)
    Delete {
        /// Event title or ID
        event: String,
    },
}

/// Handle an event command
pub fn handle_event_command(
    storage: &Storage,
    store: &dyn KeyValueStore,
    settings: &Settings,
    cmd: EventCommands,
) -> EventsxResult<()> {
    let service = CatalogService::new(storage);

    match cmd {
        EventCommands::List => {
            println!("{}", format_event_list(&service.list()?, settings));
        }

        EventCommands::Show { event } => {
            let event = service.find_required(&event)?;
            print!("{}", format_event_details(&event, settings));
        }

        EventCommands::Category { category } => {
            let category = parse_category(&category)?;
            let events = service.by_category(category.as_str())?;
            println!("{}", format_event_list(&events, settings));
        }

        EventCommands::Random => {
            let events = service.random_two()?;
            if events.is_empty() {
                println!("No events found.");
            }
            for event in &events {
                print!("{}", format_event_details(event, settings));
                println!();
            }
        }

        EventCommands::Search {
            keyword,
            category,
            location,
            date,
        } => {
            let filter = EventFilter {
                keyword,
                category,
                location,
                date: date.as_deref().map(parse_date).transpose()?,
            };
            println!("{}", format_event_list(&service.filter(&filter)?, settings));
        }

        EventCommands::Add {
            title,
            description,
            date,
            location,
            category,
            cost,
        } => {
            let admin = require_admin(store)?;
            let event = Event::new(
                title.trim(),
                description.trim(),
                parse_date(&date)?,
                location.trim(),
                parse_category(&category)?,
                parse_cost(&cost)?,
            );

            let event = service.create(&admin, event)?;
            println!("Created event: {} ({})", event.title, event.id);
        }

        EventCommands::Update {
            event,
            title,
            description,
            date,
            location,
            category,
            cost,
        } => {
            let admin = require_admin(store)?;
            let existing = service.find_required(&event)?;

            let patch = EventPatch {
                title: title.map(|t| t.trim().to_string()),
                description: description.map(|d| d.trim().to_string()),
                date: date.as_deref().map(parse_date).transpose()?,
                location: location.map(|l| l.trim().to_string()),
                category: category.as_deref().map(parse_category).transpose()?,
                cost: cost.as_deref().map(parse_cost).transpose()?,
            };

            let updated = service.update(&admin, existing.id, patch)?;
            println!("Updated event: {} ({})", updated.title, updated.id);
        }

        EventCommands::Delete { event } => {
            let admin = require_admin(store)?;
            let existing = service.find_required(&event)?;

            let deleted = service.delete(&admin, existing.id)?;
            println!("Deleted event: {}", deleted.title);
        }
    }

    Ok(())
}

pub(crate) fn parse_date(s: &str) -> EventsxResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        EventsxError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s.trim()))
    })
}

fn parse_category(s: &str) -> EventsxResult<EventCategory> {
    s.parse().map_err(EventsxError::Validation)
}

fn parse_cost(s: &str) -> EventsxResult<Money> {
    Money::parse(s).map_err(|e| EventsxError::Validation(e.to_string()))
}
