//! Enrollment CLI commands
//!
//! `enroll`, `unenroll` and `enrollments` operate on the logged-in user.

use crate::config::settings::Settings;
use crate::display::format_enrollment_list;
use crate::error::EventsxResult;
use crate::services::user::require_session;
use crate::services::{CatalogService, EnrollmentService};
use crate::storage::{KeyValueStore, Storage};

/// Enroll the current user in an event and add it to their budget
pub fn handle_enroll(
    storage: &Storage,
    store: &dyn KeyValueStore,
    settings: &Settings,
    event: &str,
) -> EventsxResult<()> {
    let session = require_session(store)?;
    let event = CatalogService::new(storage).find_required(event)?;

    let outcome = EnrollmentService::new(storage).enroll_for_budget(store, &session, event.id)?;

    println!("Enrolled in {}.", outcome.event.title);
    if outcome.cached {
        println!(
            "Added to your budget at {}.",
            outcome.event.cost.format_with_symbol(&settings.currency_symbol)
        );
    } else {
        println!("It was already in your budget.");
    }
    println!("Run 'eventsx budget show' to see your total.");

    Ok(())
}

/// Remove the current user's enrollment in an event
pub fn handle_unenroll(storage: &Storage, store: &dyn KeyValueStore, event: &str) -> EventsxResult<()> {
    let session = require_session(store)?;
    let event = CatalogService::new(storage).find_required(event)?;

    EnrollmentService::new(storage).unenroll(&session, event.id)?;

    println!("Unenrolled from {}.", event.title);
    println!("Your budget is unchanged; use 'eventsx budget remove' to drop it there too.");
    Ok(())
}

/// List the current user's enrollments
pub fn handle_enrollments(
    storage: &Storage,
    store: &dyn KeyValueStore,
    settings: &Settings,
) -> EventsxResult<()> {
    let session = require_session(store)?;
    let enrolled = EnrollmentService::new(storage).list_for_user(session.id)?;

    println!("{}", format_enrollment_list(&enrolled, settings));
    Ok(())
}
