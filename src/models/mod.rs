//! Core data models for EventsX
//!
//! This module contains the data structures of the events domain: catalog
//! events, users, enrollments, budget items and the governorate table.

pub mod budget_item;
pub mod enrollment;
pub mod event;
pub mod governorate;
pub mod ids;
pub mod money;
pub mod user;

pub use budget_item::CachedBudgetItem;
pub use enrollment::Enrollment;
pub use event::{Event, EventCategory, EventPatch, EventValidationError};
pub use governorate::Governorate;
pub use ids::{EnrollmentId, EventId, UserId};
pub use money::Money;
pub use user::{Role, SessionUser, User};
