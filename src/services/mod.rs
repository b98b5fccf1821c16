//! Service layer for EventsX
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, permission checks, audit logging and the budget computations.

pub mod budget;
pub mod budget_cache;
pub mod catalog;
pub mod enrollment;
pub mod password;
pub mod user;

pub use budget::{BudgetInputs, BudgetSummary};
pub use budget_cache::BudgetCache;
pub use catalog::{CatalogService, EventFilter};
pub use enrollment::{BudgetEnrollment, EnrolledEvent, EnrollmentService};
pub use user::UserService;
