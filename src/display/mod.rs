//! Display formatting for terminal output
//!
//! Provides utilities for formatting events, enrollments and budgets for
//! terminal display.

pub mod budget;
pub mod event;

pub use budget::{format_budget_items, format_budget_summary, format_tickets_total};
pub use event::{format_enrollment_list, format_event_details, format_event_list};
