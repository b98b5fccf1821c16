//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod enrollment;
pub mod event;
pub mod user;

pub use budget::{handle_budget_command, BudgetCommands};
pub use enrollment::{handle_enroll, handle_enrollments, handle_unenroll};
pub use event::{handle_event_command, EventCommands};
pub use user::{handle_user_command, UserCommands};
