//! EventsX - browse events, enroll, and plan your event budget
//!
//! This library provides the core functionality for the EventsX command line
//! application: an event catalog, an enrollment ledger, user accounts and a
//! budget calculator that totals ticket prices, accommodation and transport.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (events, users, enrollments, budget items)
//! - `storage`: JSON file storage layer and the key-value store
//! - `audit`: Audit logging system
//! - `validation`: Form validation
//! - `services`: Business logic layer
//! - `display`: Terminal output formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use eventsx::config::{paths::EventsxPaths, settings::Settings};
//! use eventsx::services::budget::{calculate, BudgetInputs};
//!
//! let paths = EventsxPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let summary = calculate(cache.items(), &BudgetInputs::from_form("20", true, "Aswan"));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::{EventsxError, EventsxResult};
