//! Configuration module for EventsX
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::EventsxPaths;
pub use settings::Settings;
