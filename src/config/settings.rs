//! User settings for EventsX
//!
//! Manages display preferences persisted in `config.json`.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::EventsxPaths;
use crate::error::EventsxError;

/// User settings for EventsX
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether `eventsx init` has been run
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

/// Whether chrono can render dates with this strftime pattern
pub fn is_valid_date_format(format: &str) -> bool {
    !format.is_empty() && StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &EventsxPaths) -> Result<Self, EventsxError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| EventsxError::Io(format!("Failed to read settings file: {}", e)))?;

            let mut settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                EventsxError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if !is_valid_date_format(&settings.date_format) {
                warn!(
                    date_format = %settings.date_format,
                    "unsupported date format in settings, using the default"
                );
                settings.date_format = default_date_format();
            }

            Ok(settings)
        } else {
            // Not persisted until the caller saves
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &EventsxPaths) -> Result<(), EventsxError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| EventsxError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| EventsxError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert!(!settings.setup_completed);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EventsxPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "EGP ".to_string();
        settings.setup_completed = true;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "EGP ");
        assert!(loaded.setup_completed);
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EventsxPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"date_format": "%Q", "currency_symbol": "EGP "}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.date_format, "%Y-%m-%d");
        assert_eq!(loaded.currency_symbol, "EGP ");

        let date = chrono::NaiveDate::from_ymd_opt(2026, 4, 2).unwrap();
        assert_eq!(date.format(&loaded.date_format).to_string(), "2026-04-02");
    }

    #[test]
    fn test_date_format_check() {
        assert!(is_valid_date_format("%Y-%m-%d"));
        assert!(is_valid_date_format("%d/%m/%Y"));
        assert!(is_valid_date_format("%b %e, %Y"));
        assert!(!is_valid_date_format("%Q"));
        assert!(!is_valid_date_format("%Y-%"));
        assert!(!is_valid_date_format(""));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.currency_symbol, "$");
    }
}
