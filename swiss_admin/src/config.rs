//! Admin tool configuration management.
//!
//! Consolidates environment variable reads and command-line overrides into one
//! validated configuration.

use swiss_tournament::db::{ConfigError, DatabaseConfig};

use crate::output::OutputFormat;

/// Complete configuration for one invocation
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Database configuration
    pub database: DatabaseConfig,
    /// How results are printed
    pub format: OutputFormat,
}

impl AdminConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `database_url_override` - Optional database URL (from `--db-url`)
    /// * `json` - Whether `--json` was passed
    ///
    /// # Errors
    ///
    /// Returns error if no database URL is available or a variable is invalid
    pub fn from_env(
        database_url_override: Option<String>,
        json: bool,
    ) -> Result<Self, ConfigError> {
        let database = match database_url_override {
            Some(url) => DatabaseConfig::with_url_from_env(url)?,
            None => DatabaseConfig::try_from_env()?,
        };

        let format = if json {
            OutputFormat::Json
        } else {
            match std::env::var("SWISS_ADMIN_FORMAT") {
                Ok(value) => value.parse::<OutputFormat>().map_err(|reason| ConfigError::Invalid {
                    var: "SWISS_ADMIN_FORMAT".to_string(),
                    reason,
                })?,
                Err(_) => OutputFormat::Text,
            }
        };

        Ok(Self { database, format })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_delegates_to_database() {
        let config = AdminConfig {
            database: DatabaseConfig {
                max_connections: 0,
                min_connections: 0,
                ..DatabaseConfig::development()
            },
            format: OutputFormat::Text,
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_url_override_and_json_flag() {
        let config =
            AdminConfig::from_env(Some("postgres://localhost/override".to_string()), true).unwrap();

        assert_eq!(config.database.database_url, "postgres://localhost/override");
        assert_eq!(config.format, OutputFormat::Json);
    }
}
