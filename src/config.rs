//! Session Config

use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

use crate::{cart::DEFAULT_MAX_QUANTITY, search::DEFAULT_MIN_QUERY_LEN};

/// Config loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A setting is out of range
    #[error("Invalid setting {field}: {reason}")]
    Invalid {
        /// Name of the offending setting
        field: &'static str,
        /// Why it was rejected
        reason: &'static str,
    },
}

/// Tunables for a cart & search session.
///
/// Every field has a default, so a YAML file only needs the settings it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Quiet window before a typed search runs, in milliseconds
    pub search_debounce_ms: u64,

    /// Minimum characters a normalized query needs before it runs
    pub min_query_len: usize,

    /// Upper bound a single add is clamped to
    pub max_quantity: u32,

    /// Number of notices kept for the view to drain
    pub notice_capacity: usize,

    /// How long notices stay on screen, in milliseconds
    pub notice_duration_ms: u64,
}

impl SessionConfig {
    /// Parse and validate a YAML config.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the YAML is malformed or a setting is out of range.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_norway::from_str(contents)?;

        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read, parsed or validated.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Check settings are in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_quantity == 0 {
            return Err(ConfigError::Invalid {
                field: "max_quantity",
                reason: "must be at least 1",
            });
        }

        if self.min_query_len == 0 {
            return Err(ConfigError::Invalid {
                field: "min_query_len",
                reason: "must be at least 1",
            });
        }

        Ok(())
    }

    /// Set the debounce window.
    #[must_use]
    pub fn with_search_debounce(mut self, window: Duration) -> Self {
        self.search_debounce_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Quiet window before a typed search runs.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// How long notices stay on screen.
    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 300,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            max_quantity: DEFAULT_MAX_QUANTITY,
            notice_capacity: 5,
            notice_duration_ms: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() -> TestResult {
        let config = SessionConfig::from_yaml_str("{}")?;

        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.notice_duration(), Duration::from_secs(5));

        Ok(())
    }

    #[test]
    fn yaml_overrides_selected_fields() -> TestResult {
        let config = SessionConfig::from_yaml_str("search_debounce_ms: 150\nmax_quantity: 6\n")?;

        assert_eq!(config.search_debounce(), Duration::from_millis(150));
        assert_eq!(config.max_quantity, 6);
        assert_eq!(config.min_query_len, DEFAULT_MIN_QUERY_LEN);

        Ok(())
    }

    #[test]
    fn zero_max_quantity_is_rejected() {
        let result = SessionConfig::from_yaml_str("max_quantity: 0\n");

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "max_quantity",
                ..
            })
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = SessionConfig::from_yaml_str("debounce: 10\n");

        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn from_path_reads_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.yml");

        fs::write(&path, "min_query_len: 3\n")?;

        let config = SessionConfig::from_path(&path)?;

        assert_eq!(config.min_query_len, 3);

        Ok(())
    }

    #[test]
    fn with_search_debounce_sets_window() {
        let config = SessionConfig::default().with_search_debounce(Duration::from_millis(50));

        assert_eq!(config.search_debounce_ms, 50);
    }
}
