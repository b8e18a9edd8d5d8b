//! Desk configuration via `sift.toml`
//!
//! A flat TOML file with the knobs the search pipeline exposes. Missing
//! fields take their defaults, so an empty file is a valid config.

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::session::SessionConfig;
use crate::window::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use sift_core::{Error, IndexLimits, Result, DEFAULT_MAX_POSTINGS};
use std::path::Path;
use std::time::Duration;

/// Config file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "sift.toml";

/// Desk configuration loaded from `sift.toml`.
///
/// # Example
///
/// ```toml
/// page_size = 20
/// debounce_ms = 300
/// max_index_postings = 50000000
/// seed_records = 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    /// Records revealed per page.
    pub page_size: usize,
    /// Quiet period before a query is applied, in milliseconds.
    pub debounce_ms: u64,
    /// Posting budget for one index rebuild.
    pub max_index_postings: usize,
    /// Number of sample records to load at startup.
    pub seed_records: usize,
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            max_index_postings: DEFAULT_MAX_POSTINGS,
            seed_records: 0,
        }
    }
}

impl SiftConfig {
    /// Check values the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns `Config` if `page_size` or `max_index_postings` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::config("page_size must be at least 1"));
        }
        if self.max_index_postings == 0 {
            return Err(Error::config("max_index_postings must be at least 1"));
        }
        Ok(())
    }

    /// Debounce delay as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Index posting budget.
    pub fn index_limits(&self) -> IndexLimits {
        IndexLimits::with_max_postings(self.max_index_postings)
    }

    /// Session tunables derived from this config.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            page_size: self.page_size,
            debounce: self.debounce(),
            limits: self.index_limits(),
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# sift configuration
#
# Records revealed per page; "load more" adds another page.
page_size = 20

# Quiet period (ms) after the last keystroke before a query is applied.
debounce_ms = 300

# Upper bound on (fragment, record) postings per index rebuild.
# A rebuild that would exceed it is rejected and the previous index kept.
max_index_postings = 50000000

# Sample records loaded at startup (0 = start empty).
seed_records = 0
"#
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: SiftConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiftConfig::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.max_index_postings, 50_000_000);
        assert_eq!(config.seed_records, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_toml_matches_default() {
        let config: SiftConfig = toml::from_str(SiftConfig::default_toml()).unwrap();
        assert_eq!(config, SiftConfig::default());
    }

    #[test]
    fn partial_file_uses_defaults() {
        let config: SiftConfig = toml::from_str("seed_records = 120").unwrap();
        assert_eq!(config.seed_records, 120);
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn session_config_conversion() {
        let config = SiftConfig {
            page_size: 5,
            debounce_ms: 50,
            max_index_postings: 1000,
            seed_records: 0,
        };
        let session = config.session_config();
        assert_eq!(session.page_size, 5);
        assert_eq!(session.debounce, Duration::from_millis(50));
        assert_eq!(session.limits.max_postings, 1000);
    }

    #[test]
    fn zero_page_size_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "page_size = 0\n").unwrap();

        let err = SiftConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "page_size = \"many\"\n").unwrap();

        let err = SiftConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = SiftConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn write_default_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert!(!path.exists());

        SiftConfig::write_default_if_missing(&path).unwrap();
        assert!(path.exists());
        assert_eq!(SiftConfig::from_file(&path).unwrap(), SiftConfig::default());
    }

    #[test]
    fn write_default_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "page_size = 7\n").unwrap();

        SiftConfig::write_default_if_missing(&path).unwrap();
        assert_eq!(SiftConfig::from_file(&path).unwrap().page_size, 7);
    }
}
