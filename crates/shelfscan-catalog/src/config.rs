//! # Scan Configuration
//!
//! Tunables for expiry classification and matching caps.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHELFSCAN_SOON_DAYS=30                                             │
//! │     SHELFSCAN_RESULT_LIMIT=25                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shelfscan/shelfscan.toml (Linux)                         │
//! │     ~/Library/Application Support/com.shelfscan.shelfscan/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     90 days, 10 results, 10 series hits, 6 series digits               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shelfscan.toml
//! [expiry]
//! soon_threshold_days = 90
//!
//! [matching]
//! result_limit = 10
//! series_limit = 10
//! series_min_digits = 1
//! ```

use serde::{Deserialize, Serialize};
use shelfscan_core::validation::{validate_match_options, validate_threshold_days};
use shelfscan_core::{
    ExpiryPolicy, MatchOptions, DEFAULT_RESULT_LIMIT, DEFAULT_SERIES_MIN_DIGITS,
    DEFAULT_SOON_THRESHOLD_DAYS,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "shelfscan.toml";

// =============================================================================
// Expiry Settings
// =============================================================================

/// Freshness classification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirySettings {
    /// Days ahead of expiry at which stock is flagged as expiring.
    #[serde(default = "default_soon_threshold_days")]
    pub soon_threshold_days: i64,
}

fn default_soon_threshold_days() -> i64 {
    DEFAULT_SOON_THRESHOLD_DAYS
}

impl Default for ExpirySettings {
    fn default() -> Self {
        ExpirySettings {
            soon_threshold_days: default_soon_threshold_days(),
        }
    }
}

// =============================================================================
// Matching Settings
// =============================================================================

/// Result caps for the matcher and name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingSettings {
    /// Maximum name-search results.
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Maximum series (prefix) candidates.
    #[serde(default = "default_result_limit")]
    pub series_limit: usize,

    /// Minimum digits on both sides of a series comparison.
    #[serde(default = "default_series_min_digits")]
    pub series_min_digits: usize,
}

fn default_result_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

fn default_series_min_digits() -> usize {
    DEFAULT_SERIES_MIN_DIGITS
}

impl Default for MatchingSettings {
    fn default() -> Self {
        MatchingSettings {
            result_limit: default_result_limit(),
            series_limit: default_result_limit(),
            series_min_digits: default_series_min_digits(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete scan configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub expiry: ExpirySettings,

    #[serde(default)]
    pub matching: MatchingSettings,
}

impl ScanConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (shelfscan.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading scan config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load scan config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config file without applying environment overrides.
    pub fn from_file(path: &Path) -> CatalogResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file and returns the path written.
    pub fn save(&self, config_path: Option<PathBuf>) -> CatalogResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CatalogError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CatalogError::ConfigSaveFailed(e.to_string()))?;
        }

        std::fs::write(&path, self.to_toml()?)
            .map_err(|e| CatalogError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Scan config saved");
        Ok(path)
    }

    /// Renders the configuration as pretty TOML.
    pub fn to_toml(&self) -> CatalogResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        validate_threshold_days(self.expiry.soon_threshold_days)?;
        validate_match_options(&self.match_options())?;
        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Some(days) = env_number::<i64>("SHELFSCAN_SOON_DAYS") {
            debug!(days, "Overriding soon threshold from environment");
            self.expiry.soon_threshold_days = days;
        }

        if let Some(limit) = env_number::<usize>("SHELFSCAN_RESULT_LIMIT") {
            debug!(limit, "Overriding result limit from environment");
            self.matching.result_limit = limit;
        }

        if let Some(limit) = env_number::<usize>("SHELFSCAN_SERIES_LIMIT") {
            self.matching.series_limit = limit;
        }

        if let Some(digits) = env_number::<usize>("SHELFSCAN_SERIES_MIN_DIGITS") {
            self.matching.series_min_digits = digits;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shelfscan", "shelfscan")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    /// Caps handed to the matcher and name search.
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            result_limit: self.matching.result_limit,
            series_limit: self.matching.series_limit,
            series_min_digits: self.matching.series_min_digits,
        }
    }

    /// Threshold handed to the expiry resolver.
    pub fn expiry_policy(&self) -> ExpiryPolicy {
        ExpiryPolicy::with_threshold(self.expiry.soon_threshold_days)
    }
}

/// Reads a numeric environment variable, ignoring unparseable values.
fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring non-numeric environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert_eq!(config.expiry.soon_threshold_days, 90);
        assert_eq!(config.matching.result_limit, 10);
        assert_eq!(config.matching.series_limit, 10);
        assert_eq!(config.matching.series_min_digits, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_conversions() {
        let config = ScanConfig::default();
        assert_eq!(config.match_options(), MatchOptions::default());
        assert_eq!(config.expiry_policy(), ExpiryPolicy::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ScanConfig::default();

        config.matching.result_limit = 0;
        assert!(config.validate().unwrap_err().is_config_error());

        config.matching.result_limit = 10;
        config.expiry.soon_threshold_days = -1;
        assert!(config.validate().is_err());

        config.expiry.soon_threshold_days = 0;
        config.matching.series_min_digits = 15;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ScanConfig = toml::from_str("[matching]\nresult_limit = 25\n").unwrap();
        assert_eq!(config.matching.result_limit, 25);
        assert_eq!(config.matching.series_limit, 10);
        assert_eq!(config.expiry.soon_threshold_days, 90);
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = ScanConfig::default().to_toml().unwrap();
        assert!(toml_str.contains("[expiry]"));
        assert!(toml_str.contains("[matching]"));
        assert!(toml_str.contains("soon_threshold_days = 90"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = ScanConfig::default();
        config.expiry.soon_threshold_days = 30;
        config.matching.series_limit = 5;

        let written = config.save(Some(path.clone())).unwrap();
        assert_eq!(written, path);

        let reloaded = ScanConfig::from_file(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[matching\nresult_limit = ").unwrap();

        let err = ScanConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CatalogError::ConfigLoadFailed(_)));
    }
}
