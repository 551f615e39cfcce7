//! # Catalog Error Types
//!
//! Errors raised by the index handle, catalog loading and configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Index Handle   │  │  Catalog File   │  │     Configuration       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  IndexNotBuilt  │  │  CatalogLoad    │  │  InvalidConfig          │ │
//! │  │  LockPoisoned   │  │  InvalidCatalog │  │  ConfigLoadFailed       │ │
//! │  │  Core           │  │                 │  │  ConfigSaveFailed       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shelfscan_core::CoreError;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Index Handle Errors
    // =========================================================================
    /// A match or search was attempted before any catalog was loaded.
    #[error("Catalog index has not been built. Load a catalog first.")]
    IndexNotBuilt,

    /// A thread panicked while holding the index lock.
    #[error("Catalog index lock poisoned")]
    LockPoisoned,

    /// The core rejected an edit.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Catalog File Errors
    // =========================================================================
    /// Failed to read the catalog file.
    #[error("Failed to load catalog: {0}")]
    CatalogLoadFailed(String),

    /// The catalog file is not a JSON array of products.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for CatalogError {
    fn from(err: toml::ser::Error) -> Self {
        CatalogError::ConfigSaveFailed(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::InvalidCatalog(err.to_string())
    }
}

impl From<shelfscan_core::ValidationError> for CatalogError {
    fn from(err: shelfscan_core::ValidationError) -> Self {
        CatalogError::InvalidConfig(err.to_string())
    }
}

impl CatalogError {
    /// Returns true if the caller invoked an operation out of order.
    pub fn is_precondition_error(&self) -> bool {
        matches!(self, CatalogError::IndexNotBuilt)
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidConfig(_)
                | CatalogError::ConfigLoadFailed(_)
                | CatalogError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfscan_core::ValidationError;

    #[test]
    fn test_error_categories() {
        assert!(CatalogError::IndexNotBuilt.is_precondition_error());
        assert!(!CatalogError::LockPoisoned.is_precondition_error());
        assert!(CatalogError::InvalidConfig("x".into()).is_config_error());
        assert!(!CatalogError::IndexNotBuilt.is_config_error());
    }

    #[test]
    fn test_validation_maps_to_invalid_config() {
        let err: CatalogError = ValidationError::MustBePositive {
            field: "result_limit".into(),
        }
        .into();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("result_limit"));
    }
}
