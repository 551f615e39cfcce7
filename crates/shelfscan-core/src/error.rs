//! # Error Types
//!
//! Domain-specific error types for shelfscan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelfscan-core errors (this file)                                     │
//! │  ├── CoreError        - Rejected catalog edits                         │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  shelfscan-catalog errors (separate crate)                             │
//! │  └── CatalogError     - Index not built, config load/save failures     │
//! │                                                                         │
//! │  NOT errors (first-class result states instead):                       │
//! │  • unparseable barcode  → empty DecodedBarcode                         │
//! │  • no product found     → MatchKind::None                              │
//! │  • ambiguous suffix     → tier fails, next tier runs                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, field, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core logic errors.
///
/// Decoding and matching never produce these; they come from the edit paths
/// (single-item upsert) and from option validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A catalog record cannot be indexed.
    ///
    /// ## When This Occurs
    /// - Manual edit submits a blank primary code
    /// - Primary code or name exceeds the allowed length
    #[error("Invalid product record '{code}': {source}")]
    InvalidRecord {
        code: String,
        #[source]
        source: ValidationError,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidRecord {
            code: "   ".to_string(),
            source: ValidationError::Required {
                field: "primaryCode".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Invalid product record '   ': primaryCode is required"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "result_limit".to_string(),
        };
        assert_eq!(err.to_string(), "result_limit must be positive");

        let err = ValidationError::TooLong {
            field: "displayName".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "displayName must be at most 200 characters");
    }
}
