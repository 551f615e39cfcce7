//! # Validation Module
//!
//! Input validation for the paths that are allowed to fail: manual catalog
//! edits and caller-supplied options.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Validation Applies                           │
//! │                                                                         │
//! │  Bulk rebuild (import/load)                                            │
//! │  ├── Lenient: blank codes are skipped and counted in BuildReport       │
//! │  └── Never fails                                                        │
//! │                                                                         │
//! │  Single-item upsert (manual edit)                                      │
//! │  ├── THIS MODULE: primary code + display name rules                    │
//! │  └── Rejected edits leave the live index untouched                     │
//! │                                                                         │
//! │  Options / configuration                                               │
//! │  └── THIS MODULE: limits and thresholds                                │
//! │                                                                         │
//! │  Decode / match / search                                               │
//! │  └── No validation: bad input is a result state, not an error          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{MatchOptions, ProductRecord};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest primary or secondary code accepted on the edit path.
pub const MAX_CODE_LEN: usize = 64;

/// Longest display name accepted on the edit path.
pub const MAX_NAME_LEN: usize = 200;

/// Upper bound for any result cap.
pub const MAX_RESULT_LIMIT: usize = 1000;

/// Upper bound for the expiring-soon window (ten years).
pub const MAX_THRESHOLD_DAYS: i64 = 3650;

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a primary code.
///
/// ## Rules
/// - Must not be blank
/// - At most 64 characters
///
/// ## Example
/// ```rust
/// use shelfscan_core::validation::validate_primary_code;
///
/// assert!(validate_primary_code("06291109120100").is_ok());
/// assert!(validate_primary_code("  ").is_err());
/// ```
pub fn validate_primary_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "primaryCode".to_string(),
        });
    }

    if code.len() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "primaryCode".to_string(),
            max: MAX_CODE_LEN,
        });
    }

    Ok(())
}

/// Validates a display name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_display_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "displayName".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "displayName".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a record submitted through a manual edit.
pub fn validate_record(record: &ProductRecord) -> ValidationResult<()> {
    validate_primary_code(&record.primary_code)?;
    validate_display_name(&record.display_name)?;

    if let Some(code) = record.secondary_code() {
        if code.len() > MAX_CODE_LEN {
            return Err(ValidationError::TooLong {
                field: "secondaryCode".to_string(),
                max: MAX_CODE_LEN,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Option Validators
// =============================================================================

/// Validates a result cap.
///
/// ## Rules
/// - Must be positive
/// - At most 1000
pub fn validate_limit(field: &str, limit: usize) -> ValidationResult<()> {
    if limit == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if limit > MAX_RESULT_LIMIT {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_RESULT_LIMIT as i64,
        });
    }

    Ok(())
}

/// Validates the expiring-soon threshold in days.
pub fn validate_threshold_days(days: i64) -> ValidationResult<()> {
    if !(0..=MAX_THRESHOLD_DAYS).contains(&days) {
        return Err(ValidationError::OutOfRange {
            field: "soon_threshold_days".to_string(),
            min: 0,
            max: MAX_THRESHOLD_DAYS,
        });
    }

    Ok(())
}

/// Validates a full set of match options.
pub fn validate_match_options(options: &MatchOptions) -> ValidationResult<()> {
    validate_limit("result_limit", options.result_limit)?;
    validate_limit("series_limit", options.series_limit)?;

    if options.series_min_digits == 0 || options.series_min_digits > crate::GTIN14_LEN {
        return Err(ValidationError::OutOfRange {
            field: "series_min_digits".to_string(),
            min: 1,
            max: crate::GTIN14_LEN as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_primary_code() {
        assert!(validate_primary_code("06291109120100").is_ok());
        assert!(validate_primary_code("SKU-1").is_ok());

        assert!(validate_primary_code("").is_err());
        assert!(validate_primary_code("   ").is_err());
        assert!(validate_primary_code(&"9".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_display_name() {
        assert!(validate_display_name("Panadol Extra").is_ok());
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_record() {
        let ok = ProductRecord::new("06291109120100", "Panadol").with_secondary_code("PAN-1");
        assert!(validate_record(&ok).is_ok());

        let long_sku = ProductRecord::new("1", "A").with_secondary_code("X".repeat(80));
        assert!(validate_record(&long_sku).is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert!(validate_limit("result_limit", 1).is_ok());
        assert!(validate_limit("result_limit", 1000).is_ok());
        assert!(validate_limit("result_limit", 0).is_err());
        assert!(validate_limit("result_limit", 1001).is_err());
    }

    #[test]
    fn test_validate_threshold_days() {
        assert!(validate_threshold_days(0).is_ok());
        assert!(validate_threshold_days(90).is_ok());
        assert!(validate_threshold_days(-1).is_err());
        assert!(validate_threshold_days(4000).is_err());
    }

    #[test]
    fn test_validate_match_options() {
        assert!(validate_match_options(&MatchOptions::default()).is_ok());

        let bad = MatchOptions {
            series_min_digits: 0,
            ..MatchOptions::default()
        };
        assert!(validate_match_options(&bad).is_err());
    }
}
