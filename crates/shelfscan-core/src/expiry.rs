//! # Expiry Module
//!
//! Turns the GS1 `yymmdd` date field into a calendar date and classifies
//! stock freshness against a reference day.
//!
//! ## Date Field Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       yymmdd → NaiveDate                                │
//! │                                                                         │
//! │  "250131"  ──►  2025-01-31                                             │
//! │  "250200"  ──►  2025-02-28   day 00 = last day of the month            │
//! │  "240200"  ──►  2024-02-29   (leap year handled by the calendar)       │
//! │  "251300"  ──►  None         month out of range                        │
//! │  "250230"  ──►  None         no such day                               │
//! │                                                                         │
//! │  Century: always 2000 + yy  ("991231" ──► 2099-12-31)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Freshness Classification
//! ```text
//!        Expired          │      Expiring        │        Ok
//!  ───────────────────────┼──────────────────────┼─────────────────────►
//!                       today           today + threshold        date
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::DEFAULT_SOON_THRESHOLD_DAYS;

// =============================================================================
// Date Field Parsing
// =============================================================================

/// Parses a six-digit `yymmdd` GS1 date field.
///
/// Returns `None` for anything that is not six ASCII digits naming a real
/// calendar day. Day `00` resolves to the last day of the month.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use shelfscan_core::expiry::parse_expiry;
///
/// assert_eq!(parse_expiry("250131"), NaiveDate::from_ymd_opt(2025, 1, 31));
/// assert_eq!(parse_expiry("250200"), NaiveDate::from_ymd_opt(2025, 2, 28));
/// assert_eq!(parse_expiry("25013"), None);
/// ```
pub fn parse_expiry(yymmdd: &str) -> Option<NaiveDate> {
    if yymmdd.len() != 6 || !yymmdd.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let yy: i32 = yymmdd[0..2].parse().ok()?;
    let month: u32 = yymmdd[2..4].parse().ok()?;
    let day: u32 = yymmdd[4..6].parse().ok()?;

    let year = 2000 + yy;

    if day == 0 {
        return last_day_of_month(year, month);
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Last calendar day of `month` in `year`.
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

// =============================================================================
// Freshness Classification
// =============================================================================

/// Freshness of a dated item relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// The date is before today.
    Expired,
    /// Within the threshold window, today included.
    Expiring,
    /// Further out than the threshold.
    Ok,
    /// No date was available.
    Unknown,
}

/// Threshold used to split `Expiring` from `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryPolicy {
    pub soon_threshold_days: i64,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        ExpiryPolicy {
            soon_threshold_days: DEFAULT_SOON_THRESHOLD_DAYS,
        }
    }
}

impl ExpiryPolicy {
    /// Creates a policy with a custom window.
    pub const fn with_threshold(days: i64) -> Self {
        ExpiryPolicy {
            soon_threshold_days: days,
        }
    }
}

/// Resolved expiry information ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryInfo {
    /// `YYYY-MM-DD`, absent when the date is unknown.
    pub iso: Option<String>,
    /// `DD Mon YYYY`, or `Unknown`.
    pub display: String,
    /// Days from today to the expiry date (negative once expired).
    pub days_until: Option<i64>,
    pub status: ExpiryStatus,
}

impl ExpiryInfo {
    fn unknown() -> Self {
        ExpiryInfo {
            iso: None,
            display: "Unknown".to_string(),
            days_until: None,
            status: ExpiryStatus::Unknown,
        }
    }
}

/// Classifies `date` against `today`.
///
/// `today` is the caller's local midnight; this function never reads a
/// clock, so the same inputs always give the same answer.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use shelfscan_core::expiry::{resolve_expiry, ExpiryPolicy, ExpiryStatus};
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 1, 31);
///
/// let info = resolve_expiry(date, today, &ExpiryPolicy::default());
/// assert_eq!(info.status, ExpiryStatus::Expiring);
/// assert_eq!(info.iso.as_deref(), Some("2025-01-31"));
/// ```
pub fn resolve_expiry(date: Option<NaiveDate>, today: NaiveDate, policy: &ExpiryPolicy) -> ExpiryInfo {
    let Some(date) = date else {
        return ExpiryInfo::unknown();
    };

    let days_until = (date - today).num_days();

    let status = if date < today {
        ExpiryStatus::Expired
    } else if days_until <= policy.soon_threshold_days {
        ExpiryStatus::Expiring
    } else {
        ExpiryStatus::Ok
    };

    ExpiryInfo {
        iso: Some(date.format("%Y-%m-%d").to_string()),
        display: format!("{:02} {} {}", date.day(), date.format("%b"), date.year()),
        days_until: Some(days_until),
        status,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
