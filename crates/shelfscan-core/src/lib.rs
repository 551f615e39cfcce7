//! # shelfscan-core: Pure Barcode Decoding & Product Matching
//!
//! This crate turns a raw scanned or typed string into a structured product
//! match against a catalog. Every function is pure: catalogs, queries and
//! "today" are passed in, results are returned as plain values.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shelfscan Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Collaborators (scanner, UI, catalog store)             │   │
//! │  │    raw scan ──► smart_match ──► render ExactBarcode/Name/...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            shelfscan-catalog (index handle + config)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shelfscan-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  gs1    │ │ expiry  │ │  index  │ │ matcher │ │ search  │  │   │
//! │  │   │ decoder │ │resolver │ │ builder │ │  tiers  │ │ scorer  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                        dispatch (smart_match)                   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductRecord, DecodedBarcode, MatchResult)
//! - [`gs1`] - Barcode decoder (parenthesized, concatenated, plain numeric)
//! - [`expiry`] - `yymmdd` parsing and freshness classification
//! - [`index`] - MasterIndex builder and single-item upsert
//! - [`matcher`] - Tiered product matching
//! - [`search`] - Name relevance scoring
//! - [`dispatch`] - Smart dispatcher, the single external entry point
//! - [`error`] - Domain error types
//! - [`validation`] - Rules for manual edits and caller options
//!
//! ## Example Usage
//!
//! ```rust
//! use shelfscan_core::{dispatch, MasterIndex, MatchOptions, ProductRecord, SmartMatchKind};
//!
//! let catalog = vec![ProductRecord::new("06291109120100", "Panadol")];
//! let index = MasterIndex::build(&catalog);
//!
//! let outcome = dispatch::smart_match(&index, "06291109120100", &MatchOptions::default());
//! assert_eq!(outcome.kind, SmartMatchKind::ExactBarcode);
//! assert_eq!(outcome.results[0].display_name, "Panadol");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dispatch;
pub mod error;
pub mod expiry;
pub mod gs1;
pub mod index;
pub mod matcher;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use expiry::{ExpiryInfo, ExpiryPolicy, ExpiryStatus};
pub use index::{BuildReport, MasterIndex};
pub use search::ScoredProduct;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Days before expiry at which stock counts as "expiring".
pub const DEFAULT_SOON_THRESHOLD_DAYS: i64 = 90;

/// Default cap on name-search and series-match result lists.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Minimum digits on both sides of a series (prefix) comparison.
///
/// Any non-empty fragment may series-match by default. Raise it in config
/// to keep short noise from prefix-matching most of a GS1 catalog.
pub const DEFAULT_SERIES_MIN_DIGITS: usize = 1;

/// Width of the normalized GTIN form.
pub const GTIN14_LEN: usize = 14;
