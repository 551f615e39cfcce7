//! # Domain Types
//!
//! Core value types passed between the decoder, the index, the matcher and
//! the collaborators that render results.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProductRecord   │   │ DecodedBarcode  │   │  MatchResult    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  primary_code   │   │  gtin14/gtin13  │   │  product        │       │
//! │  │  display_name   │   │  batch, serial  │   │  kind           │       │
//! │  │  secondary_code │   │  quantity       │   │  candidates     │       │
//! │  └─────────────────┘   │  expiry         │   └─────────────────┘       │
//! │                        │  is_structured  │                              │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   MatchKind     │   │ SmartMatchKind  │   │  BarcodeFormat  │       │
//! │  │  Exact          │   │  ExactBarcode   │   │  Parenthesized  │       │
//! │  │  SecondaryCode  │   │  SeriesBarcode  │   │  Concatenated   │       │
//! │  │  LastEightDigits│   │  Name           │   │  PlainNumeric   │       │
//! │  │  Series / Name  │   │  NoMatch        │   │  Unrecognized   │       │
//! │  │  None           │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All outward types serialize with camelCase keys; the rendering layer
//! consumes them as JSON and through the generated TypeScript bindings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{DEFAULT_RESULT_LIMIT, DEFAULT_SERIES_MIN_DIGITS, GTIN14_LEN};

// =============================================================================
// Product Record
// =============================================================================

/// A catalog entry as supplied by the catalog collaborator.
///
/// `primary_code` is the identity key: the collaborator's upsert is
/// last-write-wins on it, and so is [`MasterIndex`](crate::MasterIndex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Identity key, usually a GTIN as printed on the pack.
    #[serde(alias = "code")]
    pub primary_code: String,

    /// Name shown to the operator.
    #[serde(alias = "name", default)]
    pub display_name: String,

    /// Optional alias such as an in-house SKU.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_code: Option<String>,
}

impl ProductRecord {
    /// Creates a record without a secondary code.
    pub fn new(primary_code: impl Into<String>, display_name: impl Into<String>) -> Self {
        ProductRecord {
            primary_code: primary_code.into(),
            display_name: display_name.into(),
            secondary_code: None,
        }
    }

    /// Attaches a secondary code (SKU) to the record.
    pub fn with_secondary_code(mut self, code: impl Into<String>) -> Self {
        self.secondary_code = Some(code.into());
        self
    }

    /// The secondary code, trimmed, if it carries anything.
    pub fn secondary_code(&self) -> Option<&str> {
        self.secondary_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

// =============================================================================
// Decoded Barcode
// =============================================================================

/// Which recognizer produced a [`DecodedBarcode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeFormat {
    /// `(01)...(17)...(10)...` human-readable AI syntax.
    Parenthesized,
    /// `01...17...10...` raw AI syntax as transmitted by scanners.
    Concatenated,
    /// 8 to 14 digits with no AI structure.
    PlainNumeric,
    /// Nothing recognized; every field is empty.
    #[default]
    Unrecognized,
}

/// The structured reading of one raw scan.
///
/// ## Invariants
/// - `gtin14` is empty or exactly 14 digits
/// - `gtin13` is empty when `gtin14` is empty
/// - `quantity` is at least 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DecodedBarcode {
    pub gtin14: String,
    pub gtin13: String,
    pub batch: Option<String>,
    pub serial: Option<String>,
    pub quantity: u32,
    #[ts(as = "Option<String>")]
    pub expiry: Option<NaiveDate>,
    pub is_structured: bool,
    pub format: BarcodeFormat,
}

impl Default for DecodedBarcode {
    fn default() -> Self {
        DecodedBarcode {
            gtin14: String::new(),
            gtin13: String::new(),
            batch: None,
            serial: None,
            quantity: 1,
            expiry: None,
            is_structured: false,
            format: BarcodeFormat::Unrecognized,
        }
    }
}

impl DecodedBarcode {
    /// Returns true if a GTIN was extracted.
    #[inline]
    pub fn has_gtin(&self) -> bool {
        self.gtin14.len() == GTIN14_LEN
    }

    /// Sets `gtin14` from up to 14 digits and derives `gtin13`.
    ///
    /// Longer or non-numeric input leaves both fields empty.
    pub(crate) fn set_gtin(&mut self, digits: &str) {
        if digits.is_empty()
            || digits.len() > GTIN14_LEN
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return;
        }
        let padded = format!("{:0>14}", digits);
        self.gtin13 = padded.strip_prefix('0').unwrap_or(&padded).to_string();
        self.gtin14 = padded;
    }
}

// =============================================================================
// Match Result
// =============================================================================

/// The tier that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MatchKind {
    Exact,
    SecondaryCode,
    LastEightDigits,
    Series,
    Name,
    #[default]
    None,
}

impl MatchKind {
    /// Returns true for the tiers that identify a code unambiguously.
    pub fn is_exact_family(&self) -> bool {
        matches!(
            self,
            MatchKind::Exact | MatchKind::SecondaryCode | MatchKind::LastEightDigits
        )
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::Exact => write!(f, "exact"),
            MatchKind::SecondaryCode => write!(f, "secondary_code"),
            MatchKind::LastEightDigits => write!(f, "last_eight_digits"),
            MatchKind::Series => write!(f, "series"),
            MatchKind::Name => write!(f, "name"),
            MatchKind::None => write!(f, "none"),
        }
    }
}

/// Outcome of the tiered matcher.
///
/// `product` is set only when exactly one product was identified. Tiers that
/// can return several products (series) list all of them in `candidates`
/// rather than picking one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub product: Option<ProductRecord>,
    pub kind: MatchKind,
    pub candidates: Vec<ProductRecord>,
}

impl MatchResult {
    /// No tier matched.
    pub fn none() -> Self {
        MatchResult::default()
    }

    /// A single product identified by `kind`.
    pub fn single(kind: MatchKind, product: ProductRecord) -> Self {
        MatchResult {
            product: Some(product.clone()),
            kind,
            candidates: vec![product],
        }
    }

    /// One or more products from a multi-result tier.
    pub fn many(kind: MatchKind, candidates: Vec<ProductRecord>) -> Self {
        if candidates.is_empty() {
            return MatchResult::none();
        }
        let product = match candidates.as_slice() {
            [only] => Some(only.clone()),
            _ => None,
        };
        MatchResult {
            product,
            kind,
            candidates,
        }
    }

    /// Returns true if any tier matched.
    #[inline]
    pub fn is_match(&self) -> bool {
        self.kind != MatchKind::None
    }
}

// =============================================================================
// Match Options
// =============================================================================

/// Caller-supplied caps for matching and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Maximum name-search results.
    pub result_limit: usize,
    /// Maximum series (prefix) matches.
    pub series_limit: usize,
    /// Minimum digits on both sides of a prefix comparison.
    pub series_min_digits: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            result_limit: DEFAULT_RESULT_LIMIT,
            series_limit: DEFAULT_RESULT_LIMIT,
            series_min_digits: DEFAULT_SERIES_MIN_DIGITS,
        }
    }
}

// =============================================================================
// Smart Match
// =============================================================================

/// The tag collaborators branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SmartMatchKind {
    ExactBarcode,
    SeriesBarcode,
    Name,
    NoMatch,
}

/// Unified result of [`smart_match`](crate::dispatch::smart_match).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SmartMatch {
    #[serde(rename = "type")]
    pub kind: SmartMatchKind,
    pub results: Vec<ProductRecord>,
    pub match_kind: MatchKind,
}

impl SmartMatch {
    /// The empty `NoMatch` outcome.
    pub fn no_match() -> Self {
        SmartMatch {
            kind: SmartMatchKind::NoMatch,
            results: Vec::new(),
            match_kind: MatchKind::None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
