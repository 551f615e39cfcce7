//! # Product Matcher
//!
//! Resolves a scan to a catalog product through ordered strategies.
//!
//! ## Tiers (first success wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Probe { raw: "062911091201", decoded: DecodedBarcode }                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Exact            gtin14, gtin13, digits(raw), each zero-stripped   │
//! │       │ miss                                                            │
//! │       ▼                                                                 │
//! │  2. SecondaryCode    raw in by_secondary_code                          │
//! │       │ miss                                                            │
//! │       ▼                                                                 │
//! │  3. LastEightDigits  gtin14[6..] in multimap; exactly one candidate    │
//! │       │ miss or ambiguous                                               │
//! │       ▼                                                                 │
//! │  4. Series           raw is prefix of a code, or a code is prefix of   │
//! │       │ miss         raw (scanner truncation / padding)                 │
//! │       ▼                                                                 │
//! │  5. None                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ambiguity is never resolved by picking: the last-eight tier fails when
//! the suffix is shared, and the series tier returns every hit up to the cap.

use crate::gs1::decode;
use crate::index::{digits_only, last_eight, MasterIndex};
use crate::types::{DecodedBarcode, MatchKind, MatchOptions, MatchResult};

/// Shortest zero-stripped key tried by the exact tier.
const MIN_STRIPPED_DIGITS: usize = 5;

// =============================================================================
// Probe
// =============================================================================

/// A raw input together with its decoded reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe<'a> {
    /// The input, trimmed.
    pub raw: &'a str,
    pub decoded: DecodedBarcode,
}

impl<'a> Probe<'a> {
    /// Decodes `raw` once for every tier.
    pub fn new(raw: &'a str) -> Self {
        let raw = raw.trim();
        Probe {
            raw,
            decoded: decode(raw),
        }
    }

    /// Pairs `raw` with a reading the caller already has.
    pub fn from_decoded(raw: &'a str, decoded: DecodedBarcode) -> Self {
        Probe {
            raw: raw.trim(),
            decoded,
        }
    }

    /// True when the raw input is digits only and carries no AI structure.
    pub fn is_plain_numeric(&self) -> bool {
        !self.decoded.is_structured
            && !self.raw.is_empty()
            && self.raw.bytes().all(|b| b.is_ascii_digit())
    }
}

// =============================================================================
// Tier Pipeline
// =============================================================================

/// One matching strategy.
pub type Tier = fn(&MasterIndex, &Probe<'_>, &MatchOptions) -> Option<MatchResult>;

/// Every tier, in priority order.
pub const TIERS: [Tier; 4] = [match_exact, match_secondary_code, match_last_eight, match_series];

/// The tiers that identify a single product by code.
pub const EXACT_FAMILY: [Tier; 3] = [match_exact, match_secondary_code, match_last_eight];

/// Runs `tiers` in order and returns the first success.
pub fn run_tiers(index: &MasterIndex, probe: &Probe<'_>, options: &MatchOptions, tiers: &[Tier]) -> MatchResult {
    tiers
        .iter()
        .find_map(|tier| tier(index, probe, options))
        .unwrap_or_else(MatchResult::none)
}

/// Decodes `raw` and runs the full tier pipeline.
///
/// ## Example
/// ```rust
/// use shelfscan_core::{matcher, MasterIndex, MatchKind, MatchOptions, ProductRecord};
///
/// let index = MasterIndex::build(&[ProductRecord::new("06291109120100", "Panadol")]);
/// let result = matcher::identify(&index, "(01)06291109120100(17)250131", &MatchOptions::default());
/// assert_eq!(result.kind, MatchKind::Exact);
/// ```
pub fn identify(index: &MasterIndex, raw: &str, options: &MatchOptions) -> MatchResult {
    run_tiers(index, &Probe::new(raw), options, &TIERS)
}

/// Runs the full tier pipeline over an already decoded barcode.
pub fn identify_decoded(
    index: &MasterIndex,
    raw: &str,
    decoded: DecodedBarcode,
    options: &MatchOptions,
) -> MatchResult {
    run_tiers(index, &Probe::from_decoded(raw, decoded), options, &TIERS)
}

// =============================================================================
// Tier 1: Exact
// =============================================================================

/// Keys tried by the exact tier, in order.
pub fn exact_keys(probe: &Probe<'_>) -> Vec<String> {
    let base = [
        probe.decoded.gtin14.clone(),
        probe.decoded.gtin13.clone(),
        digits_only(probe.raw),
    ];

    let stripped = base
        .iter()
        .map(|key| key.trim_start_matches('0'))
        .filter(|key| key.len() >= MIN_STRIPPED_DIGITS)
        .map(str::to_string)
        .collect::<Vec<_>>();

    base.into_iter()
        .chain(stripped)
        .filter(|key| !key.is_empty())
        .collect()
}

pub fn match_exact(index: &MasterIndex, probe: &Probe<'_>, _options: &MatchOptions) -> Option<MatchResult> {
    exact_keys(probe)
        .iter()
        .find_map(|key| index.lookup_exact(key))
        .map(|product| MatchResult::single(MatchKind::Exact, product.clone()))
}

// =============================================================================
// Tier 2: Secondary Code
// =============================================================================

pub fn match_secondary_code(
    index: &MasterIndex,
    probe: &Probe<'_>,
    _options: &MatchOptions,
) -> Option<MatchResult> {
    if probe.raw.is_empty() {
        return None;
    }
    index
        .lookup_secondary(probe.raw)
        .map(|product| MatchResult::single(MatchKind::SecondaryCode, product.clone()))
}

// =============================================================================
// Tier 3: Last Eight Digits
// =============================================================================

/// Succeeds only when exactly one product shares the GTIN's last 8 digits.
pub fn match_last_eight(
    index: &MasterIndex,
    probe: &Probe<'_>,
    _options: &MatchOptions,
) -> Option<MatchResult> {
    if !probe.decoded.has_gtin() {
        return None;
    }

    match index.lookup_last_eight(&last_eight(&probe.decoded.gtin14)).as_slice() {
        [only] => Some(MatchResult::single(MatchKind::LastEightDigits, (*only).clone())),
        _ => None,
    }
}

// =============================================================================
// Tier 4: Series
// =============================================================================

/// Prefix match in either direction for plain numeric input.
///
/// Both the input and each catalog code must have at least
/// `options.series_min_digits` digits. Hits come back in catalog order,
/// capped at `options.series_limit`.
pub fn match_series(index: &MasterIndex, probe: &Probe<'_>, options: &MatchOptions) -> Option<MatchResult> {
    if !probe.is_plain_numeric() || probe.raw.len() < options.series_min_digits {
        return None;
    }

    let input = probe.raw;
    let hits = index
        .numeric_codes()
        .filter(|(code, _)| code.len() >= options.series_min_digits)
        .filter(|(code, _)| code.starts_with(input) || input.starts_with(code))
        .map(|(_, product)| product.clone())
        .take(options.series_limit)
        .collect::<Vec<_>>();

    (!hits.is_empty()).then(|| MatchResult::many(MatchKind::Series, hits))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductRecord;
    use pretty_assertions::assert_eq;

    fn panadol_index() -> MasterIndex {
        MasterIndex::build(&[ProductRecord::new("06291109120100", "Panadol")])
    }

    fn opts() -> MatchOptions {
        MatchOptions::default()
    }

    #[test]
    fn test_exact_match() {
        let index = panadol_index();
        let result = identify(&index, "06291109120100", &opts());
        assert_eq!(result.kind, MatchKind::Exact);
        assert_eq!(result.product.unwrap().display_name, "Panadol");
    }

    #[test]
    fn test_exact_match_without_leading_zero() {
        let result = identify(&panadol_index(), "6291109120100", &opts());
        assert_eq!(result.kind, MatchKind::Exact);
    }

    #[test]
    fn test_exact_match_from_structured_scan() {
        let result = identify(&panadol_index(), "01062911091201001725013110AB1", &opts());
        assert_eq!(result.kind, MatchKind::Exact);
    }

    #[test]
    fn test_identify_decoded_reuses_reading() {
        let decoded = decode("(01)06291109120100(17)250131");
        let result = identify_decoded(&panadol_index(), "(01)06291109120100(17)250131", decoded, &opts());
        assert_eq!(result.kind, MatchKind::Exact);
        assert!(result.kind.is_exact_family());
    }

    #[test]
    fn test_exact_keys_skip_short_stripped_forms() {
        let probe = Probe::new("00001234");
        let keys = exact_keys(&probe);
        assert!(!keys.contains(&"1234".to_string()));

        let probe = Probe::new("00012345");
        assert!(exact_keys(&probe).contains(&"12345".to_string()));
    }

    #[test]
    fn test_secondary_code_match() {
        let index = MasterIndex::build(&[
            ProductRecord::new("06291109120100", "Panadol").with_secondary_code("PAN-500")
        ]);
        let result = identify(&index, " PAN-500 ", &opts());
        assert_eq!(result.kind, MatchKind::SecondaryCode);
        assert_eq!(result.product.unwrap().display_name, "Panadol");
    }

    #[test]
    fn test_last_eight_unique() {
        let index = MasterIndex::build(&[ProductRecord::new("05000009120100", "Suffix")]);
        let result = identify(&index, "06291109120100", &opts());
        assert_eq!(result.kind, MatchKind::LastEightDigits);
        assert_eq!(result.product.unwrap().display_name, "Suffix");
    }

    #[test]
    fn test_last_eight_ambiguous_is_no_match() {
        let index = MasterIndex::build(&[
            ProductRecord::new("05000009120100", "A"),
            ProductRecord::new("07000009120100", "B"),
        ]);
        let probe = Probe::new("06291109120100");
        assert_eq!(match_last_eight(&index, &probe, &opts()), None);

        let result = identify(&index, "06291109120100", &opts());
        assert_eq!(result.kind, MatchKind::None);
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn test_series_prefix_of_catalog_code() {
        let result = identify(&panadol_index(), "062911091201", &opts());
        assert_eq!(result.kind, MatchKind::Series);
        assert_eq!(result.candidates[0].display_name, "Panadol");
        assert_eq!(result.product.unwrap().display_name, "Panadol");
    }

    #[test]
    fn test_series_catalog_code_is_prefix_of_input() {
        let index = MasterIndex::build(&[ProductRecord::new("62911091", "Short code")]);
        let probe = Probe::new("629110912345");
        let result = match_series(&index, &probe, &opts()).unwrap();
        assert_eq!(result.candidates.len(), 1);
    }

    #[test]
    fn test_series_returns_all_candidates_up_to_cap() {
        let catalog: Vec<_> = (0..15)
            .map(|i| ProductRecord::new(format!("629110912{:02}", i), format!("Item {}", i)))
            .collect();
        let index = MasterIndex::build(&catalog);

        let result = identify(&index, "629110912", &opts());
        assert_eq!(result.kind, MatchKind::Series);
        assert_eq!(result.product, None);
        assert_eq!(result.candidates.len(), 10);
        assert_eq!(result.candidates[0].display_name, "Item 0");

        let capped = MatchOptions {
            series_limit: 3,
            ..opts()
        };
        assert_eq!(identify(&index, "629110912", &capped).candidates.len(), 3);
    }

    #[test]
    fn test_series_accepts_short_fragments_by_default() {
        let result = identify(&panadol_index(), "06291", &opts());
        assert_eq!(result.kind, MatchKind::Series);

        let index = MasterIndex::build(&[ProductRecord::new("12345", "Short")]);
        let result = identify(&index, "1234567890", &opts());
        assert_eq!(result.kind, MatchKind::Series);
        assert_eq!(result.candidates[0].display_name, "Short");
    }

    #[test]
    fn test_series_min_digits_filters_short_noise() {
        let strict = MatchOptions {
            series_min_digits: 6,
            ..opts()
        };
        let probe = Probe::new("0629");
        assert_eq!(match_series(&panadol_index(), &probe, &strict), None);

        let index = MasterIndex::build(&[ProductRecord::new("12345", "Short")]);
        let probe = Probe::new("1234567890");
        assert_eq!(match_series(&index, &probe, &strict), None);
    }

    #[test]
    fn test_series_skips_structured_input() {
        let probe = Probe::new("01062911091201001725013110AB1");
        assert_eq!(match_series(&panadol_index(), &probe, &opts()), None);
    }

    #[test]
    fn test_no_match() {
        let result = identify(&panadol_index(), "99999999", &opts());
        assert_eq!(result, MatchResult::none());
        assert!(!result.is_match());
    }

    #[test]
    fn test_rebuild_gives_identical_outcomes() {
        let catalog = vec![
            ProductRecord::new("06291109120100", "Panadol").with_secondary_code("PAN"),
            ProductRecord::new("05000009120100", "A"),
            ProductRecord::new("07000009120100", "B"),
        ];
        let first = MasterIndex::build(&catalog);
        let second = MasterIndex::build(&catalog);

        for query in ["06291109120100", "PAN", "062911091201", "09120100", "nothing"] {
            assert_eq!(
                identify(&first, query, &opts()),
                identify(&second, query, &opts()),
                "query {}",
                query
            );
        }
    }
}
