//! # Smart Dispatcher
//!
//! The single entry point for arbitrary operator input.
//!
//! ## Routing
//! ```text
//!   input (trimmed)
//!     │
//!     ├── digits only? ──► exact family ──hit──► ExactBarcode
//!     │                        │ miss
//!     │                        ▼
//!     │                     series ───────hit──► SeriesBarcode
//!     │                        │ miss
//!     ▼                        ▼
//!   name search ◄──────────────┘
//!     │
//!     ├── hits ──► Name
//!     └── none ──► NoMatch (empty results)
//! ```
//!
//! Collaborators branch on [`SmartMatchKind`]; every input lands on exactly
//! one of the four tags.

use crate::index::MasterIndex;
use crate::matcher::{match_series, run_tiers, Probe, EXACT_FAMILY};
use crate::search::match_by_name;
use crate::types::{MatchKind, MatchOptions, SmartMatch, SmartMatchKind};

/// True when the trimmed input is non-empty and all ASCII digits.
pub fn is_barcode_shaped(input: &str) -> bool {
    let input = input.trim();
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}

/// Classifies `input` and routes it to the matcher or the name search.
pub fn smart_match(index: &MasterIndex, input: &str, options: &MatchOptions) -> SmartMatch {
    let input = input.trim();

    if is_barcode_shaped(input) {
        let probe = Probe::new(input);

        let exact = run_tiers(index, &probe, options, &EXACT_FAMILY);
        if exact.is_match() {
            return SmartMatch {
                kind: SmartMatchKind::ExactBarcode,
                results: exact.candidates,
                match_kind: exact.kind,
            };
        }

        if let Some(series) = match_series(index, &probe, options) {
            return SmartMatch {
                kind: SmartMatchKind::SeriesBarcode,
                results: series.candidates,
                match_kind: MatchKind::Series,
            };
        }
    }

    let hits = match_by_name(index.products(), input, options.result_limit);
    if hits.is_empty() {
        return SmartMatch::no_match();
    }

    SmartMatch {
        kind: SmartMatchKind::Name,
        results: hits.into_iter().map(|hit| hit.product).collect(),
        match_kind: MatchKind::Name,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductRecord;
    use pretty_assertions::assert_eq;

    fn index() -> MasterIndex {
        MasterIndex::build(&[
            ProductRecord::new("06291109120100", "Panadol").with_secondary_code("778899"),
            ProductRecord::new("06291109120117", "Panadol Extra"),
            ProductRecord::new("LOOSE", "Loose Bandage"),
        ])
    }

    #[test]
    fn test_is_barcode_shaped() {
        assert!(is_barcode_shaped(" 0629110912 "));
        assert!(!is_barcode_shaped(""));
        assert!(!is_barcode_shaped("   "));
        assert!(!is_barcode_shaped("(01)06291109120100"));
        assert!(!is_barcode_shaped("PAN-500"));
    }

    #[test]
    fn test_exact_barcode() {
        let outcome = smart_match(&index(), "06291109120100", &MatchOptions::default());
        assert_eq!(outcome.kind, SmartMatchKind::ExactBarcode);
        assert_eq!(outcome.match_kind, MatchKind::Exact);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].display_name, "Panadol");
    }

    #[test]
    fn test_numeric_secondary_code_is_exact_barcode() {
        let outcome = smart_match(&index(), "778899", &MatchOptions::default());
        assert_eq!(outcome.kind, SmartMatchKind::ExactBarcode);
        assert_eq!(outcome.results[0].display_name, "Panadol");
    }

    #[test]
    fn test_series_barcode() {
        let outcome = smart_match(&index(), "0629110912", &MatchOptions::default());
        assert_eq!(outcome.kind, SmartMatchKind::SeriesBarcode);
        assert_eq!(outcome.match_kind, MatchKind::Series);
        let names: Vec<_> = outcome.results.iter().map(|p| p.display_name.as_str()).collect();
        assert_eq!(names, vec!["Panadol", "Panadol Extra"]);
    }

    #[test]
    fn test_short_truncated_scan_is_series_barcode() {
        let outcome = smart_match(&index(), "06291", &MatchOptions::default());
        assert_eq!(outcome.kind, SmartMatchKind::SeriesBarcode);
        assert_eq!(outcome.results.len(), 2);
    }

    #[test]
    fn test_name_fallback() {
        let outcome = smart_match(&index(), "panadol extra", &MatchOptions::default());
        assert_eq!(outcome.kind, SmartMatchKind::Name);
        assert_eq!(outcome.match_kind, MatchKind::Name);
        assert_eq!(outcome.results[0].display_name, "Panadol Extra");
    }

    #[test]
    fn test_records_without_code_are_name_searchable() {
        let outcome = smart_match(&index(), "bandage", &MatchOptions::default());
        assert_eq!(outcome.kind, SmartMatchKind::Name);
        assert_eq!(outcome.results[0].display_name, "Loose Bandage");
    }

    #[test]
    fn test_no_match() {
        let outcome = smart_match(&index(), "xyz999", &MatchOptions::default());
        assert_eq!(outcome, SmartMatch::no_match());

        let outcome = smart_match(&index(), "4444", &MatchOptions::default());
        assert_eq!(outcome.kind, SmartMatchKind::NoMatch);
        assert!(outcome.results.is_empty());
    }
}
