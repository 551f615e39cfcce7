//! # Name Search
//!
//! Ranks catalog products against a free-text query.
//!
//! ## Scoring
//! ```text
//!   3  name equals query            (uppercased, whitespace collapsed)
//!   2  name contains the phrase     (as typed, whitespace collapsed)
//!   1  name contains every token    (uppercased)
//!   -  excluded
//! ```
//!
//! The phrase check compares the query as the operator typed it, so a
//! lowercase query over an uppercase catalog only reaches score 1. Ties
//! keep catalog order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::ProductRecord;

/// A product together with its relevance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProduct {
    pub product: ProductRecord,
    pub score: u8,
}

/// Uppercases and collapses runs of whitespace to a single space.
pub fn normalize(text: &str) -> String {
    collapse_whitespace(&text.to_uppercase())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Relevance of `name` for a query, or `None` when it does not match.
fn score_name(name: &str, phrase: &str, normalized_query: &str, tokens: &[&str]) -> Option<u8> {
    let normalized_name = normalize(name);

    if normalized_name == normalized_query {
        return Some(3);
    }
    if collapse_whitespace(name).contains(phrase) {
        return Some(2);
    }
    if tokens.iter().all(|token| normalized_name.contains(token)) {
        return Some(1);
    }
    None
}

/// Scores every product in `catalog` against `query`.
///
/// Returns at most `limit` products, best score first. A blank query
/// matches nothing.
///
/// ## Example
/// ```rust
/// use shelfscan_core::{search::match_by_name, ProductRecord};
///
/// let catalog = vec![
///     ProductRecord::new("1", "PANADOL BABY"),
///     ProductRecord::new("2", "PANADOL EXTRA"),
/// ];
/// let hits = match_by_name(&catalog, "panadol", 10);
/// assert_eq!(hits.len(), 2);
/// assert_eq!(hits[0].product.display_name, "PANADOL BABY");
/// ```
pub fn match_by_name(catalog: &[ProductRecord], query: &str, limit: usize) -> Vec<ScoredProduct> {
    let phrase = collapse_whitespace(query);
    if phrase.is_empty() || limit == 0 {
        return Vec::new();
    }

    let normalized_query = normalize(query);
    let tokens = normalized_query.split(' ').collect::<Vec<_>>();

    let mut hits = catalog
        .iter()
        .filter_map(|product| {
            score_name(&product.display_name, &phrase, &normalized_query, &tokens).map(|score| {
                ScoredProduct {
                    product: product.clone(),
                    score,
                }
            })
        })
        .collect::<Vec<_>>();

    // sort_by is stable: equal scores stay in catalog order
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(limit);
    hits
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog(names: &[&str]) -> Vec<ProductRecord> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| ProductRecord::new(i.to_string(), *name))
            .collect()
    }

    fn names_and_scores(hits: &[ScoredProduct]) -> Vec<(&str, u8)> {
        hits.iter()
            .map(|hit| (hit.product.display_name.as_str(), hit.score))
            .collect()
    }

    #[test]
    fn test_lowercase_query_keeps_catalog_order() {
        let hits = match_by_name(&catalog(&["PANADOL BABY", "PANADOL EXTRA"]), "panadol", 10);
        assert_eq!(
            names_and_scores(&hits),
            vec![("PANADOL BABY", 1), ("PANADOL EXTRA", 1)]
        );
    }

    #[test]
    fn test_scores_rank_descending() {
        let products = catalog(&["Panadol Extra", "PANADOL", "Extra Strong Panadol", "Brufen"]);
        let hits = match_by_name(&products, "Panadol", 10);
        assert_eq!(
            names_and_scores(&hits),
            vec![
                ("PANADOL", 3),
                ("Panadol Extra", 2),
                ("Extra Strong Panadol", 2),
            ]
        );
    }

    #[test]
    fn test_every_token_must_appear() {
        let products = catalog(&["PANADOL EXTRA 500MG", "PANADOL BABY", "EXTRA CARE"]);
        let hits = match_by_name(&products, "extra  panadol", 10);
        assert_eq!(names_and_scores(&hits), vec![("PANADOL EXTRA 500MG", 1)]);
    }

    #[test]
    fn test_exact_match_ignores_case_and_spacing() {
        let hits = match_by_name(&catalog(&["Panadol  Extra"]), " panadol extra ", 10);
        assert_eq!(hits[0].score, 3);
    }

    #[test]
    fn test_limit_and_blank_query() {
        let products = catalog(&["A ONE", "A TWO", "A THREE"]);
        assert_eq!(match_by_name(&products, "a", 2).len(), 2);
        assert!(match_by_name(&products, "   ", 10).is_empty());
        assert!(match_by_name(&products, "a", 0).is_empty());
        assert!(match_by_name(&products, "zzz", 10).is_empty());
    }
}
