//! # Master Index
//!
//! Read-mostly lookup structures built from a flat product catalog.
//!
//! ## Sub-Indices
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 ProductRecord { "6291109120100", "Panadol", "PAN-1" }   │
//! │                                   │                                     │
//! │              normalize: digits only ──► "6291109120100"                 │
//! │                                   │                                     │
//! │   exact_by_code                   │    by_last_eight      by_secondary  │
//! │   ─────────────                   │    ─────────────      ────────────  │
//! │   "6291109120100"  ─┐             │    "09120100" ─► [0]  "PAN-1" ─► 0  │
//! │   "06291109120100" ─┼─► 0         │    (multimap, never                 │
//! │   "PAN-1"          ─┘             │     overwritten)                    │
//! │                                                                         │
//! │   Aliases per code: normalized, 14-digit padded, padded minus one '0'. │
//! │   Catalog sources and scanners disagree on left-padding.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Versions
//! A `MasterIndex` is never mutated once built. [`MasterIndex::build`]
//! produces a fresh value from the full catalog; [`MasterIndex::upserted`]
//! clones the current value, patches one record in all three sub-indices
//! and returns the next version. Whoever holds the live index swaps the
//! whole value, so readers only ever see complete versions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::ProductRecord;
use crate::validation::validate_record;
use crate::GTIN14_LEN;

// =============================================================================
// Build Report
// =============================================================================

/// Counts from a full rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    /// Records supplied by the catalog.
    pub total: usize,
    /// Records registered under at least one code.
    pub indexed: usize,
    /// Records with neither a numeric primary code nor a secondary code.
    pub dropped: usize,
    /// Records without a primary code at all.
    pub rejected: usize,
    /// Records replaced by a later record with the same primary code.
    pub duplicates: usize,
}

// =============================================================================
// Master Index
// =============================================================================

/// Immutable lookup structure over one catalog version.
///
/// Products are stored once, in catalog order; the sub-indices hold
/// positions into that list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterIndex {
    version: u64,
    products: Vec<ProductRecord>,
    /// Digits-only primary code per product, parallel to `products`.
    normalized: Vec<String>,
    by_primary: HashMap<String, usize>,
    exact_by_code: HashMap<String, usize>,
    by_last_eight: HashMap<String, Vec<usize>>,
    by_secondary_code: HashMap<String, usize>,
}

impl MasterIndex {
    /// Builds an index from the full catalog.
    ///
    /// ## Example
    /// ```rust
    /// use shelfscan_core::{MasterIndex, ProductRecord};
    ///
    /// let index = MasterIndex::build(&[ProductRecord::new("6291109120100", "Panadol")]);
    /// assert!(index.lookup_exact("06291109120100").is_some());
    /// assert!(index.lookup_exact("6291109120100").is_some());
    /// ```
    pub fn build(records: &[ProductRecord]) -> Self {
        Self::build_with_report(records).0
    }

    /// Builds an index and reports what happened to each record.
    ///
    /// Duplicate primary codes collapse last-write-wins; the surviving
    /// record keeps the catalog position of the first occurrence.
    pub fn build_with_report(records: &[ProductRecord]) -> (Self, BuildReport) {
        let mut index = MasterIndex {
            version: 1,
            ..MasterIndex::default()
        };
        let mut report = BuildReport {
            total: records.len(),
            ..BuildReport::default()
        };

        for record in records {
            let key = record.primary_code.trim();
            if key.is_empty() {
                report.rejected += 1;
                continue;
            }

            match index.by_primary.get(key).copied() {
                Some(pos) => {
                    index.products[pos] = record.clone();
                    report.duplicates += 1;
                }
                None => {
                    index.by_primary.insert(key.to_string(), index.products.len());
                    index.products.push(record.clone());
                }
            }
        }

        index.normalized = index
            .products
            .iter()
            .map(|p| digits_only(&p.primary_code))
            .collect();

        for pos in 0..index.products.len() {
            if index.register(pos) {
                report.indexed += 1;
            } else {
                report.dropped += 1;
            }
        }

        (index, report)
    }

    /// Returns the next version with `record` inserted or replaced.
    ///
    /// The record is validated first; a rejected edit returns an error and
    /// `self` is left as it was.
    pub fn upserted(&self, record: ProductRecord) -> CoreResult<Self> {
        validate_record(&record).map_err(|source| CoreError::InvalidRecord {
            code: record.primary_code.clone(),
            source,
        })?;

        let mut next = self.clone();
        let key = record.primary_code.trim().to_string();
        let normalized = digits_only(&record.primary_code);

        let (pos, mut touched) = match next.by_primary.get(&key).copied() {
            Some(pos) => {
                let previous = next.exact_claims(pos);
                next.detach_last_eight(pos);
                next.products[pos] = record;
                next.normalized[pos] = normalized;
                (pos, previous)
            }
            None => {
                next.products.push(record);
                next.normalized.push(normalized);
                let pos = next.products.len() - 1;
                next.by_primary.insert(key, pos);
                (pos, Vec::new())
            }
        };

        touched.extend(next.exact_claims(pos));
        touched.sort();
        touched.dedup();

        next.attach_last_eight(pos);
        next.resolve_keys(&touched);
        next.version = self.version + 1;
        Ok(next)
    }

    /// Returns the same index stamped with `version`.
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Adds product `pos` to every sub-index. Returns false if it
    /// contributed no code.
    fn register(&mut self, pos: usize) -> bool {
        let mut contributed = false;
        let normalized = &self.normalized[pos];

        if !normalized.is_empty() {
            for alias in code_aliases(normalized) {
                self.exact_by_code.insert(alias, pos);
            }
            self.by_last_eight
                .entry(last_eight(normalized))
                .or_default()
                .push(pos);
            contributed = true;
        }

        if let Some(code) = self.products[pos].secondary_code() {
            self.by_secondary_code.insert(code.to_string(), pos);
            self.exact_by_code.insert(code.to_string(), pos);
            contributed = true;
        }

        contributed
    }

    /// Exact-map keys product `pos` writes, in registration order.
    fn exact_claims(&self, pos: usize) -> Vec<String> {
        let normalized = &self.normalized[pos];
        let mut keys = Vec::new();

        if !normalized.is_empty() {
            keys.extend(code_aliases(normalized));
        }
        if let Some(code) = self.products[pos].secondary_code() {
            keys.push(code.to_string());
        }
        keys
    }

    /// Re-resolves `keys` in the exact and secondary maps.
    ///
    /// The owner of a key is the last product in catalog order that claims
    /// it, which is what a full build would have left behind.
    fn resolve_keys(&mut self, keys: &[String]) {
        for key in keys {
            let exact_owner = (0..self.products.len())
                .rev()
                .find(|&pos| self.exact_claims(pos).contains(key));
            match exact_owner {
                Some(pos) => self.exact_by_code.insert(key.clone(), pos),
                None => self.exact_by_code.remove(key),
            };

            let secondary_owner = (0..self.products.len())
                .rev()
                .find(|&pos| self.products[pos].secondary_code() == Some(key.as_str()));
            match secondary_owner {
                Some(pos) => self.by_secondary_code.insert(key.clone(), pos),
                None => self.by_secondary_code.remove(key),
            };
        }
    }

    fn detach_last_eight(&mut self, pos: usize) {
        let normalized = &self.normalized[pos];
        if normalized.is_empty() {
            return;
        }

        let suffix = last_eight(normalized);
        if let Some(candidates) = self.by_last_eight.get_mut(&suffix) {
            candidates.retain(|&candidate| candidate != pos);
            if candidates.is_empty() {
                self.by_last_eight.remove(&suffix);
            }
        }
    }

    /// Adds `pos` to its suffix bucket, keeping the bucket in catalog order.
    fn attach_last_eight(&mut self, pos: usize) {
        let normalized = &self.normalized[pos];
        if normalized.is_empty() {
            return;
        }

        let candidates = self.by_last_eight.entry(last_eight(normalized)).or_default();
        let at = candidates.partition_point(|&candidate| candidate < pos);
        candidates.insert(at, pos);
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Looks up any registered code variant or secondary code.
    pub fn lookup_exact(&self, key: &str) -> Option<&ProductRecord> {
        self.exact_by_code.get(key).map(|&pos| &self.products[pos])
    }

    /// Looks up a secondary code (SKU).
    pub fn lookup_secondary(&self, key: &str) -> Option<&ProductRecord> {
        self.by_secondary_code.get(key).map(|&pos| &self.products[pos])
    }

    /// All products whose padded code ends in `suffix`, in catalog order.
    pub fn lookup_last_eight(&self, suffix: &str) -> Vec<&ProductRecord> {
        self.by_last_eight
            .get(suffix)
            .map(|positions| positions.iter().map(|&pos| &self.products[pos]).collect())
            .unwrap_or_default()
    }

    /// Digits-only primary codes paired with their products, in catalog
    /// order. Products without digits are skipped.
    pub fn numeric_codes(&self) -> impl Iterator<Item = (&str, &ProductRecord)> {
        self.normalized
            .iter()
            .zip(&self.products)
            .filter(|(code, _)| !code.is_empty())
            .map(|(code, product)| (code.as_str(), product))
    }

    /// The de-duplicated catalog in its original order.
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    /// Version number, starting at 1 for a fresh build.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Code Normalization
// =============================================================================

/// Strips every non-digit character.
pub fn digits_only(code: &str) -> String {
    code.chars().filter(char::is_ascii_digit).collect()
}

/// Left-pads a digit string to 14 characters. Longer input is unchanged.
pub fn pad_gtin14(digits: &str) -> String {
    format!("{:0>width$}", digits, width = GTIN14_LEN)
}

/// The exact-lookup keys for one normalized code.
fn code_aliases(normalized: &str) -> Vec<String> {
    let padded = pad_gtin14(normalized);
    let mut aliases = vec![normalized.to_string()];

    if let Some(stripped) = padded.strip_prefix('0') {
        aliases.push(stripped.to_string());
    }
    aliases.push(padded);

    aliases.sort();
    aliases.dedup();
    aliases
}

/// Trailing eight digits of the padded code.
pub fn last_eight(normalized: &str) -> String {
    let padded = pad_gtin14(normalized);
    padded[padded.len() - 8..].to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
