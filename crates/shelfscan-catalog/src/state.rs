//! # Catalog Index State
//!
//! Shared handle to the current [`MasterIndex`] version.
//!
//! ## Thread Safety
//! The handle is `RwLock<Option<Arc<MasterIndex>>>` plus a writer `Mutex`:
//! 1. Rebuild and upsert hold the writer mutex from snapshot to swap, so
//!    an upsert always patches the version it publishes over
//! 2. The next version is built outside the `RwLock`; its write lock is
//!    held only to swap the `Arc`
//! 3. Readers clone the `Arc` and match against it lock-free
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Index Operations                             │
//! │                                                                         │
//! │  Collaborator Action      Handle Method          Index Change           │
//! │  ───────────────────      ─────────────          ────────────           │
//! │                                                                         │
//! │  Load / import ─────────► rebuild(catalog) ────► new version, swap      │
//! │                                                                         │
//! │  Manual edit ───────────► upsert(record) ──────► patched copy, swap     │
//! │                                                                         │
//! │  Scan / type ───────────► smart_match(input) ──► (read only)            │
//! │                                                                         │
//! │  Before first load ─────► any read ────────────► IndexNotBuilt          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use shelfscan_core::{
    dispatch, matcher, search, BuildReport, MasterIndex, MatchOptions, MatchResult,
    ProductRecord, ScoredProduct, SmartMatch,
};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};

/// Shared, atomically swapped catalog index.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    current: RwLock<Option<Arc<MasterIndex>>>,
    writer: Mutex<()>,
}

impl CatalogIndex {
    /// Creates a handle with no index. Reads fail until [`rebuild`](Self::rebuild).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle already holding an index built from `catalog`.
    pub fn with_catalog(catalog: &[ProductRecord]) -> CatalogResult<Self> {
        let handle = Self::new();
        handle.rebuild(catalog)?;
        Ok(handle)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Rebuilds the index from the full catalog and swaps it in.
    pub fn rebuild(&self, catalog: &[ProductRecord]) -> CatalogResult<BuildReport> {
        let _writer = self.lock_writer()?;
        let (index, report) = MasterIndex::build_with_report(catalog);

        if report.rejected > 0 {
            warn!(rejected = report.rejected, "Skipped records with blank primary code");
        }
        if report.dropped > 0 {
            debug!(dropped = report.dropped, "Records without any code kept for name search only");
        }

        let version = self.swap(index)?;

        info!(
            version,
            total = report.total,
            indexed = report.indexed,
            duplicates = report.duplicates,
            "Catalog index rebuilt"
        );
        Ok(report)
    }

    /// Inserts or replaces one record and swaps in the patched version.
    ///
    /// Fails with [`CatalogError::IndexNotBuilt`] before the first rebuild.
    pub fn upsert(&self, record: ProductRecord) -> CatalogResult<u64> {
        let _writer = self.lock_writer()?;
        let code = record.primary_code.clone();
        let next = self.snapshot()?.upserted(record)?;
        let version = self.swap(next)?;

        info!(code = %code, version, "Catalog record upserted");
        Ok(version)
    }

    fn lock_writer(&self) -> CatalogResult<MutexGuard<'_, ()>> {
        self.writer.lock().map_err(|_| CatalogError::LockPoisoned)
    }

    /// Publishes `index` as the next version and returns its number.
    ///
    /// Callers hold the writer mutex.
    fn swap(&self, index: MasterIndex) -> CatalogResult<u64> {
        let mut guard = self.current.write().map_err(|_| CatalogError::LockPoisoned)?;
        let version = guard.as_ref().map_or(1, |current| current.version() + 1);
        *guard = Some(Arc::new(index.with_version(version)));
        Ok(version)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current index version.
    ///
    /// Fails with [`CatalogError::IndexNotBuilt`] if no catalog was loaded.
    pub fn snapshot(&self) -> CatalogResult<Arc<MasterIndex>> {
        let guard = self.current.read().map_err(|_| CatalogError::LockPoisoned)?;
        guard.as_ref().cloned().ok_or_else(|| {
            warn!("Catalog index used before it was built");
            CatalogError::IndexNotBuilt
        })
    }

    /// Version of the current index, or `None` before the first rebuild.
    pub fn version(&self) -> CatalogResult<Option<u64>> {
        let guard = self.current.read().map_err(|_| CatalogError::LockPoisoned)?;
        Ok(guard.as_ref().map(|index| index.version()))
    }

    /// Returns true once a catalog has been loaded.
    pub fn is_built(&self) -> bool {
        matches!(self.version(), Ok(Some(_)))
    }

    /// Runs the full matcher tier pipeline.
    pub fn identify(&self, raw: &str, options: &MatchOptions) -> CatalogResult<MatchResult> {
        let index = self.snapshot()?;
        Ok(matcher::identify(&index, raw, options))
    }

    /// Scores catalog names against a free-text query.
    pub fn search_names(&self, query: &str, limit: usize) -> CatalogResult<Vec<ScoredProduct>> {
        let index = self.snapshot()?;
        Ok(search::match_by_name(index.products(), query, limit))
    }

    /// Routes arbitrary input through the smart dispatcher.
    pub fn smart_match(&self, input: &str, options: &MatchOptions) -> CatalogResult<SmartMatch> {
        let index = self.snapshot()?;
        let outcome = dispatch::smart_match(&index, input, options);
        debug!(
            version = index.version(),
            kind = ?outcome.kind,
            results = outcome.results.len(),
            "Smart match"
        );
        Ok(outcome)
    }
}
