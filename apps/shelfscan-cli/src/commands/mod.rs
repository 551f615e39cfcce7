//! Subcommand implementations.

pub mod config;
pub mod decode;
pub mod identify;
pub mod lookup;
pub mod search;

use std::path::Path;

use anyhow::Context;
use shelfscan_catalog::{load_catalog, CatalogIndex};
use tracing::info;

/// Loads a catalog file and builds the index handle over it.
pub(crate) fn open_catalog(path: &Path) -> anyhow::Result<CatalogIndex> {
    let records = load_catalog(path)?;
    let index = CatalogIndex::new();
    let report = index
        .rebuild(&records)
        .with_context(|| format!("building index from {}", path.display()))?;

    info!(
        path = %path.display(),
        indexed = report.indexed,
        rejected = report.rejected,
        "Catalog loaded"
    );
    Ok(index)
}
