//! # Catalog Source
//!
//! Reads the catalog collaborators hand over: a JSON array of
//! `{code, name, secondaryCode?}` objects in catalog order.

use std::path::Path;

use shelfscan_core::ProductRecord;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};

/// Parses a catalog from JSON text.
pub fn parse_catalog(json: &str) -> CatalogResult<Vec<ProductRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses a catalog file.
pub fn load_catalog(path: &Path) -> CatalogResult<Vec<ProductRecord>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CatalogError::CatalogLoadFailed(format!("{}: {}", path.display(), e)))?;
    let records = parse_catalog(&contents)?;
    debug!(?path, records = records.len(), "Catalog file parsed");
    Ok(records)
}
