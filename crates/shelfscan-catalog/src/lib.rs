//! # shelfscan-catalog: Index Handle & Configuration
//!
//! The stateful layer between collaborators and the pure core: it owns the
//! current [`MasterIndex`](shelfscan_core::MasterIndex) version, loads
//! catalogs and configuration, and logs what it does.
//!
//! ## Module Organization
//! - [`state`] - `CatalogIndex`, the atomically swapped index handle
//! - [`config`] - `ScanConfig` (TOML file + environment overrides)
//! - [`source`] - Catalog JSON loading
//! - [`scan`] - Decode + expiry in one report
//! - [`error`] - Catalog error types
//!
//! ## Example
//! ```rust
//! use shelfscan_catalog::{CatalogIndex, ScanConfig};
//! use shelfscan_core::{ProductRecord, SmartMatchKind};
//!
//! let config = ScanConfig::default();
//! let index = CatalogIndex::new();
//! index.rebuild(&[ProductRecord::new("06291109120100", "Panadol")]).unwrap();
//!
//! let outcome = index.smart_match("062911091201", &config.match_options()).unwrap();
//! assert_eq!(outcome.kind, SmartMatchKind::SeriesBarcode);
//! ```

pub mod config;
pub mod error;
pub mod scan;
pub mod source;
pub mod state;

pub use config::ScanConfig;
pub use error::{CatalogError, CatalogResult};
pub use scan::{scan_report, ScanReport};
pub use source::{load_catalog, parse_catalog};
pub use state::CatalogIndex;
