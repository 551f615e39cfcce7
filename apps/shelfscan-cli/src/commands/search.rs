//! Search command - rank catalog products by name.

use std::path::PathBuf;

use clap::Args;

use shelfscan_catalog::ScanConfig;

use super::open_catalog;

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Catalog file (JSON array of {code, name, secondaryCode?})
    #[arg(long)]
    catalog: PathBuf,

    /// Maximum results (default from config)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Free-text query
    query: String,
}

pub fn run(args: SearchArgs, settings: &ScanConfig) -> anyhow::Result<()> {
    let limit = args.limit.unwrap_or(settings.matching.result_limit);
    shelfscan_core::validation::validate_limit("limit", limit)?;

    let index = open_catalog(&args.catalog)?;
    let hits = index.search_names(&args.query, limit)?;
    crate::print_json(&hits)
}
