//! Match command - route input through the smart dispatcher.

use std::path::PathBuf;

use clap::Args;

use shelfscan_catalog::ScanConfig;

use super::open_catalog;

/// Arguments for the match command.
#[derive(Args)]
pub struct MatchArgs {
    /// Catalog file (JSON array of {code, name, secondaryCode?})
    #[arg(long)]
    catalog: PathBuf,

    /// Scanned code or product name
    query: String,
}

pub fn run(args: MatchArgs, settings: &ScanConfig) -> anyhow::Result<()> {
    let index = open_catalog(&args.catalog)?;
    let outcome = index.smart_match(&args.query, &settings.match_options())?;
    crate::print_json(&outcome)
}
