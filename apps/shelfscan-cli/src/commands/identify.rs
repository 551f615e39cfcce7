//! Identify command - run the tiered matcher on a raw scan.
//!
//! Unlike `match`, structured GS1 input such as `(01)...(17)...` goes
//! straight to the matcher instead of the name search.

use std::path::PathBuf;

use clap::Args;

use shelfscan_catalog::ScanConfig;

use super::open_catalog;

/// Arguments for the identify command.
#[derive(Args)]
pub struct IdentifyArgs {
    /// Catalog file (JSON array of {code, name, secondaryCode?})
    #[arg(long)]
    catalog: PathBuf,

    /// Raw scanner output
    raw: String,
}

pub fn run(args: IdentifyArgs, settings: &ScanConfig) -> anyhow::Result<()> {
    let index = open_catalog(&args.catalog)?;
    let result = index.identify(&args.raw, &settings.match_options())?;
    crate::print_json(&result)
}
