//! Config command - show or save the effective configuration.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use shelfscan_catalog::ScanConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    /// Write the effective configuration to the config file
    #[arg(long)]
    save: bool,
}

pub fn run(args: ConfigArgs, settings: &ScanConfig, path: Option<PathBuf>) -> anyhow::Result<()> {
    if args.save {
        // An unreadable file must not be replaced by the defaults it fell back to.
        let strict = ScanConfig::load(path.clone()).context("Refusing to save over an invalid config file")?;
        let written = strict.save(path)?;
        eprintln!("Saved configuration to {}", written.display());
        print!("{}", strict.to_toml()?);
        return Ok(());
    }

    print!("{}", settings.to_toml()?);
    Ok(())
}
