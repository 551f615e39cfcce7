//! # Shelfscan CLI
//!
//! Decode GS1 barcodes and resolve scans against a product catalog.
//!
//! ```text
//! shelfscan decode "(01)06291109120100(17)250131(10)L123"
//! shelfscan match --catalog products.json 062911091201
//! shelfscan search --catalog products.json --limit 5 "panadol"
//! shelfscan config --save
//! ```
//!
//! Results are printed as JSON on stdout; logs go to stderr.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use commands::{config, decode, identify, lookup, search};
use shelfscan_catalog::ScanConfig;

/// Decode GS1 barcodes and match them against a product catalog
#[derive(Parser)]
#[command(name = "shelfscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a raw scan and resolve its expiry
    Decode(decode::DecodeArgs),

    /// Match input against a catalog (barcode, series or name)
    #[command(name = "match")]
    Match(lookup::MatchArgs),

    /// Run the tiered barcode matcher on a raw scan
    Identify(identify::IdentifyArgs),

    /// Rank catalog products by name
    Search(search::SearchArgs),

    /// Show or save the effective configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let settings = ScanConfig::load_or_default(cli.config.clone());

    match cli.command {
        Commands::Decode(args) => decode::run(args, &settings),
        Commands::Match(args) => lookup::run(args, &settings),
        Commands::Identify(args) => identify::run(args, &settings),
        Commands::Search(args) => search::run(args, &settings),
        Commands::Config(args) => config::run(args, &settings, cli.config),
    }
}

/// Log filter when neither `RUST_LOG` nor `-v` is given. The `shelfscan`
/// target prefix also covers `shelfscan_catalog`.
const DEFAULT_FILTER: &str = "warn,shelfscan=info";

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - Default: `warn,shelfscan=info`
/// - `RUST_LOG` replaces the default filter
/// - `-v` / `-vv` raise the shelfscan crates to debug / trace
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        1 => EnvFilter::new("info,shelfscan=debug"),
        _ => EnvFilter::new("debug,shelfscan=trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Prints a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
