//! Decode command - decode a raw scan and resolve its expiry.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;

use shelfscan_catalog::{scan_report, ScanConfig};

/// Arguments for the decode command.
#[derive(Args)]
pub struct DecodeArgs {
    /// Raw scanner output or typed code
    raw: String,

    /// Reference day for expiry classification (YYYY-MM-DD, default today)
    #[arg(long)]
    today: Option<String>,
}

pub fn run(args: DecodeArgs, settings: &ScanConfig) -> anyhow::Result<()> {
    let today = parse_today(args.today.as_deref())?;
    let report = scan_report(&args.raw, today, &settings.expiry_policy());
    crate::print_json(&report)
}

/// Parses `--today`, falling back to the local calendar day.
pub(crate) fn parse_today(value: Option<&str>) -> anyhow::Result<NaiveDate> {
    match value {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .with_context(|| format!("invalid --today '{}', expected YYYY-MM-DD", text)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_today() {
        assert_eq!(
            parse_today(Some("2025-01-31")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
        assert!(parse_today(Some("31/01/2025")).is_err());
        assert!(parse_today(None).is_ok());
    }
}
