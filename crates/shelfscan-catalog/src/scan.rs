//! # Scan Report
//!
//! Decodes a raw scan and resolves its expiry in one step, the shape a
//! rendering collaborator shows next to a scanned pack.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shelfscan_core::expiry::resolve_expiry;
use shelfscan_core::gs1::decode;
use shelfscan_core::{DecodedBarcode, ExpiryInfo, ExpiryPolicy};

/// A decoded scan together with its freshness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub decoded: DecodedBarcode,
    pub expiry: ExpiryInfo,
}

/// Decodes `raw` and classifies its expiry date against `today`.
pub fn scan_report(raw: &str, today: NaiveDate, policy: &ExpiryPolicy) -> ScanReport {
    let decoded = decode(raw);
    let expiry = resolve_expiry(decoded.expiry, today, policy);
    ScanReport { decoded, expiry }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shelfscan_core::ExpiryStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_structured_scan_report() {
        let report = scan_report("(01)06291109120100(17)250131(10)L123", today(), &ExpiryPolicy::default());
        assert_eq!(report.decoded.gtin14, "06291109120100");
        assert_eq!(report.decoded.batch.as_deref(), Some("L123"));
        assert_eq!(report.expiry.status, ExpiryStatus::Expiring);
        assert_eq!(report.expiry.display, "31 Jan 2025");
    }

    #[test]
    fn test_plain_scan_has_unknown_expiry() {
        let report = scan_report("06291109120100", today(), &ExpiryPolicy::default());
        assert_eq!(report.expiry.status, ExpiryStatus::Unknown);
        assert_eq!(report.expiry.display, "Unknown");
    }
}
