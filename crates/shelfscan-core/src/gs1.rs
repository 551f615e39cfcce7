//! # GS1 Barcode Decoder
//!
//! Parses a raw scan into a [`DecodedBarcode`].
//!
//! ## Recognizers (priority order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        decode(raw)                                      │
//! │                                                                         │
//! │  strip scanner framing: whitespace, "]C1"-style symbology id, lead GS  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. parse_parenthesized   "(01)06291109120100(17)250131(10)AB12"       │
//! │       │ None                                                            │
//! │       ▼                                                                 │
//! │  2. parse_concatenated    "010629110912010017250131 10AB12"            │
//! │       │ None                                                            │
//! │       ▼                                                                 │
//! │  3. parse_plain_numeric   "6291109120100"  (8-14 digits)               │
//! │       │ None                                                            │
//! │       ▼                                                                 │
//! │  DecodedBarcode::default()  (all fields empty, never an error)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concatenated Syntax Heuristic
//! Variable-length fields (10, 21, 30, 37) carry no terminator unless the
//! scanner transmits GS (0x1D). Without GS, the field ends at the next
//! position holding a fixed-length AI followed by a well-formed value:
//!
//! ```text
//!   01 06291109120100 10 AB123 17 250131
//!                        └─┬─┘ └────┬───┘
//!                       batch   first fixed AI token after "10"
//! ```
//!
//! A batch that itself contains such a token (`L17991231`) is cut short at
//! it. The result is deterministic but not always what was printed.

use lazy_static::lazy_static;
use regex::Regex;

use crate::expiry::parse_expiry;
use crate::types::{BarcodeFormat, DecodedBarcode};

/// ASCII group separator, the transmitted form of FNC1.
pub const GROUP_SEPARATOR: char = '\u{1d}';

/// A pure format recognizer.
pub type Recognizer = fn(&str) -> Option<DecodedBarcode>;

/// Recognizers tried by [`decode`], highest priority first.
pub const RECOGNIZERS: [Recognizer; 3] = [parse_parenthesized, parse_concatenated, parse_plain_numeric];

lazy_static! {
    /// One `(AI)value` segment; the value runs to the next `(` or the end.
    static ref AI_SEGMENT: Regex = Regex::new(r"\((\d{2,4})\)([^(]*)").unwrap();

    /// AIM symbology identifier such as `]C1`, `]d2`, `]Q3`, `]E0`.
    static ref SYMBOLOGY_ID: Regex = Regex::new(r"^\][A-Za-z][0-9]").unwrap();
}

// =============================================================================
// Entry Point
// =============================================================================

/// Decodes a raw scanned or typed string.
///
/// Never fails: input no recognizer accepts yields an all-empty record.
///
/// ## Example
/// ```rust
/// use shelfscan_core::gs1::decode;
///
/// let decoded = decode("(01)06291109120100(17)250131(10)AB123");
/// assert_eq!(decoded.gtin14, "06291109120100");
/// assert_eq!(decoded.batch.as_deref(), Some("AB123"));
/// assert!(decoded.is_structured);
///
/// assert!(decode("hello").gtin14.is_empty());
/// ```
pub fn decode(raw: &str) -> DecodedBarcode {
    let payload = strip_framing(raw);

    RECOGNIZERS
        .iter()
        .find_map(|recognize| recognize(payload))
        .unwrap_or_default()
}

/// Removes surrounding whitespace, a symbology identifier and leading GS.
fn strip_framing(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_id = match SYMBOLOGY_ID.find(trimmed) {
        Some(m) => &trimmed[m.end()..],
        None => trimmed,
    };
    without_id.trim_start_matches(GROUP_SEPARATOR)
}

// =============================================================================
// Application Identifiers
// =============================================================================

/// Length rule for an Application Identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldLength {
    Fixed(usize),
    /// Variable, with a maximum length.
    Variable(usize),
}

fn field_length(ai: &str) -> Option<FieldLength> {
    match ai {
        "00" => Some(FieldLength::Fixed(18)),
        "01" | "02" => Some(FieldLength::Fixed(14)),
        "11" | "13" | "15" | "17" => Some(FieldLength::Fixed(6)),
        "10" | "21" => Some(FieldLength::Variable(20)),
        "30" | "37" => Some(FieldLength::Variable(8)),
        _ => None,
    }
}

fn is_date_ai(ai: &str) -> bool {
    matches!(ai, "11" | "13" | "15" | "17")
}

/// Copies one AI's value into the record. Unused AIs are ignored.
fn apply_field(decoded: &mut DecodedBarcode, ai: &str, value: &str) {
    let value = value.trim().trim_matches(GROUP_SEPARATOR);

    match ai {
        "01" if !decoded.has_gtin() => decoded.set_gtin(value),
        "17" => decoded.expiry = parse_expiry(value),
        "10" if !value.is_empty() => decoded.batch = Some(value.to_string()),
        "21" if !value.is_empty() => decoded.serial = Some(value.to_string()),
        "30" | "37" => {
            if let Ok(quantity) = value.parse::<u32>() {
                if quantity > 0 {
                    decoded.quantity = quantity;
                }
            }
        }
        _ => {}
    }
}

fn structured(format: BarcodeFormat) -> DecodedBarcode {
    DecodedBarcode {
        is_structured: true,
        format,
        ..DecodedBarcode::default()
    }
}

// =============================================================================
// Recognizer 1: Parenthesized AI Syntax
// =============================================================================

/// Parses human-readable `(AI)value` syntax.
///
/// Returns `None` unless the input starts with `(` and holds at least one
/// `(AI)` segment.
pub fn parse_parenthesized(input: &str) -> Option<DecodedBarcode> {
    if !input.starts_with('(') {
        return None;
    }

    let mut decoded = structured(BarcodeFormat::Parenthesized);
    let mut segments = 0;

    for caps in AI_SEGMENT.captures_iter(input) {
        segments += 1;
        apply_field(&mut decoded, &caps[1], &caps[2]);
    }

    (segments > 0).then_some(decoded)
}

// =============================================================================
// Recognizer 2: Concatenated AI Syntax
// =============================================================================

/// Parses raw AI syntax as transmitted by a scanner.
///
/// Returns `None` unless the input starts with AI `01` and 14 digits.
/// Parsing stops at the first unknown AI or malformed fixed-length value;
/// fields read up to that point are kept.
pub fn parse_concatenated(input: &str) -> Option<DecodedBarcode> {
    if !input.is_ascii() || input.len() < 16 || !input.starts_with("01") {
        return None;
    }
    if !is_digits(&input[2..16]) {
        return None;
    }

    let mut decoded = structured(BarcodeFormat::Concatenated);
    let bytes = input.as_bytes();
    let mut pos = 0;

    while pos + 2 <= input.len() {
        if bytes[pos] == GROUP_SEPARATOR as u8 {
            pos += 1;
            continue;
        }

        let ai = &input[pos..pos + 2];
        let start = pos + 2;

        let end = match field_length(ai) {
            Some(FieldLength::Fixed(len)) => {
                let end = start + len;
                if end > input.len() || !is_digits(&input[start..end]) {
                    break;
                }
                end
            }
            Some(FieldLength::Variable(max)) => {
                let end = variable_field_end(input, start, max);
                if end == start {
                    break;
                }
                end
            }
            None => break,
        };

        apply_field(&mut decoded, ai, &input[start..end]);
        pos = end;
    }

    Some(decoded)
}

/// Finds where a variable-length field starting at `start` ends.
///
/// A GS anywhere after `start` is authoritative. Otherwise the field runs to
/// the first fixed-length AI token, capped at `max` characters.
fn variable_field_end(input: &str, start: usize, max: usize) -> usize {
    let limit = input.len().min(start + max);

    if let Some(offset) = input[start..].find(GROUP_SEPARATOR) {
        return (start + offset).min(limit);
    }

    (start + 1..limit)
        .find(|&pos| is_fixed_ai_token(input, pos))
        .unwrap_or(limit)
}

/// True if a fixed-length AI with a well-formed value begins at `pos`.
fn is_fixed_ai_token(input: &str, pos: usize) -> bool {
    if pos + 2 > input.len() {
        return false;
    }
    let ai = &input[pos..pos + 2];

    let Some(FieldLength::Fixed(len)) = field_length(ai) else {
        return false;
    };

    let end = pos + 2 + len;
    if end > input.len() {
        return false;
    }

    let value = &input[pos + 2..end];
    if is_date_ai(ai) {
        parse_expiry(value).is_some()
    } else {
        is_digits(value)
    }
}

// =============================================================================
// Recognizer 3: Plain Numeric Code
// =============================================================================

/// Parses an 8 to 14 digit EAN/UPC/GTIN code.
pub fn parse_plain_numeric(input: &str) -> Option<DecodedBarcode> {
    if !(8..=14).contains(&input.len()) || !is_digits(input) {
        return None;
    }

    let mut decoded = DecodedBarcode {
        format: BarcodeFormat::PlainNumeric,
        ..DecodedBarcode::default()
    };
    decoded.set_gtin(input);
    Some(decoded)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_parenthesized_all_fields() {
        let decoded = decode("(01)06291109120100(17)250131(10)AB123(21)SN9(30)5");
        assert_eq!(
            decoded,
            DecodedBarcode {
                gtin14: "06291109120100".to_string(),
                gtin13: "6291109120100".to_string(),
                batch: Some("AB123".to_string()),
                serial: Some("SN9".to_string()),
                quantity: 5,
                expiry: ymd(2025, 1, 31),
                is_structured: true,
                format: BarcodeFormat::Parenthesized,
            }
        );
    }

    #[test]
    fn test_parenthesized_batch_runs_to_end() {
        let decoded = decode("(01)06291109120100(10)LOT 7");
        assert_eq!(decoded.batch.as_deref(), Some("LOT 7"));
        assert_eq!(decoded.expiry, None);
    }

    #[test]
    fn test_parenthesized_day_zero_expiry() {
        let decoded = decode("(01)06291109120100(17)250200");
        assert_eq!(decoded.expiry, ymd(2025, 2, 28));
    }

    #[test]
    fn test_parenthesized_bad_fields_stay_empty() {
        let decoded = decode("(01)ABC(17)99(30)0");
        assert!(decoded.is_structured);
        assert!(decoded.gtin14.is_empty());
        assert_eq!(decoded.expiry, None);
        assert_eq!(decoded.quantity, 1);
    }

    #[test]
    fn test_concatenated_expiry_then_batch() {
        let decoded = decode("01062911091201001725013110AB123");
        assert_eq!(decoded.gtin14, "06291109120100");
        assert_eq!(decoded.expiry, ymd(2025, 1, 31));
        assert_eq!(decoded.batch.as_deref(), Some("AB123"));
        assert_eq!(decoded.format, BarcodeFormat::Concatenated);
        assert!(decoded.is_structured);
    }

    #[test]
    fn test_concatenated_batch_terminated_by_fixed_ai() {
        let decoded = decode("010629110912010010AB12317250131");
        assert_eq!(decoded.batch.as_deref(), Some("AB123"));
        assert_eq!(decoded.expiry, ymd(2025, 1, 31));
    }

    #[test]
    fn test_concatenated_group_separator_ends_field() {
        let decoded = decode("010629110912010010AB17250131\u{1d}21SN1");
        assert_eq!(decoded.batch.as_deref(), Some("AB17250131"));
        assert_eq!(decoded.serial.as_deref(), Some("SN1"));
        assert_eq!(decoded.expiry, None);
    }

    #[test]
    fn test_concatenated_heuristic_truncates_batch() {
        // Known limitation: "17991231" inside the batch reads as an expiry AI.
        let decoded = decode("010629110912010010L17991231");
        assert_eq!(decoded.batch.as_deref(), Some("L"));
        assert_eq!(decoded.expiry, ymd(2099, 12, 31));
    }

    #[test]
    fn test_concatenated_quantity_and_serial() {
        let decoded = decode("01062911091201002112345\u{1d}3712");
        assert_eq!(decoded.serial.as_deref(), Some("12345"));
        assert_eq!(decoded.quantity, 12);
    }

    #[test]
    fn test_concatenated_stops_at_unknown_ai() {
        let decoded = decode("010629110912010099XYZ17250131");
        assert_eq!(decoded.gtin14, "06291109120100");
        assert_eq!(decoded.expiry, None);
    }

    #[test]
    fn test_symbology_identifier_is_stripped() {
        let decoded = decode("]C101062911091201001725013110AB");
        assert_eq!(decoded.gtin14, "06291109120100");
        assert_eq!(decoded.batch.as_deref(), Some("AB"));

        let plain = decode("]E06291109120100");
        assert_eq!(plain.gtin14, "06291109120100");
        assert!(!plain.is_structured);
    }

    #[test]
    fn test_plain_numeric_pads_every_length() {
        for len in 8..=14 {
            let digits: String = "12345678901234"[..len].to_string();
            let decoded = decode(&digits);
            assert_eq!(decoded.gtin14.len(), 14, "length {}", len);
            assert!(decoded.gtin14.ends_with(&digits));
            assert!(!decoded.is_structured);
            assert_eq!(decoded.format, BarcodeFormat::PlainNumeric);

            let expected_13 = decoded
                .gtin14
                .strip_prefix('0')
                .unwrap_or(&decoded.gtin14)
                .to_string();
            assert_eq!(decoded.gtin13, expected_13);
        }
    }

    #[test]
    fn test_plain_numeric_gtin13() {
        let decoded = decode("6291109120100");
        assert_eq!(decoded.gtin14, "06291109120100");
        assert_eq!(decoded.gtin13, "6291109120100");

        let decoded = decode("  12345670 ");
        assert_eq!(decoded.gtin14, "00000012345670");
        assert_eq!(decoded.gtin13, "0000012345670");
    }

    #[test]
    fn test_fourteen_digits_starting_with_01_is_plain() {
        let decoded = decode("01234567890128");
        assert_eq!(decoded.format, BarcodeFormat::PlainNumeric);
        assert_eq!(decoded.gtin14, "01234567890128");
    }

    #[test]
    fn test_unrecognized_input_is_empty() {
        for raw in ["", "   ", "1234567", "123456789012345", "hello", "01é", "(no ai)"] {
            assert_eq!(decode(raw), DecodedBarcode::default(), "input {:?}", raw);
        }
    }

    #[test]
    fn test_recognizers_are_independent() {
        assert!(parse_parenthesized("0106291109120100").is_none());
        assert!(parse_concatenated("(01)06291109120100").is_none());
        assert!(parse_plain_numeric("(01)06291109120100").is_none());
        assert!(parse_plain_numeric("6291109120100").is_some());
    }
}
