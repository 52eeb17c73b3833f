//! Numeric field normalization.
//!
//! Raw numeric strings off a scanned bill carry currency punctuation,
//! thousands separators, and OCR spacing artifacts around minus signs. This
//! module reduces them to a single `f64`, or reports that no usable number
//! was present.

use crate::error::NormalizeError;

use super::patterns::NUMBER;
use super::Result;

/// Clean a raw numeric string and parse it as a float.
///
/// Absent input passes through as `Ok(None)`. When the string contains more
/// than one numeric substring, only the first is returned: bill text often
/// carries a value followed by auxiliary numbers, and the first is the
/// quantity of interest. A string with no numeric substring, or one whose
/// cleaned form still fails to parse, is an [`NormalizeError::InvalidNumber`].
pub fn normalize_number(number_string: Option<&str>) -> Result<Option<f64>> {
    let raw = match number_string {
        Some(s) => s,
        None => return Ok(None),
    };

    // Thousands separators, then OCR spacing around minus signs
    // ("- 51217.00" and "51217.00 -" variants).
    let cleaned = raw.replace(',', "").replace(" -", "-").replace("- ", "-");
    let cleaned = cleaned.trim();

    let mut matches = NUMBER.find_iter(cleaned).map(|m| m.as_str());
    let first = match matches.next() {
        Some(m) => m,
        None => return Err(NormalizeError::InvalidNumber(raw.to_string())),
    };

    if matches.next().is_some() {
        // First match wins; the rest are discarded.
        return parse_float(first, raw).map(Some);
    }

    let stripped: String = first
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let repaired = repair_leading_dot(&stripped);

    parse_float(&repaired, raw).map(Some)
}

/// Repair a bare leading decimal point (".99" -> "0.99") without disturbing
/// already-valid numbers.
fn repair_leading_dot(s: &str) -> String {
    if let Some(rest) = s.strip_prefix("-.") {
        format!("-0.{}", rest)
    } else if let Some(rest) = s.strip_prefix('.') {
        format!("0.{}", rest)
    } else {
        s.to_string()
    }
}

fn parse_float(s: &str, raw: &str) -> Result<f64> {
    s.parse::<f64>()
        .map_err(|_| NormalizeError::InvalidNumber(raw.to_string()))
}
