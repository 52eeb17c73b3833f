//! Common regex patterns for bill field normalization.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Bill-month label cleanup (input is lowercased before these run)
    pub static ref LEADING_NON_ALNUM: Regex = Regex::new(
        r"^[^a-z0-9]+"
    ).unwrap();

    pub static ref NON_ALNUM: Regex = Regex::new(
        r"[^a-z0-9]"
    ).unwrap();

    // Month word followed by a four-digit year, e.g. "jun-2024" or "february2025"
    pub static ref MONTH_LABEL: Regex = Regex::new(
        r"^([a-z]+)-?(\d{4})"
    ).unwrap();

    // Numeric substrings; the decimal alternative is listed first so a bare
    // leading decimal point stays attached to its digits
    pub static ref NUMBER: Regex = Regex::new(
        r"-?\d*\.\d+|-?\d+"
    ).unwrap();
}
