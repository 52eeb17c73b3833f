//! Bill-date normalization.

use chrono::NaiveDate;

use crate::error::NormalizeError;

use super::Result;

/// Supported bill-date formats, tried in order. Ambiguous numeric strings are
/// resolved purely by position in this list: a string that parses under an
/// earlier format is always interpreted that way, even when a later format
/// would also accept it with different semantics.
const DATE_FORMATS: [&str; 6] = [
    "%d-%m-%Y", // 25-12-2024
    "%d-%B-%Y", // 25-December-2024
    "%d.%m.%Y", // 25.12.2024
    "%d/%m/%Y", // 25/12/2024
    "%m/%d/%Y", // 12/25/2024
    "%d-%b-%Y", // 29-JUN-2024
];

/// Parse a bill-date string in one of the supported formats.
///
/// The canonical textual form is `YYYY-MM-DD`, i.e. `NaiveDate`'s `Display`.
pub fn normalize_date(date_string: &str) -> Result<NaiveDate> {
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(date_string, fmt) {
            return Ok(date);
        }
    }

    Err(NormalizeError::UnsupportedDateFormat(date_string.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numeric_dmy() {
        let date = normalize_date("25-12-2024").unwrap();
        assert_eq!(date.to_string(), "2024-12-25");
    }

    #[test]
    fn test_full_month_name() {
        let date = normalize_date("25-December-2024").unwrap();
        assert_eq!(date.to_string(), "2024-12-25");
    }

    #[test]
    fn test_dotted_dmy() {
        let date = normalize_date("25.12.2024").unwrap();
        assert_eq!(date.to_string(), "2024-12-25");
    }

    #[test]
    fn test_abbreviated_month_upper_case() {
        let date = normalize_date("29-JUN-2024").unwrap();
        assert_eq!(date.to_string(), "2024-06-29");
    }

    #[test]
    fn test_slash_dmy_wins_over_mdy() {
        // 05/04/2024 is valid under both slash formats; day-month-year comes
        // first in the list so it wins.
        let date = normalize_date("05/04/2024").unwrap();
        assert_eq!(date.to_string(), "2024-04-05");
    }

    #[test]
    fn test_slash_mdy_fallback() {
        // Not a valid day-month-year (no month 25), so the month-day-year
        // format picks it up.
        let date = normalize_date("12/25/2024").unwrap();
        assert_eq!(date.to_string(), "2024-12-25");
    }

    #[test]
    fn test_unsupported_format() {
        let err = normalize_date("2024/06/29").unwrap_err();
        assert!(matches!(err, NormalizeError::UnsupportedDateFormat(_)));
    }

    #[test]
    fn test_round_trip() {
        for input in ["25-12-2024", "29-JUN-2024", "01.01.2025"] {
            let date = normalize_date(input).unwrap();
            let reparsed = NaiveDate::parse_from_str(&date.to_string(), "%Y-%m-%d").unwrap();
            assert_eq!(date, reparsed);
        }
    }
}
