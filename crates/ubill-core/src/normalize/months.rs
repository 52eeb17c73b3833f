//! Bill-month label normalization.
//!
//! Bill months arrive as free-form labels ("JUN-2024", "February 2025",
//! "  :Jun-2024") and are reduced to a canonical month/year pair. The billing
//! cycle label is distinct from the bill's issuance date.

use chrono::NaiveDate;

use crate::error::NormalizeError;

use super::patterns::{LEADING_NON_ALNUM, MONTH_LABEL, NON_ALNUM};
use super::Result;

/// Three-letter month codes, indexed by month number minus one. The first
/// three letters of the matched word are looked up here, so full names
/// ("february") and abbreviations ("feb") both resolve.
const MONTH_CODES: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// A normalized billing month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillMonth {
    month: u32,
    year: i32,
}

impl BillMonth {
    /// Month number, 1 through 12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Four-digit year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Canonical `MMM-YYYY` label, e.g. `JUN-2024`.
    pub fn label(&self) -> String {
        format!("{}-{}", MONTH_CODES[self.month as usize - 1], self.year)
    }

    /// First calendar day of the billing month.
    pub fn first_day(&self) -> NaiveDate {
        // Month is validated at construction, so this cannot fail.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// Last calendar day of the billing month, leap years included.
    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .unwrap()
            .pred_opt()
            .unwrap()
    }
}

impl std::fmt::Display for BillMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Normalize a free-form bill-month label.
///
/// The label is lowercased and trimmed, leading punctuation is stripped, and
/// remaining separators collapse to hyphens before matching a month word
/// followed by a four-digit year.
pub fn normalize_bill_month(bill_month: &str) -> Result<BillMonth> {
    let cleaned = bill_month.trim().to_lowercase();
    let cleaned = LEADING_NON_ALNUM.replace(&cleaned, "");
    let cleaned = NON_ALNUM.replace_all(&cleaned, "-");

    if let Some(caps) = MONTH_LABEL.captures(&cleaned) {
        let word = &caps[1];
        let year: i32 = caps[2]
            .parse()
            .map_err(|_| month_label_error(bill_month, "year out of range"))?;

        // Match is ASCII-only, so byte slicing is safe.
        let prefix = &word[..word.len().min(3)];
        if let Some(index) = MONTH_CODES
            .iter()
            .position(|code| code.eq_ignore_ascii_case(prefix))
        {
            return Ok(BillMonth {
                month: index as u32 + 1,
                year,
            });
        }

        return Err(month_label_error(bill_month, "unknown month name"));
    }

    Err(month_label_error(bill_month, "no month/year pattern found"))
}

fn month_label_error(input: &str, reason: &str) -> NormalizeError {
    NormalizeError::MonthLabel {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
