//! Per-field normalizers for raw extraction output.
//!
//! Each normalizer is a pure function from a raw string to a typed value;
//! there is no shared state between them. Defaulting of absent or unusable
//! fields happens at record assembly, not here.

pub mod dates;
pub mod months;
pub mod numbers;
pub mod patterns;

pub use dates::normalize_date;
pub use months::{normalize_bill_month, BillMonth};
pub use numbers::normalize_number;

use crate::error::NormalizeError;

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;
