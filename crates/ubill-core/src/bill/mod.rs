//! Bill record assembly.

mod builder;

pub use builder::{BillRecordBuilder, RawFieldMap};

use crate::error::BillError;

/// Result type for record assembly.
pub type Result<T> = std::result::Result<T, BillError>;
