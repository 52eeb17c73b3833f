//! Core library for utility-bill data extraction.
//!
//! This crate provides:
//! - An Azure Document Intelligence client for custom extraction models
//! - Per-field normalizers (bill dates, bill-month labels, numeric strings)
//! - Bill record assembly with derived billing metrics

pub mod azure;
pub mod bill;
pub mod error;
pub mod models;
pub mod normalize;

pub use error::{AnalyzeError, BillError, NormalizeError, Result, UbillError};
pub use models::bill::{BillRecord, Commercials, ConsumptionInformation, StaticInformation};
pub use models::config::UbillConfig;
pub use normalize::{normalize_bill_month, normalize_date, normalize_number, BillMonth};
pub use bill::{BillRecordBuilder, RawFieldMap};
pub use azure::DocumentAnalysisClient;
