//! Azure Document Intelligence client.

mod client;

pub use client::DocumentAnalysisClient;

use crate::error::AnalyzeError;

/// Result type for document analysis operations.
pub type Result<T> = std::result::Result<T, AnalyzeError>;
