//! Error types for the ubill-core library.

use thiserror::Error;

/// Main error type for the ubill library.
#[derive(Error, Debug)]
pub enum UbillError {
    /// Document analysis service error.
    #[error("analysis error: {0}")]
    Analyze(#[from] AnalyzeError),

    /// Bill record assembly error.
    #[error("bill error: {0}")]
    Bill(#[from] BillError),

    /// Field normalization error.
    #[error("normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors from the Azure Document Intelligence client.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// HTTP transport failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the request.
    #[error("service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The submit response carried no Operation-Location header.
    #[error("no Operation-Location header in analyze response")]
    MissingOperationLocation,

    /// The analysis operation reported failure.
    #[error("analysis failed: {0}")]
    AnalysisFailed(String),

    /// The operation did not complete within the polling budget.
    #[error("analysis did not complete after {0} polls")]
    Timeout(usize),

    /// Malformed response body.
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    /// The result contained no analyzed documents.
    #[error("no documents in analysis result")]
    NoDocuments,
}

/// Errors related to per-field normalization.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The date string matched none of the supported formats.
    #[error("date format of '{0}' is not supported")]
    UnsupportedDateFormat(String),

    /// The bill-month label could not be reduced to a month/year pair.
    #[error("invalid bill month '{input}': {reason}")]
    MonthLabel { input: String, reason: String },

    /// No parseable numeric value in the string.
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
}

/// Errors related to bill record assembly.
#[derive(Error, Debug)]
pub enum BillError {
    /// A field required for record assembly is missing.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A required field failed normalization.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Result type for the ubill library.
pub type Result<T> = std::result::Result<T, UbillError>;
