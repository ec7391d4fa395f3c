//! Error types for lead export.

use thiserror::Error;

/// Errors raised by export sinks.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Transport failure talking to the Sheets or Drive API
    #[error("export request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Sheets or Drive API answered with a non-success status
    #[error("{api} API returned status {status}: {message}")]
    Api {
        /// Which API answered
        api: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Response body was not the expected shape
    #[error("failed to parse export response: {0}")]
    Parse(String),

    /// Writing the export file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Leads could not be serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
