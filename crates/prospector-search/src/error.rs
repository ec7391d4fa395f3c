//! Error types for the search clients.

use thiserror::Error;

/// Errors from the web search collaborators.
#[derive(Debug, Error)]
pub enum SearchError {
    /// API key or search engine id is absent
    #[error("search API key and search engine id are required (set GOOGLE_SEARCH_API_KEY and GOOGLE_SEARCH_CX)")]
    MissingCredentials,

    /// Transport failure
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Search API answered with a non-success status
    #[error("search API returned status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Response body was not the expected shape
    #[error("failed to parse search response: {0}")]
    Parse(String),
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
