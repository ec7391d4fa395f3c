//! Core error types for Prospector.
//!
//! Subsystem crates define their own error enums; this module holds the
//! shared top-level error and the configuration errors every crate can hit.

use thiserror::Error;

/// Central error type for Prospector operations that cross crate boundaries.
#[derive(Error, Debug)]
pub enum ProspectorError {
    /// Configuration errors (file loading, parsing, missing credentials)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Web search or profile discovery errors
    #[error("search error: {0}")]
    Search(String),

    /// Lead export errors
    #[error("export error: {0}")]
    Export(String),

    /// Network errors (HTTP requests, DNS)
    #[error("network error: {0}")]
    Network(String),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Config file not found
    #[error("config file not found at {path}")]
    NotFound {
        /// Path where config was expected
        path: String,
    },

    /// A credential that the component cannot work without is not set
    #[error("missing required credential: {name}")]
    MissingCredential {
        /// Environment variable holding the credential
        name: String,
    },

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `ProspectorError`.
pub type Result<T> = std::result::Result<T, ProspectorError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
