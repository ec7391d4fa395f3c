//! Error types for wiring up a lead run.

use prospector_core::ConfigError;
use thiserror::Error;

/// Errors raised while building the lead workflow.
///
/// Once built, a run never fails; every collaborator degrades instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration or mandatory credential problem
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Search client could not be created
    #[error("search setup failed: {0}")]
    Search(#[from] prospector_search::SearchError),

    /// Verification components could not be created
    #[error("verification setup failed: {0}")]
    Email(#[from] prospector_email::EmailError),

    /// Chat provider could not be created
    #[error("chat provider setup failed: {0}")]
    Llm(#[from] prospector_llm::LlmError),

    /// Export sink could not be created
    #[error("export setup failed: {0}")]
    Export(#[from] prospector_export::ExportError),
}

/// Result type for application setup.
pub type Result<T> = std::result::Result<T, AppError>;
