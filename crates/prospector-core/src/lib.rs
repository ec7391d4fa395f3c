//! Prospector Core - Foundation crate for the Prospector lead generator.
//!
//! This crate provides shared types, error handling, configuration management,
//! and capability detection that all other Prospector crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env credentials
//! - [`types`] - Verification results and lead records
//! - [`capabilities`] - Which optional external services are configured
//!
//! # Example
//!
//! ```rust
//! use prospector_core::{AppConfig, CapabilityRegistry, FeatureId};
//!
//! let config = AppConfig::default();
//! let registry = CapabilityRegistry::from_credentials(&config.credentials);
//! if !registry.is_feature_available(FeatureId::MailboxVerification) {
//!     println!("addresses will be reported as unknown");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod capabilities;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use capabilities::{CapabilityRegistry, FeatureId};
pub use config::{
    AppConfig, Credentials, ExportConfig, NameConfig, SearchConfig, VerificationConfig,
};
pub use error::{ConfigError, ConfigResult, ProspectorError, Result};
pub use types::{
    EmailVerification, LeadRecord, Timestamp, VerificationResult, VerificationStatus,
};
