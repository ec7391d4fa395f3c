//! Prospector application shell.
//!
//! A thin layer that loads configuration, builds the lead workflow from the
//! collaborator crates and runs it. Lead discovery and verification logic
//! lives in the `crates/` directory.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cli;
pub mod describe;
pub mod error;
pub mod workflow;

pub use cli::Cli;
pub use describe::describe_company;
pub use error::{AppError, Result};
pub use workflow::{LeadRun, LeadWorkflow};

/// Initialize tracing subscriber for logging.
///
/// Honours `RUST_LOG`; defaults to `info,prospector=debug`. Logs go to
/// stderr so stdout carries only the run summary.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,prospector=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
