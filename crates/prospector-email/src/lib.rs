//! Prospector Email - candidate addresses and staged verification.
//!
//! Given a company and its domain this crate produces plausible email
//! addresses and classifies each one through three checks of increasing
//! cost: a structural regex, an MX lookup, and an optional remote mailbox
//! verifier.
//!
//! # Modules
//!
//! - [`names`] - Person names from a chat provider, with a static fallback
//! - [`patterns`] - Name to local-part expansion and deduplication
//! - [`syntax`] - Structural address check
//! - [`dns`] - MX record lookups
//! - [`existence`] - Remote mailbox verification (Hunter.io)
//! - [`pipeline`] - Ordered, fail-fast verification stages
//! - [`generator`] - Names, expansion and dedupe for one company
//!
//! # Example
//!
//! ```rust,no_run
//! use prospector_email::{
//!     DnsResolver, DomainValidator, EmailGenerator, ExistenceVerifier, NameSource,
//!     VerificationPipeline,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = EmailGenerator::new(NameSource::fallback(), 3);
//! let candidates = generator.generate_candidates("Acme", "acme.io", None).await;
//!
//! let domain = DomainValidator::new(Arc::new(DnsResolver::new(5)?));
//! let pipeline = VerificationPipeline::new(domain, ExistenceVerifier::new(None));
//! for verification in pipeline.verify_all(&candidates).await {
//!     println!("{} -> {}", verification.email, verification.result.status);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod dns;
pub mod error;
pub mod existence;
pub mod generator;
pub mod names;
pub mod patterns;
pub mod pipeline;
pub mod syntax;

// Re-export commonly used types
pub use dns::{DnsResolver, DomainValidator, MxRecord, MxResolver};
pub use error::{Disposition, DnsError, EmailError, MailboxError, MailboxResult, Result};
pub use existence::{ExistenceReport, ExistenceVerifier, HunterClient, MailboxVerifier};
pub use generator::EmailGenerator;
pub use names::{NameSource, FALLBACK_NAMES};
pub use patterns::{dedupe, expand, EmailPattern};
pub use pipeline::{
    DomainStage, ExistenceStage, SyntaxStage, VerificationPipeline, VerificationStage,
};
pub use syntax::is_valid_format;
