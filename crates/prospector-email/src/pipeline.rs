//! Staged, fail-fast verification of email candidates.
//!
//! A pipeline is an ordered list of [`VerificationStage`]s. Each stage looks
//! at the address, updates the in-progress [`VerificationResult`], and either
//! lets the next stage run or stops the run. The default pipeline is
//! syntax, then MX lookup, then mailbox existence.

use crate::dns::DomainValidator;
use crate::existence::ExistenceVerifier;
use crate::syntax::is_valid_format;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use prospector_core::{EmailVerification, VerificationResult, VerificationStatus};
use std::any::Any;
use std::ops::ControlFlow;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error, info};

/// One step of address verification.
#[async_trait]
pub trait VerificationStage: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Apply this stage to `address`.
    ///
    /// Returning [`ControlFlow::Break`] stops the run; `result` is then final.
    async fn apply(&self, address: &str, result: &mut VerificationResult) -> ControlFlow<()>;
}

/// Structural check. Stops with `invalid_format` on failure.
pub struct SyntaxStage;

#[async_trait]
impl VerificationStage for SyntaxStage {
    fn name(&self) -> &'static str {
        "syntax"
    }

    async fn apply(&self, address: &str, result: &mut VerificationResult) -> ControlFlow<()> {
        if !is_valid_format(address) {
            result.status = VerificationStatus::InvalidFormat;
            result.reason = Some("Format Error".to_string());
            return ControlFlow::Break(());
        }
        result.format_valid = true;
        ControlFlow::Continue(())
    }
}

/// MX lookup. Stops with `invalid_domain` when the host has no mail exchanger.
pub struct DomainStage {
    validator: DomainValidator,
}

impl DomainStage {
    /// Wrap a domain validator.
    #[must_use]
    pub fn new(validator: DomainValidator) -> Self {
        Self { validator }
    }
}

#[async_trait]
impl VerificationStage for DomainStage {
    fn name(&self) -> &'static str {
        "domain"
    }

    async fn apply(&self, address: &str, result: &mut VerificationResult) -> ControlFlow<()> {
        if !self.validator.has_mail_exchanger(address).await {
            result.status = VerificationStatus::InvalidDomain;
            result.reason = Some("Domain Error".to_string());
            result.domain_valid = false;
            return ControlFlow::Break(());
        }
        result.domain_valid = true;
        ControlFlow::Continue(())
    }
}

/// Mailbox existence. Always the last stage.
pub struct ExistenceStage {
    verifier: ExistenceVerifier,
}

impl ExistenceStage {
    /// Wrap an existence verifier.
    #[must_use]
    pub fn new(verifier: ExistenceVerifier) -> Self {
        Self { verifier }
    }
}

#[async_trait]
impl VerificationStage for ExistenceStage {
    fn name(&self) -> &'static str {
        "existence"
    }

    async fn apply(&self, address: &str, result: &mut VerificationResult) -> ControlFlow<()> {
        let outcome = AssertUnwindSafe(self.verifier.check_existence(address))
            .catch_unwind()
            .await;

        let fault = match outcome {
            Ok(Ok(report)) => {
                result.status = report.status;
                result.score = report.score;
                return ControlFlow::Continue(());
            }
            Ok(Err(e)) => e.to_string(),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Mailbox verifier panicked on {}: {}", address, message);
                message
            }
        };

        // Flags from the earlier stages stay as they are
        result.status = VerificationStatus::Failed;
        result.reason = Some(format!("Verification process failed: {fault}"));
        ControlFlow::Break(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "verifier panicked".to_string()
    }
}

/// Runs every address through an ordered list of stages.
pub struct VerificationPipeline {
    stages: Vec<Box<dyn VerificationStage>>,
    concurrency: usize,
}

impl VerificationPipeline {
    /// The standard three-stage pipeline.
    #[must_use]
    pub fn new(domain: DomainValidator, existence: ExistenceVerifier) -> Self {
        Self::from_stages(vec![
            Box::new(SyntaxStage),
            Box::new(DomainStage::new(domain)),
            Box::new(ExistenceStage::new(existence)),
        ])
    }

    /// A pipeline over custom stages, run in the given order.
    #[must_use]
    pub fn from_stages(stages: Vec<Box<dyn VerificationStage>>) -> Self {
        Self {
            stages,
            concurrency: 1,
        }
    }

    /// Number of addresses verified at once by [`Self::verify_all`].
    ///
    /// Zero is treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Stage names, in run order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Verify a single address. Never fails.
    pub async fn verify(&self, address: &str) -> VerificationResult {
        let mut result = VerificationResult::pending();

        for stage in &self.stages {
            if stage.apply(address, &mut result).await.is_break() {
                debug!(
                    "Verification of {} stopped at {} stage: {}",
                    address,
                    stage.name(),
                    result.status
                );
                return result;
            }
        }

        debug!("Verification of {} completed: {}", address, result.status);
        result
    }

    /// Verify every address, returning one result per input in input order.
    pub async fn verify_all(&self, addresses: &[String]) -> Vec<EmailVerification> {
        info!(
            "Verifying {} address(es) with concurrency {}",
            addresses.len(),
            self.concurrency
        );

        stream::iter(addresses.iter().cloned())
            .map(|email| async move {
                let result = self.verify(&email).await;
                EmailVerification { email, result }
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }
}
