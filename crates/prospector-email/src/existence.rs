//! Mailbox existence checks through a remote verification service.

use crate::error::{Disposition, MailboxError, MailboxResult, Result};
use async_trait::async_trait;
use prospector_core::VerificationStatus;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Default Hunter.io API root.
pub const DEFAULT_VERIFIER_BASE_URL: &str = "https://api.hunter.io/v2";

/// What the verifier said about one address.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistenceReport {
    /// Verifier status, passed through verbatim
    pub status: VerificationStatus,
    /// Verifier confidence, absent when no verifier answered
    pub score: Option<f64>,
}

impl ExistenceReport {
    /// No verifier was available to ask.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            status: VerificationStatus::Unknown,
            score: None,
        }
    }

    /// The verifier call failed in a recoverable way.
    #[must_use]
    pub fn error() -> Self {
        Self {
            status: VerificationStatus::Error,
            score: None,
        }
    }
}

/// A remote service that can say whether a mailbox exists.
#[async_trait]
pub trait MailboxVerifier: Send + Sync {
    /// Ask about a single address. One request, no retries.
    async fn verify_mailbox(&self, address: &str) -> MailboxResult<ExistenceReport>;
}

#[derive(Debug, Deserialize)]
struct HunterResponse {
    #[serde(default)]
    data: Option<HunterData>,
}

#[derive(Debug, Deserialize)]
struct HunterData {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    score: Option<f64>,
}

/// Hunter.io email-verifier client.
pub struct HunterClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl HunterClient {
    /// Create a client with the default base URL and a 10 second timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, 10)
    }

    /// Create a client with an explicit request timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_timeout(api_key: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: DEFAULT_VERIFIER_BASE_URL.to_string(),
            client,
        })
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl MailboxVerifier for HunterClient {
    async fn verify_mailbox(&self, address: &str) -> MailboxResult<ExistenceReport> {
        let url = format!("{}/email-verifier", self.base_url);
        debug!("Verifying mailbox {} via {}", address, url);

        let response = self
            .client
            .get(&url)
            .query(&[("email", address), ("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MailboxError::Timeout
                } else {
                    MailboxError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailboxError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: HunterResponse = response
            .json()
            .await
            .map_err(|e| MailboxError::Parse(e.to_string()))?;

        let (status, score) = body
            .data
            .map_or((None, None), |data| (data.status, data.score));

        Ok(ExistenceReport {
            status: status.map_or(VerificationStatus::Unknown, |s| {
                VerificationStatus::from_remote(&s)
            }),
            score: Some(score.unwrap_or(0.0)),
        })
    }
}

/// Asks the configured mailbox verifier, if any, about an address.
#[derive(Clone, Default)]
pub struct ExistenceVerifier {
    verifier: Option<Arc<dyn MailboxVerifier>>,
}

impl ExistenceVerifier {
    /// Create a verifier. `None` reports every address as `unknown`.
    #[must_use]
    pub fn new(verifier: Option<Arc<dyn MailboxVerifier>>) -> Self {
        Self { verifier }
    }

    /// Whether a remote verifier is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.verifier.is_some()
    }

    /// Check whether `address` exists.
    ///
    /// Recoverable failures are folded into an `error` report. Only a
    /// [`Disposition::Fault`] is returned as `Err`.
    pub async fn check_existence(&self, address: &str) -> MailboxResult<ExistenceReport> {
        let Some(verifier) = &self.verifier else {
            debug!("No mailbox verifier configured, {} reported as unknown", address);
            return Ok(ExistenceReport::unknown());
        };

        match verifier.verify_mailbox(address).await {
            Ok(report) => Ok(report),
            Err(e) => match e.disposition() {
                Disposition::Degrade => {
                    warn!("Mailbox verification failed for {}: {}", address, e);
                    Ok(ExistenceReport::error())
                }
                Disposition::Fault => {
                    error!("Mailbox verifier fault for {}: {}", address, e);
                    Err(e)
                }
            },
        }
    }
}
