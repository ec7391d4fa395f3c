//! Shared types used across the Prospector workspace.
//!
//! The verification types live here rather than in `prospector-email` so that
//! the export sink can render lead rows without depending on the pipeline.

use crate::error::ProspectorError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome classification for a single verified email address.
///
/// Statuses reported by the remote mailbox verifier are passed through
/// verbatim; anything outside the known set lands in [`Self::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum VerificationStatus {
    /// Address failed the structural check
    InvalidFormat,
    /// Address host has no MX record
    InvalidDomain,
    /// No verifier configured, or the verifier could not decide
    Unknown,
    /// Verifier reports a deliverable mailbox
    Valid,
    /// Verifier reports a deliverable but doubtful mailbox
    Risky,
    /// Verifier reports a throwaway mailbox provider
    Disposable,
    /// The verifier call itself failed (network, HTTP status, bad payload)
    Error,
    /// The verification stage faulted after the local checks passed
    Failed,
    /// Any other status string reported by the verifier
    Other(String),
}

impl VerificationStatus {
    /// Wire representation of this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidFormat => "invalid_format",
            Self::InvalidDomain => "invalid_domain",
            Self::Unknown => "unknown",
            Self::Valid => "valid",
            Self::Risky => "risky",
            Self::Disposable => "disposable",
            Self::Error => "error",
            Self::Failed => "Error",
            Self::Other(other) => other,
        }
    }

    /// Map a status string reported by a remote verifier.
    ///
    /// Only the statuses a verifier can legitimately report are recognised;
    /// pipeline-internal statuses such as `invalid_format` are kept verbatim.
    #[must_use]
    pub fn from_remote(status: &str) -> Self {
        match status {
            "valid" => Self::Valid,
            "risky" => Self::Risky,
            "disposable" => Self::Disposable,
            "unknown" => Self::Unknown,
            "error" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }

    fn from_wire(status: &str) -> Self {
        match status {
            "invalid_format" => Self::InvalidFormat,
            "invalid_domain" => Self::InvalidDomain,
            "Error" => Self::Failed,
            other => Self::from_remote(other),
        }
    }

    /// Whether the pipeline stopped before reaching the mailbox verifier.
    #[must_use]
    pub fn is_short_circuit(&self) -> bool {
        matches!(self, Self::InvalidFormat | Self::InvalidDomain)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_wire(s))
    }
}

impl From<String> for VerificationStatus {
    fn from(s: String) -> Self {
        Self::from_wire(&s)
    }
}

impl From<VerificationStatus> for String {
    fn from(status: VerificationStatus) -> Self {
        match status {
            VerificationStatus::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

/// Result of running one address through the verification pipeline.
///
/// Built fresh for every call and never mutated after it is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Final classification
    pub status: VerificationStatus,
    /// Human-readable cause, set only when the pipeline stopped early or faulted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Address passed the structural check
    pub format_valid: bool,
    /// Address host has at least one MX record
    pub domain_valid: bool,
    /// Verifier confidence score, absent when no verifier answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl VerificationResult {
    /// A result with no stage applied yet.
    #[must_use]
    pub fn pending() -> Self {
        Self {
            status: VerificationStatus::Unknown,
            reason: None,
            format_valid: false,
            domain_valid: false,
            score: None,
        }
    }

    /// Terminate with the given status and reason.
    #[must_use]
    pub fn terminated(mut self, status: VerificationStatus, reason: impl Into<String>) -> Self {
        self.status = status;
        self.reason = Some(reason.into());
        self
    }
}

impl Default for VerificationResult {
    fn default() -> Self {
        Self::pending()
    }
}

/// An email candidate paired with its verification outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailVerification {
    /// The synthesized address
    pub email: String,
    /// Pipeline outcome for `email`
    #[serde(flatten)]
    pub result: VerificationResult,
}

/// A consolidated lead for one company, assembled by the lead workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    /// Company name (the search result title)
    pub company_name: String,
    /// Source URL of the search result
    pub website: String,
    /// Business description (enriched, or the raw snippet)
    pub description: String,
    /// Candidate emails in generation order with their verification results
    pub emails: Vec<EmailVerification>,
    /// Discovered profile URLs
    pub linkedin_profiles: Vec<String>,
    /// Overall lead status
    pub verification_status: String,
    /// When the run that produced this lead started
    pub timestamp: Timestamp,
}

impl LeadRecord {
    /// Status given to every freshly generated lead.
    pub const INITIAL_STATUS: &'static str = "Initial";

    /// Addresses that passed the structural check, in generation order.
    pub fn format_valid_emails(&self) -> impl Iterator<Item = &str> {
        self.emails
            .iter()
            .filter(|e| e.result.format_valid)
            .map(|e| e.email.as_str())
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Get the inner `DateTime<Utc>`.
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Parse a timestamp from an RFC3339 string.
    pub fn from_rfc3339(s: &str) -> Result<Self, ProspectorError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| ProspectorError::Validation(format!("invalid timestamp: {e}")))
    }

    /// Format as RFC3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Format with a `strftime`-style pattern.
    #[must_use]
    pub fn format(&self, pattern: &str) -> String {
        self.0.format(pattern).to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(VerificationStatus::InvalidFormat.as_str(), "invalid_format");
        assert_eq!(VerificationStatus::InvalidDomain.as_str(), "invalid_domain");
        assert_eq!(VerificationStatus::Error.as_str(), "error");
        assert_eq!(VerificationStatus::Failed.as_str(), "Error");
        assert_eq!(
            VerificationStatus::Other("accept_all".to_string()).as_str(),
            "accept_all"
        );
    }

    #[test]
    fn test_status_from_remote_passes_unknown_values_through() {
        assert_eq!(
            VerificationStatus::from_remote("valid"),
            VerificationStatus::Valid
        );
        assert_eq!(
            VerificationStatus::from_remote("webmail"),
            VerificationStatus::Other("webmail".to_string())
        );
        // A verifier cannot claim a pipeline-internal status
        assert_eq!(
            VerificationStatus::from_remote("invalid_format"),
            VerificationStatus::Other("invalid_format".to_string())
        );
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&VerificationStatus::Failed).expect("serialize status");
        assert_eq!(json, "\"Error\"");

        let parsed: VerificationStatus =
            serde_json::from_str("\"invalid_domain\"").expect("deserialize status");
        assert_eq!(parsed, VerificationStatus::InvalidDomain);

        let parsed: VerificationStatus =
            serde_json::from_str("\"accept_all\"").expect("deserialize status");
        assert_eq!(parsed, VerificationStatus::Other("accept_all".to_string()));
    }

    #[test]
    fn test_short_circuit_statuses() {
        assert!(VerificationStatus::InvalidFormat.is_short_circuit());
        assert!(VerificationStatus::InvalidDomain.is_short_circuit());
        assert!(!VerificationStatus::Unknown.is_short_circuit());
        assert!(!VerificationStatus::Failed.is_short_circuit());
    }

    #[test]
    fn test_result_omits_absent_fields() {
        let result = VerificationResult::pending()
            .terminated(VerificationStatus::InvalidFormat, "Format Error");
        let json = serde_json::to_value(&result).expect("serialize result");

        assert_eq!(json["status"], "invalid_format");
        assert_eq!(json["reason"], "Format Error");
        assert_eq!(json["format_valid"], false);
        assert!(json.get("score").is_none());
    }

    #[test]
    fn test_format_valid_emails() {
        let ok = VerificationResult {
            format_valid: true,
            ..VerificationResult::pending()
        };
        let lead = LeadRecord {
            company_name: "Acme".to_string(),
            website: "https://acme.io".to_string(),
            description: String::new(),
            emails: vec![
                EmailVerification {
                    email: "jane.doe@acme.io".to_string(),
                    result: ok.clone(),
                },
                EmailVerification {
                    email: "broken@".to_string(),
                    result: VerificationResult::pending(),
                },
                EmailVerification {
                    email: "jdoe@acme.io".to_string(),
                    result: ok,
                },
            ],
            linkedin_profiles: Vec::new(),
            verification_status: LeadRecord::INITIAL_STATUS.to_string(),
            timestamp: Timestamp::now(),
        };

        let emails: Vec<&str> = lead.format_valid_emails().collect();
        assert_eq!(emails, vec!["jane.doe@acme.io", "jdoe@acme.io"]);
    }

    #[test]
    fn test_timestamp_display() {
        let ts = Timestamp::from(
            Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
                .single()
                .expect("valid date"),
        );
        assert_eq!(ts.to_string(), "2024-03-09 14:05:07");
        assert_eq!(ts.format("%Y-%m-%d %H:%M"), "2024-03-09 14:05");
    }

    #[test]
    fn test_timestamp_rfc3339() {
        let ts = Timestamp::now();
        let parsed = Timestamp::from_rfc3339(&ts.to_rfc3339()).expect("parse RFC3339 timestamp");
        assert_eq!(ts.as_datetime().timestamp(), parsed.as_datetime().timestamp());
    }
}
