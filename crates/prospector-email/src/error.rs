//! Error types for candidate verification.
//!
//! Every failure a verification collaborator can produce is classified here,
//! once, as either degrading the single address it concerns or faulting the
//! verification stage. Components consult [`MailboxError::disposition`] and
//! [`DnsError::is_definitive`] instead of deciding per call site.

use thiserror::Error;

/// Result type for fallible construction in this crate.
pub type Result<T> = std::result::Result<T, EmailError>;

/// Result type for a single mailbox verifier call.
pub type MailboxResult<T> = std::result::Result<T, MailboxError>;

/// Errors raised while wiring up verification components.
///
/// Verification itself never returns these; see [`MailboxError`] and
/// [`DnsError`] for how per-address failures are absorbed.
#[derive(Debug, Error)]
pub enum EmailError {
    /// DNS resolver could not be created
    #[error(transparent)]
    Dns(#[from] DnsError),

    /// HTTP client could not be created
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    /// Chat provider could not be created
    #[error(transparent)]
    Llm(#[from] prospector_llm::LlmError),
}

/// Errors from MX record resolution.
#[derive(Debug, Error)]
pub enum DnsError {
    /// The domain does not exist or publishes no MX records.
    #[error("no MX records for {0}")]
    NoRecords(String),

    /// The lookup did not finish within the configured bound.
    #[error("MX lookup timed out for {0}")]
    Timeout(String),

    /// Any other resolver failure (malformed query, network, server error).
    #[error("MX lookup failed for {domain}: {message}")]
    LookupFailed {
        /// Domain that was queried
        domain: String,
        /// Resolver error text
        message: String,
    },

    /// The system resolver configuration could not be loaded.
    #[error("failed to initialise DNS resolver: {0}")]
    ResolverInit(String),
}

impl DnsError {
    /// `true` when DNS definitively answered that no mail exchanger exists.
    #[must_use]
    pub const fn is_definitive(&self) -> bool {
        matches!(self, Self::NoRecords(_))
    }
}

/// How a verifier failure is handled by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Recoverable: the address is reported with `status = "error"`.
    Degrade,
    /// Unclassified: the stage reports `status = "Error"` with the cause.
    Fault,
}

/// Errors from the remote mailbox verifier.
#[derive(Debug, Error)]
pub enum MailboxError {
    /// Transport failure (connection refused, TLS, reset)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request exceeded its timeout
    #[error("verifier request timed out")]
    Timeout,

    /// Verifier answered with a non-success HTTP status
    #[error("verifier returned status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Verifier answered with a body that is not the expected shape
    #[error("failed to parse verifier response: {0}")]
    Parse(String),

    /// Anything else that went wrong inside the verifier
    #[error("{0}")]
    Internal(String),
}

impl MailboxError {
    /// Classify this failure.
    ///
    /// | Failure                         | Disposition |
    /// |---------------------------------|-------------|
    /// | network, timeout, status, parse | `Degrade`   |
    /// | anything else                   | `Fault`     |
    #[must_use]
    pub const fn disposition(&self) -> Disposition {
        match self {
            Self::Network(_) | Self::Timeout | Self::Api { .. } | Self::Parse(_) => {
                Disposition::Degrade
            }
            Self::Internal(_) => Disposition::Fault,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dns_error_is_definitive() {
        assert!(DnsError::NoRecords("example.com".to_string()).is_definitive());
        assert!(!DnsError::Timeout("example.com".to_string()).is_definitive());
        assert!(!DnsError::LookupFailed {
            domain: "example.com".to_string(),
            message: "SERVFAIL".to_string(),
        }
        .is_definitive());
    }

    #[test]
    fn test_mailbox_error_disposition() {
        assert_eq!(MailboxError::Timeout.disposition(), Disposition::Degrade);
        assert_eq!(
            MailboxError::Api {
                status: 500,
                message: "oops".to_string()
            }
            .disposition(),
            Disposition::Degrade
        );
        assert_eq!(
            MailboxError::Parse("missing data".to_string()).disposition(),
            Disposition::Degrade
        );
        assert_eq!(
            MailboxError::Internal("boom".to_string()).disposition(),
            Disposition::Fault
        );
    }

    #[test]
    fn test_internal_error_display_is_bare_cause() {
        let err = MailboxError::Internal("verifier crashed".to_string());
        assert_eq!(err.to_string(), "verifier crashed");
    }
}
