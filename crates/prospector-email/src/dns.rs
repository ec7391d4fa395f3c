//! MX record lookups for domain plausibility.
//!
//! An MX record only says the domain accepts mail somewhere; it says nothing
//! about whether a particular mailbox exists.

use crate::error::DnsError;
use async_trait::async_trait;
use hickory_resolver::{
    config::ResolverOpts, name_server::TokioConnectionProvider, TokioResolver,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// A mail exchanger published for a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRecord {
    /// Exchange host name
    pub exchange: String,
    /// MX preference (lower value = higher priority)
    pub preference: u16,
}

/// Source of MX records.
#[async_trait]
pub trait MxResolver: Send + Sync {
    /// Look up the MX records for `domain`.
    ///
    /// # Errors
    /// Returns [`DnsError::NoRecords`] when DNS definitively reports no such
    /// domain or no MX records, and another variant for any other failure.
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError>;
}

/// MX resolver backed by the system DNS configuration.
pub struct DnsResolver {
    resolver: TokioResolver,
    timeout: Duration,
}

impl DnsResolver {
    /// Create a resolver from the system configuration with the given
    /// per-lookup bound.
    ///
    /// # Errors
    /// Returns an error if the system DNS configuration cannot be loaded.
    pub fn new(timeout_secs: u64) -> Result<Self, DnsError> {
        let timeout = Duration::from_secs(timeout_secs);
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;

        let resolver = TokioResolver::builder(TokioConnectionProvider::default())
            .map_err(|e| DnsError::ResolverInit(e.to_string()))?
            .with_options(opts)
            .build();

        Ok(Self { resolver, timeout })
    }
}

#[async_trait]
impl MxResolver for DnsResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        let lookup = tokio::time::timeout(self.timeout, self.resolver.mx_lookup(domain))
            .await
            .map_err(|_| DnsError::Timeout(domain.to_string()))?;

        match lookup {
            Ok(mx_lookup) => {
                let mut records: Vec<MxRecord> = mx_lookup
                    .iter()
                    .map(|mx| MxRecord {
                        exchange: mx.exchange().to_utf8(),
                        preference: mx.preference(),
                    })
                    .collect();
                records.sort_by_key(|r| r.preference);
                Ok(records)
            }
            Err(err) if err.is_no_records_found() || err.is_nx_domain() => {
                Err(DnsError::NoRecords(domain.to_string()))
            }
            Err(err) => Err(DnsError::LookupFailed {
                domain: domain.to_string(),
                message: err.to_string(),
            }),
        }
    }
}

/// Checks whether an address's host can receive mail.
#[derive(Clone)]
pub struct DomainValidator {
    resolver: Arc<dyn MxResolver>,
}

impl DomainValidator {
    /// Create a validator over the given resolver.
    #[must_use]
    pub fn new(resolver: Arc<dyn MxResolver>) -> Self {
        Self { resolver }
    }

    /// `true` only if the host after the last `@` has at least one MX record.
    ///
    /// Every lookup failure is reported as `false`; none is propagated.
    pub async fn has_mail_exchanger(&self, address: &str) -> bool {
        let domain = host_of(address);
        if domain.is_empty() {
            warn!("No host part in address {:?}", address);
            return false;
        }

        match self.resolver.lookup_mx(domain).await {
            Ok(records) if records.is_empty() => {
                warn!("No MX records found for domain: {}", domain);
                false
            }
            Ok(records) => {
                debug!("Found {} MX record(s) for {}", records.len(), domain);
                true
            }
            Err(e) if e.is_definitive() => {
                warn!("No MX records found for domain: {}", domain);
                false
            }
            Err(e) => {
                error!("Domain validation error: {}", e);
                false
            }
        }
    }
}

/// The substring after the last `@`, or the whole address if there is none.
#[must_use]
pub fn host_of(address: &str) -> &str {
    address.rsplit('@').next().unwrap_or(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedResolver {
        answer: fn(&str) -> Result<Vec<MxRecord>, DnsError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MxResolver for FixedResolver {
        async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.answer)(domain)
        }
    }

    fn validator(answer: fn(&str) -> Result<Vec<MxRecord>, DnsError>) -> DomainValidator {
        DomainValidator::new(Arc::new(FixedResolver {
            answer,
            calls: AtomicUsize::new(0),
        }))
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("ada@example.com"), "example.com");
        assert_eq!(host_of("odd@name@example.org"), "example.org");
        assert_eq!(host_of("no-at-sign"), "no-at-sign");
        assert_eq!(host_of("trailing@"), "");
    }

    #[tokio::test]
    async fn test_has_mail_exchanger_with_records() {
        let v = validator(|d| {
            Ok(vec![MxRecord {
                exchange: format!("mx.{d}"),
                preference: 10,
            }])
        });
        assert!(v.has_mail_exchanger("ada@example.com").await);
    }

    #[tokio::test]
    async fn test_empty_answer_is_false() {
        let v = validator(|_| Ok(Vec::new()));
        assert!(!v.has_mail_exchanger("ada@example.com").await);
    }

    #[tokio::test]
    async fn test_nxdomain_is_false() {
        let v = validator(|d| Err(DnsError::NoRecords(d.to_string())));
        assert!(!v.has_mail_exchanger("ada@nope.invalid").await);
    }

    #[tokio::test]
    async fn test_resolver_failure_is_false() {
        let v = validator(|d| Err(DnsError::Timeout(d.to_string())));
        assert!(!v.has_mail_exchanger("ada@slow.example").await);
    }

    #[tokio::test]
    async fn test_empty_host_skips_lookup() {
        let resolver = Arc::new(FixedResolver {
            answer: |_| Ok(Vec::new()),
            calls: AtomicUsize::new(0),
        });
        let v = DomainValidator::new(resolver.clone());

        assert!(!v.has_mail_exchanger("ada@").await);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    #[ignore = "Requires network access"]
    async fn test_mx_lookup_gmail() {
        let resolver = DnsResolver::new(5).expect("create resolver");
        let records = resolver.lookup_mx("gmail.com").await.expect("MX lookup");
        assert!(!records.is_empty());
        assert!(records.windows(2).all(|w| w[0].preference <= w[1].preference));
    }

    #[tokio::test]
    #[ignore = "Requires network access"]
    async fn test_mx_lookup_nonexistent_domain() {
        let resolver = DnsResolver::new(5).expect("create resolver");
        let err = resolver
            .lookup_mx("this-domain-definitely-does-not-exist-12345.com")
            .await
            .unwrap_err();
        assert!(err.is_definitive());
    }
}
