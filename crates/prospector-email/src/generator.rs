//! Candidate generation for one company: names, then patterns, then dedupe.

use crate::names::NameSource;
use crate::patterns::{dedupe, expand};
use tracing::debug;

/// Produces deduplicated candidate addresses for a company.
#[derive(Clone)]
pub struct EmailGenerator {
    names: NameSource,
    name_count: usize,
}

impl EmailGenerator {
    /// Create a generator asking `names` for `name_count` names per company.
    #[must_use]
    pub fn new(names: NameSource, name_count: usize) -> Self {
        Self { names, name_count }
    }

    /// Candidate addresses at `domain` for people at `company`.
    ///
    /// A non-empty `sample_names` is used as-is and the name source is not
    /// consulted.
    pub async fn generate_candidates(
        &self,
        company: &str,
        domain: &str,
        sample_names: Option<&[String]>,
    ) -> Vec<String> {
        let names = match sample_names {
            Some(names) if !names.is_empty() => names.to_vec(),
            _ => self.names.get_names(company, self.name_count).await,
        };

        let candidates = dedupe(expand(&names, domain));
        debug!(
            "Generated {} candidate(s) for {} from {} name(s)",
            candidates.len(),
            company,
            names.len()
        );
        candidates
    }
}
