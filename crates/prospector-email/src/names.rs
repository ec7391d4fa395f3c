//! Candidate person names for a company.

use once_cell::sync::Lazy;
use prospector_llm::{CompletionRequest, LlmProvider};
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};

/// Names used when no suggestion provider is configured or it yields nothing.
pub const FALLBACK_NAMES: [&str; 3] = ["John Smith", "Emily Johnson", "Michael Brown"];

const SYSTEM_PROMPT: &str =
    "Generate realistic professional names for employees at a tech company.";

/// Leading `1.`, `2)`, `-`, `*` or `•` list markers.
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d+[.)]|[-*•])(?:\s+|$)")
        .expect("List marker regex is hardcoded and valid")
});

/// Supplies candidate person names, optionally from a chat provider.
#[derive(Clone)]
pub struct NameSource {
    provider: Option<Arc<dyn LlmProvider>>,
    max_tokens: u32,
}

impl NameSource {
    /// Create a name source. `None` means every call returns the fallback list.
    #[must_use]
    pub fn new(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self {
            provider,
            max_tokens: 100,
        }
    }

    /// A source that never contacts a provider.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(None)
    }

    /// Cap on tokens requested from the provider.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Whether a suggestion provider is configured.
    #[must_use]
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Return names for `company`, never failing.
    ///
    /// `count` is a hint passed to the provider; the result is not truncated
    /// or padded to it.
    pub async fn get_names(&self, company: &str, count: usize) -> Vec<String> {
        let Some(provider) = &self.provider else {
            warn!("No name suggestion provider configured, using fallback names");
            return fallback_names();
        };

        let request = CompletionRequest::new(format!(
            "Generate {count} professional names that could work at {company}. \
             Include first and last names. Format as: FirstName LastName"
        ))
        .with_system_prompt(SYSTEM_PROMPT)
        .with_max_tokens(self.max_tokens);

        match provider.complete(request).await {
            Ok(response) => {
                let names = parse_names(&response.content);
                if names.is_empty() {
                    warn!(
                        "Provider {} returned no usable names for {}, using fallback names",
                        provider.provider_id(),
                        company
                    );
                    return fallback_names();
                }
                debug!("Got {} suggested names for {}", names.len(), company);
                names
            }
            Err(e) => {
                warn!("Error generating names: {}, using fallback names", e);
                fallback_names()
            }
        }
    }
}

/// One name per non-empty line, list markers removed, provider order kept.
#[must_use]
pub fn parse_names(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| LIST_MARKER.replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

fn fallback_names() -> Vec<String> {
    FALLBACK_NAMES.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_trims_and_drops_blank_lines() {
        let names = parse_names("  Jane Doe  \n\n   \nRaj Patel\n");
        assert_eq!(names, vec!["Jane Doe", "Raj Patel"]);
    }

    #[test]
    fn test_parse_names_strips_list_markers() {
        let names = parse_names("1. Jane Doe\n2) Raj Patel\n- Li Wei\n* Ana Silva\n• Tom Berg");
        assert_eq!(
            names,
            vec!["Jane Doe", "Raj Patel", "Li Wei", "Ana Silva", "Tom Berg"]
        );
    }

    #[test]
    fn test_parse_names_keeps_hyphenated_names() {
        assert_eq!(parse_names("Mary-Jane Watson"), vec!["Mary-Jane Watson"]);
    }

    #[test]
    fn test_parse_names_marker_only_line_is_dropped() {
        assert!(parse_names("1. \n-").is_empty());
    }

    #[tokio::test]
    async fn test_no_provider_returns_fallback() {
        let source = NameSource::fallback();
        assert!(!source.has_provider());
        assert_eq!(
            source.get_names("Acme", 10).await,
            vec!["John Smith", "Emily Johnson", "Michael Brown"]
        );
    }
}
