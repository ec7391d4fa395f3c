//! Public LinkedIn profile discovery through site-restricted web search.

use crate::google::SearchBackend;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, warn};

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-zA-Z0-9\s]").expect("Company name cleanup regex is hardcoded and valid")
});

/// A profile found for a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileHit {
    /// Name derived from the profile URL
    pub name: String,
    /// Profile URL
    pub profile_url: String,
    /// Search result title
    pub title: String,
    /// Search result snippet
    pub snippet: String,
}

/// Finds profile URLs for people at a company.
#[derive(Clone)]
pub struct ProfileFinder {
    backend: Arc<dyn SearchBackend>,
}

impl ProfileFinder {
    /// Create a finder over a search backend.
    #[must_use]
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    /// Up to `num_results` profiles for `company`, optionally near `location`.
    ///
    /// Query strategies run in order until enough unique profiles have been
    /// collected. Any search failure is logged and yields no profiles.
    pub async fn find_profiles(
        &self,
        company: &str,
        location: Option<&str>,
        num_results: usize,
    ) -> Vec<ProfileHit> {
        let queries = profile_queries(company, location);
        if queries.is_empty() {
            warn!("Company name {:?} has nothing to search for", company);
            return Vec::new();
        }

        let per_query = u32::try_from(num_results).unwrap_or(u32::MAX);
        let mut seen = HashSet::new();
        let mut profiles = Vec::new();

        for query in queries {
            let hits = match self.backend.query(&query, per_query).await {
                Ok(hits) => hits,
                Err(e) => {
                    error!("LinkedIn profile search failed: {}", e);
                    return Vec::new();
                }
            };

            for hit in hits {
                if hit.link.contains("/in/") && seen.insert(hit.link.clone()) {
                    profiles.push(ProfileHit {
                        name: profile_name_from_url(&hit.link),
                        profile_url: hit.link,
                        title: hit.title,
                        snippet: hit.snippet,
                    });
                }
            }

            if profiles.len() >= num_results {
                break;
            }
        }

        if profiles.is_empty() {
            warn!("No LinkedIn profiles found for {}", company);
        } else {
            debug!("Found {} profile(s) for {}", profiles.len(), company);
        }

        profiles.truncate(num_results);
        profiles
    }
}

/// The site-restricted queries tried for `company`, in order.
///
/// Empty when the cleaned company name has no words.
#[must_use]
pub fn profile_queries(company: &str, location: Option<&str>) -> Vec<String> {
    let clean = NON_ALPHANUMERIC.replace_all(company, "");
    let Some(first_word) = clean.split_whitespace().next() else {
        return Vec::new();
    };

    let suffix = location
        .filter(|l| !l.trim().is_empty())
        .map(|l| format!(" {l}"))
        .unwrap_or_default();

    vec![
        format!("site:linkedin.com/in \"{clean}\"{suffix}"),
        format!(
            "site:linkedin.com/in {}{suffix}",
            clean.replace(' ', "-").to_lowercase()
        ),
        format!("site:linkedin.com/in {first_word}{suffix}"),
    ]
}

/// Person name from a profile URL: the slug after `/in/`, dashes to spaces,
/// title-cased.
#[must_use]
pub fn profile_name_from_url(url: &str) -> String {
    let slug = url.rsplit("/in/").next().unwrap_or_default();
    let slug = slug
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    title_case(&slug.replace('-', " "))
}

/// Upper-case each letter that follows a non-letter, lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}
