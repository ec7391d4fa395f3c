//! Google Custom Search JSON API client.

use crate::error::{Result, SearchError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

/// Default Google APIs root.
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.googleapis.com";

/// Most hits the API returns for a single request.
pub const MAX_PAGE_SIZE: u32 = 10;

/// Most hits the API serves for one query across all pages.
pub const MAX_RESULTS: u32 = 100;

/// One organic search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result title
    pub title: String,
    /// Result URL
    pub link: String,
    /// Result snippet
    pub snippet: String,
    /// Host of `link`, empty if it has none
    pub domain: String,
}

/// Anything that can run a raw web query.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run `query` and return up to `num_results` hits.
    ///
    /// # Errors
    /// Returns error on transport, status or parse failure.
    async fn query(&self, query: &str, num_results: u32) -> Result<Vec<SearchHit>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

impl From<SearchItem> for SearchHit {
    fn from(item: SearchItem) -> Self {
        let domain = link_host(&item.link);
        Self {
            title: item.title,
            link: item.link,
            snippet: item.snippet,
            domain,
        }
    }
}

/// Client for the Custom Search `v1` endpoint.
pub struct GoogleSearchClient {
    api_key: String,
    cx: String,
    base_url: String,
    client: Client,
}

impl GoogleSearchClient {
    /// Create a client. Both credentials are mandatory.
    ///
    /// # Errors
    /// Returns [`SearchError::MissingCredentials`] if either value is absent
    /// or blank.
    pub fn new(api_key: Option<&str>, cx: Option<&str>) -> Result<Self> {
        Self::with_timeout(api_key, cx, 10)
    }

    /// Create a client with an explicit request timeout.
    ///
    /// # Errors
    /// Returns [`SearchError::MissingCredentials`] if either value is absent
    /// or blank, or an error if the HTTP client cannot be created.
    pub fn with_timeout(
        api_key: Option<&str>,
        cx: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let (Some(api_key), Some(cx)) = (non_blank(api_key), non_blank(cx)) else {
            return Err(SearchError::MissingCredentials);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            api_key: api_key.to_string(),
            cx: cx.to_string(),
            base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            client,
        })
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Search for businesses, optionally narrowed by `business_type`.
    ///
    /// The query sent is `"{query} {business_type}"`. Failures are logged and
    /// reported as no results.
    pub async fn search(
        &self,
        query: &str,
        num_results: u32,
        business_type: Option<&str>,
    ) -> Vec<SearchHit> {
        let full_query = match business_type {
            Some(kind) if !kind.is_empty() => format!("{query} {kind}"),
            _ => query.to_string(),
        };

        match self.query(&full_query, num_results).await {
            Ok(hits) => {
                debug!("Search {:?} returned {} hit(s)", full_query, hits.len());
                hits
            }
            Err(e) => {
                error!("Google Search API request failed: {}", e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl SearchBackend for GoogleSearchClient {
    /// Fetches pages of at most [`MAX_PAGE_SIZE`] hits, capped at
    /// [`MAX_RESULTS`] in total. A short page ends the query.
    async fn query(&self, query: &str, num_results: u32) -> Result<Vec<SearchHit>> {
        let wanted = num_results.min(MAX_RESULTS);
        let mut hits = Vec::new();
        let mut start = 1;

        while start <= wanted {
            let page_size = (wanted - start + 1).min(MAX_PAGE_SIZE);
            let page = self.fetch_page(query, start, page_size).await?;
            let exhausted = page.len() < page_size as usize;
            hits.extend(page);
            if exhausted {
                break;
            }
            start += page_size;
        }

        hits.truncate(wanted as usize);
        Ok(hits)
    }
}

impl GoogleSearchClient {
    async fn fetch_page(&self, query: &str, start: u32, num: u32) -> Result<Vec<SearchHit>> {
        let url = format!("{}/customsearch/v1", self.base_url);
        let start = start.to_string();
        let num = num.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cx.as_str()),
                ("q", query),
                ("start", start.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Search API returned {} for {:?}", status, query);
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        Ok(body.items.into_iter().map(SearchHit::from).collect())
    }
}

/// Host of `link`, or an empty string.
#[must_use]
pub fn link_host(link: &str) -> String {
    Url::parse(link)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_default()
}

/// Mail domain for a company website: its host without a leading `www.`.
#[must_use]
pub fn company_domain(link: &str) -> String {
    let host = link_host(link);
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
