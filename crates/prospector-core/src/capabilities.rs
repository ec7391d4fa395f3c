//! Capability registry for optional external services.
//!
//! Every external collaborator except DNS is optional. The registry is
//! resolved once from the credentials at startup so components can be built
//! either with a working client or in their documented degraded mode.

use crate::config::Credentials;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identifies features that depend on an optional external service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureId {
    /// Chat-model suggestions of employee names
    NameSuggestion,
    /// Chat-model enrichment of company descriptions
    DescriptionEnrichment,
    /// Remote mailbox existence checks
    MailboxVerification,
    /// Web search for companies
    WebSearch,
    /// Profile discovery via web search
    ProfileDiscovery,
    /// Spreadsheet export
    SheetsExport,
}

impl FeatureId {
    /// Get a human-readable name for this feature.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NameSuggestion => "Name Suggestion",
            Self::DescriptionEnrichment => "Description Enrichment",
            Self::MailboxVerification => "Mailbox Verification",
            Self::WebSearch => "Web Search",
            Self::ProfileDiscovery => "Profile Discovery",
            Self::SheetsExport => "Sheets Export",
        }
    }

    /// What happens when this feature is unavailable.
    #[must_use]
    pub fn degraded_behavior(&self) -> &'static str {
        match self {
            Self::NameSuggestion => "placeholder names are used",
            Self::DescriptionEnrichment => "search snippets are used as descriptions",
            Self::MailboxVerification => "verified addresses are reported as unknown",
            Self::WebSearch => "no companies can be discovered",
            Self::ProfileDiscovery => "leads carry no profile links",
            Self::SheetsExport => "leads are written to a local JSON file",
        }
    }

    /// All features, in display order.
    #[must_use]
    pub fn all() -> &'static [FeatureId] {
        &[
            Self::NameSuggestion,
            Self::DescriptionEnrichment,
            Self::MailboxVerification,
            Self::WebSearch,
            Self::ProfileDiscovery,
            Self::SheetsExport,
        ]
    }
}

/// Registry tracking which optional features are currently available.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    enabled_features: HashSet<FeatureId>,
}

impl CapabilityRegistry {
    /// Create an empty registry (every feature degraded).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve feature availability from configured credentials.
    #[must_use]
    pub fn from_credentials(credentials: &Credentials) -> Self {
        let mut registry = Self::new();

        if credentials.openai_api_key.is_some() {
            registry.enable_feature(FeatureId::NameSuggestion);
            registry.enable_feature(FeatureId::DescriptionEnrichment);
        }
        if credentials.hunter_api_key.is_some() {
            registry.enable_feature(FeatureId::MailboxVerification);
        }
        if credentials.search_api_key.is_some() && credentials.search_cx.is_some() {
            registry.enable_feature(FeatureId::WebSearch);
            registry.enable_feature(FeatureId::ProfileDiscovery);
        }
        if credentials.sheets_token.is_some() {
            registry.enable_feature(FeatureId::SheetsExport);
        }

        registry
    }

    /// Check if a feature is currently available.
    #[must_use]
    pub fn is_feature_available(&self, feature: FeatureId) -> bool {
        self.enabled_features.contains(&feature)
    }

    /// Enable a feature.
    pub fn enable_feature(&mut self, feature: FeatureId) {
        tracing::debug!("Enabling feature: {:?}", feature);
        self.enabled_features.insert(feature);
    }

    /// Disable a feature.
    pub fn disable_feature(&mut self, feature: FeatureId) {
        tracing::debug!("Disabling feature: {:?}", feature);
        self.enabled_features.remove(&feature);
    }

    /// Features that will run in degraded mode, in display order.
    #[must_use]
    pub fn degraded_features(&self) -> Vec<FeatureId> {
        FeatureId::all()
            .iter()
            .copied()
            .filter(|f| !self.is_feature_available(*f))
            .collect()
    }
}
