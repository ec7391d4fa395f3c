//! The end-to-end lead run: search, enrich, generate, verify, export.

use crate::describe::describe_company;
use crate::error::Result;
use prospector_core::{
    AppConfig, CapabilityRegistry, ConfigError, EmailVerification, FeatureId, LeadRecord,
    Timestamp,
};
use prospector_email::{
    DnsResolver, DomainValidator, EmailGenerator, ExistenceVerifier, HunterClient,
    MailboxVerifier, NameSource, VerificationPipeline,
};
use prospector_export::{JsonFileSink, LeadSink, SheetsExporter};
use prospector_llm::{LlmProvider, OpenAiProvider};
use prospector_search::{company_domain, GoogleSearchClient, ProfileFinder, SearchHit};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Leads produced by one run and where they were exported.
#[derive(Debug)]
pub struct LeadRun {
    /// One lead per search hit, in search order
    pub leads: Vec<LeadRecord>,
    /// Sink identifier (spreadsheet id or file path), absent if export failed
    pub export_id: Option<String>,
}

/// Wires every collaborator together for a lead run.
pub struct LeadWorkflow {
    search: Arc<GoogleSearchClient>,
    profiles: ProfileFinder,
    describer: Option<Arc<dyn LlmProvider>>,
    generator: EmailGenerator,
    pipeline: VerificationPipeline,
    sink: Box<dyn LeadSink>,
    profiles_per_company: usize,
}

impl LeadWorkflow {
    /// Assemble a workflow from ready-made parts.
    ///
    /// Profiles are discovered through the same search client. Description
    /// enrichment is off until [`Self::with_describer`] is called.
    #[must_use]
    pub fn new(
        search: GoogleSearchClient,
        generator: EmailGenerator,
        pipeline: VerificationPipeline,
        sink: Box<dyn LeadSink>,
    ) -> Self {
        let search = Arc::new(search);
        Self {
            profiles: ProfileFinder::new(search.clone()),
            search,
            describer: None,
            generator,
            pipeline,
            sink,
            profiles_per_company: 3,
        }
    }

    /// Chat provider used to enrich descriptions.
    #[must_use]
    pub fn with_describer(mut self, describer: Option<Arc<dyn LlmProvider>>) -> Self {
        self.describer = describer;
        self
    }

    /// Number of profiles collected per company.
    #[must_use]
    pub fn with_profiles_per_company(mut self, count: usize) -> Self {
        self.profiles_per_company = count;
        self
    }

    /// Build a workflow from configuration and environment credentials.
    ///
    /// # Errors
    /// Fails if the search credentials are missing, or a client cannot be
    /// created. Every other missing credential only degrades its feature.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let credentials = &config.credentials;
        let registry = CapabilityRegistry::from_credentials(credentials);
        for feature in registry.degraded_features() {
            warn!(
                "{} unavailable: {}",
                feature.display_name(),
                feature.degraded_behavior()
            );
        }

        if !registry.is_feature_available(FeatureId::WebSearch) {
            let name = if credentials.search_api_key.is_none() {
                "GOOGLE_SEARCH_API_KEY"
            } else {
                "GOOGLE_SEARCH_CX"
            };
            return Err(ConfigError::MissingCredential {
                name: name.to_string(),
            }
            .into());
        }

        let search = GoogleSearchClient::with_timeout(
            credentials.search_api_key.as_deref(),
            credentials.search_cx.as_deref(),
            config.search.timeout_secs,
        )?
        .with_base_url(&config.search.base_url);

        let provider: Option<Arc<dyn LlmProvider>> = match &credentials.openai_api_key {
            Some(key) => Some(Arc::new(
                OpenAiProvider::with_model(key.as_str(), &config.names.model)?
                    .with_timeout(config.names.timeout_secs)?,
            )),
            None => None,
        };

        let names = NameSource::new(provider.clone()).with_max_tokens(config.names.max_tokens);
        let generator = EmailGenerator::new(names, config.names.count);

        let verification = &config.verification;
        let resolver = DnsResolver::new(verification.dns_timeout_secs)
            .map_err(prospector_email::EmailError::from)?;
        let verifier: Option<Arc<dyn MailboxVerifier>> = match &credentials.hunter_api_key {
            Some(key) => Some(Arc::new(
                HunterClient::with_timeout(key.as_str(), verification.http_timeout_secs)?
                    .with_base_url(&verification.verifier_base_url),
            )),
            None => None,
        };
        let pipeline = VerificationPipeline::new(
            DomainValidator::new(Arc::new(resolver)),
            ExistenceVerifier::new(verifier),
        )
        .with_concurrency(verification.concurrency);

        let export = &config.export;
        let sink: Box<dyn LeadSink> = match &credentials.sheets_token {
            Some(token) => Box::new(
                SheetsExporter::new(token.as_str())?
                    .with_base_urls(&export.sheets_base_url, &export.drive_base_url)
                    .with_share_email(export.share_email.clone()),
            ),
            None => Box::new(JsonFileSink::new(&export.output_path)),
        };

        Ok(Self::new(search, generator, pipeline, sink)
            .with_describer(provider)
            .with_profiles_per_company(config.search.profiles_per_company))
    }

    /// Name of the configured export sink.
    #[must_use]
    pub fn sink_name(&self) -> &'static str {
        self.sink.name()
    }

    /// Run the whole workflow. Never fails; problems are logged and the
    /// affected piece degrades.
    pub async fn generate_leads(&self, query: &str, location: &str, num_results: u32) -> LeadRun {
        let timestamp = Timestamp::now();
        info!("Starting lead generation process at {}", timestamp);

        let location = Some(location.trim()).filter(|l| !l.is_empty());
        let business_type = location.map(|l| format!("in {l}"));
        let hits = self
            .search
            .search(query, num_results, business_type.as_deref())
            .await;
        info!("Found {} search results", hits.len());

        let mut leads = Vec::with_capacity(hits.len());
        for hit in hits {
            leads.push(self.build_lead(hit, location, timestamp).await);
        }

        let export_id = match self.sink.export(&leads).await {
            Ok(id) => {
                info!("Leads exported via {}: {}", self.sink.name(), id);
                Some(id)
            }
            Err(e) => {
                error!("Export failed: {}", e);
                None
            }
        };

        LeadRun { leads, export_id }
    }

    async fn build_lead(
        &self,
        hit: SearchHit,
        location: Option<&str>,
        timestamp: Timestamp,
    ) -> LeadRecord {
        let company = hit.title;
        let domain = company_domain(&hit.link);
        info!("Processing company: {} ({})", company, domain);

        let description =
            describe_company(self.describer.as_deref(), &company, &hit.snippet).await;

        let candidates = self
            .generator
            .generate_candidates(&company, &domain, None)
            .await;
        let emails: Vec<EmailVerification> = self.pipeline.verify_all(&candidates).await;

        let linkedin_profiles = self
            .profiles
            .find_profiles(&company, location, self.profiles_per_company)
            .await
            .into_iter()
            .map(|p| p.profile_url)
            .collect();

        LeadRecord {
            company_name: company,
            website: hit.link,
            description,
            emails,
            linkedin_profiles,
            verification_status: LeadRecord::INITIAL_STATUS.to_string(),
            timestamp,
        }
    }
}
