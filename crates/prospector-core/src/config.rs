//! Configuration management for Prospector.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Secrets never live in the config file;
//! they are read from the environment into [`Credentials`].

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/prospector/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Name suggestion settings
    pub names: NameConfig,
    /// Email verification settings
    pub verification: VerificationConfig,
    /// Web search and profile discovery settings
    pub search: SearchConfig,
    /// Lead export settings
    pub export: ExportConfig,
    /// Credentials for the external services (environment only)
    #[serde(skip)]
    pub credentials: Credentials,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides and credentials.
    ///
    /// Supports the following environment variables:
    /// - `PROSPECTOR_NAME_COUNT`: number of names to request per company
    /// - `PROSPECTOR_VERIFY_CONCURRENCY`: addresses verified in parallel
    /// - `PROSPECTOR_DNS_TIMEOUT_SECS`: MX lookup timeout
    /// - `PROSPECTOR_OUTPUT_PATH`: JSON export path
    /// - `SHARE_EMAIL`: address the exported spreadsheet is shared with
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.credentials = Credentials::from_env();
        Ok(config)
    }

    /// Apply `PROSPECTOR_*` overrides using the given variable lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(count) = lookup("PROSPECTOR_NAME_COUNT").and_then(|v| v.parse().ok()) {
            self.names.count = count;
            tracing::debug!("Override names.count from env: {}", count);
        }

        if let Some(concurrency) =
            lookup("PROSPECTOR_VERIFY_CONCURRENCY").and_then(|v| v.parse().ok())
        {
            self.verification.concurrency = concurrency;
            tracing::debug!("Override verification.concurrency from env: {}", concurrency);
        }

        if let Some(secs) = lookup("PROSPECTOR_DNS_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.verification.dns_timeout_secs = secs;
            tracing::debug!("Override verification.dns_timeout_secs from env: {}", secs);
        }

        if let Some(path) = lookup("PROSPECTOR_OUTPUT_PATH").filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Override export.output_path from env: {}", path);
            self.export.output_path = PathBuf::from(path);
        }

        if let Some(email) = lookup("SHARE_EMAIL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
        {
            tracing::debug!("Override export.share_email from env: {}", email);
            self.export.share_email = Some(email);
        }
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/prospector/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "prospector", "prospector")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Name suggestion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NameConfig {
    /// Names requested per company
    pub count: usize,
    /// Chat model used for suggestions
    pub model: String,
    /// Maximum tokens in the suggestion response
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for NameConfig {
    fn default() -> Self {
        Self {
            count: 3,
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 100,
            timeout_secs: 30,
        }
    }
}

/// Email verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// MX lookup timeout in seconds
    pub dns_timeout_secs: u64,
    /// Mailbox verifier request timeout in seconds
    pub http_timeout_secs: u64,
    /// Mailbox verifier API base URL
    pub verifier_base_url: String,
    /// Addresses verified in parallel (1 = sequential)
    pub concurrency: usize,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            dns_timeout_secs: 5,
            http_timeout_secs: 10,
            verifier_base_url: "https://api.hunter.io/v2".to_string(),
            concurrency: 1,
        }
    }
}

/// Web search and profile discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search API base URL
    pub base_url: String,
    /// Search hits requested when the caller does not say
    pub num_results: u32,
    /// Profiles collected per company
    pub profiles_per_company: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com".to_string(),
            num_results: 5,
            profiles_per_company: 3,
            timeout_secs: 10,
        }
    }
}

/// Lead export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Sheets API base URL
    pub sheets_base_url: String,
    /// Drive API base URL (used for sharing)
    pub drive_base_url: String,
    /// Address the exported spreadsheet is shared with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_email: Option<String>,
    /// Path of the JSON export used when no sheets token is configured
    pub output_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheets_base_url: "https://sheets.googleapis.com/v4".to_string(),
            drive_base_url: "https://www.googleapis.com/drive/v3".to_string(),
            share_email: None,
            output_path: PathBuf::from("leads.json"),
        }
    }
}

/// Credentials for the external services.
///
/// Every field is optional; an absent credential puts the matching
/// component into its degraded mode rather than failing the run.
#[derive(Clone, Default)]
pub struct Credentials {
    /// Chat completion key used for name suggestions and descriptions
    pub openai_api_key: Option<String>,
    /// Mailbox verifier key
    pub hunter_api_key: Option<String>,
    /// Custom search key
    pub search_api_key: Option<String>,
    /// Custom search engine id
    pub search_cx: Option<String>,
    /// Bearer token for the Sheets and Drive APIs
    pub sheets_token: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary lookup. Blank values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            openai_api_key: get("OPENAI_API_KEY"),
            hunter_api_key: get("HUNTER_IO_API_KEY"),
            search_api_key: get("GOOGLE_SEARCH_API_KEY"),
            search_cx: get("GOOGLE_SEARCH_CX"),
            sheets_token: get("GOOGLE_SHEETS_TOKEN"),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("openai_api_key", &mask(&self.openai_api_key))
            .field("hunter_api_key", &mask(&self.hunter_api_key))
            .field("search_api_key", &mask(&self.search_api_key))
            .field("search_cx", &mask(&self.search_cx))
            .field("sheets_token", &mask(&self.sheets_token))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.names.count, 3);
        assert_eq!(config.names.max_tokens, 100);
        assert_eq!(config.verification.dns_timeout_secs, 5);
        assert_eq!(config.verification.concurrency, 1);
        assert_eq!(config.search.num_results, 5);
        assert_eq!(config.search.profiles_per_company, 3);
        assert!(config.credentials.hunter_api_key.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[names]"));
        assert!(toml_str.contains("[verification]"));
        assert!(!toml_str.contains("credentials"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.names.model, config.names.model);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.names.count = 5;
        config.verification.concurrency = 4;
        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(loaded.names.count, 5);
        assert_eq!(loaded.verification.concurrency, 4);
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let err = AppConfig::load_from(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PROSPECTOR_NAME_COUNT", "6"),
            ("PROSPECTOR_VERIFY_CONCURRENCY", "not-a-number"),
            ("PROSPECTOR_OUTPUT_PATH", "/tmp/out.json"),
        ]);

        let mut config = AppConfig::default();
        config.apply_env(|name| vars.get(name).map(|v| (*v).to_string()));

        assert_eq!(config.names.count, 6);
        // Unparseable values are ignored
        assert_eq!(config.verification.concurrency, 1);
        assert_eq!(config.export.output_path, PathBuf::from("/tmp/out.json"));
    }

    #[test]
    fn test_share_email_from_file_and_env() {
        let config: AppConfig = toml::from_str(
            r#"
[export]
share_email = "owner@example.com"
output_path = "out/leads.json"
"#,
        )
        .expect("parse export section");
        assert_eq!(config.export.share_email.as_deref(), Some("owner@example.com"));
        assert_eq!(config.export.output_path, PathBuf::from("out/leads.json"));

        let mut overridden = config.clone();
        overridden
            .apply_env(|name| (name == "SHARE_EMAIL").then(|| " ops@example.com ".to_string()));
        assert_eq!(overridden.export.share_email.as_deref(), Some("ops@example.com"));

        let mut blank = config;
        blank.apply_env(|name| (name == "SHARE_EMAIL").then(String::new));
        assert_eq!(blank.export.share_email.as_deref(), Some("owner@example.com"));
    }

    #[test]
    fn test_credentials_blank_values_are_absent() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("OPENAI_API_KEY", "  "),
            ("HUNTER_IO_API_KEY", "hk-123"),
        ]);

        let creds = Credentials::from_lookup(|name| vars.get(name).map(|v| (*v).to_string()));
        assert!(creds.openai_api_key.is_none());
        assert_eq!(creds.hunter_api_key.as_deref(), Some("hk-123"));
        assert!(creds.search_cx.is_none());
    }

    #[test]
    fn test_credentials_debug_masks_secrets() {
        let creds = Credentials {
            hunter_api_key: Some("secret-key".to_string()),
            ..Credentials::default()
        };
        let debug = format!("{creds:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<set>"));
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[names]
count = 4

[verification]
concurrency = 8
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.names.count, 4);
        assert_eq!(config.verification.concurrency, 8);
        // These should be defaults
        assert_eq!(config.names.model, "gpt-3.5-turbo");
        assert_eq!(config.verification.http_timeout_secs, 10);
        assert_eq!(config.export.output_path, PathBuf::from("leads.json"));
        assert!(config.export.share_email.is_none());
    }
}
