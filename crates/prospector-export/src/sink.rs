//! Export destinations for consolidated leads.

use crate::error::Result;
use async_trait::async_trait;
use prospector_core::LeadRecord;
use std::path::{Path, PathBuf};
use tracing::info;

/// A destination for a batch of leads.
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Export `leads`, returning a sink-specific identifier (spreadsheet id,
    /// file path).
    async fn export(&self, leads: &[LeadRecord]) -> Result<String>;
}

/// Writes leads to a local file as pretty-printed JSON.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Create a sink writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LeadSink for JsonFileSink {
    fn name(&self) -> &'static str {
        "json-file"
    }

    async fn export(&self, leads: &[LeadRecord]) -> Result<String> {
        let contents = serde_json::to_string_pretty(leads)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, contents).await?;

        info!("Wrote {} lead(s) to {}", leads.len(), self.path.display());
        Ok(self.path.display().to_string())
    }
}
