//! Google Sheets export through the Sheets v4 and Drive v3 REST APIs.

use crate::error::{ExportError, Result};
use crate::row::sheet_values;
use crate::sink::LeadSink;
use async_trait::async_trait;
use prospector_core::{LeadRecord, Timestamp};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

/// Default Sheets API root.
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";
/// Default Drive API root.
pub const DEFAULT_DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

const VALUES_RANGE: &str = "Sheet1!A1";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedSpreadsheet {
    spreadsheet_id: String,
}

/// Writes leads into a freshly created spreadsheet.
pub struct SheetsExporter {
    token: String,
    sheets_base_url: String,
    drive_base_url: String,
    share_with: Option<String>,
    client: Client,
}

impl SheetsExporter {
    /// Create an exporter authenticating with a pre-issued bearer token.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            token: token.into(),
            sheets_base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            drive_base_url: DEFAULT_DRIVE_BASE_URL.to_string(),
            share_with: None,
            client,
        })
    }

    /// Override both API roots.
    #[must_use]
    pub fn with_base_urls(mut self, sheets: impl Into<String>, drive: impl Into<String>) -> Self {
        self.sheets_base_url = sheets.into().trim_end_matches('/').to_string();
        self.drive_base_url = drive.into().trim_end_matches('/').to_string();
        self
    }

    /// Share every exported spreadsheet with `email`.
    #[must_use]
    pub fn with_share_email(mut self, email: Option<String>) -> Self {
        self.share_with = email.filter(|e| !e.trim().is_empty());
        self
    }

    /// Create an empty spreadsheet and return its id.
    pub async fn create_spreadsheet(&self, title: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/spreadsheets", self.sheets_base_url))
            .bearer_auth(&self.token)
            .json(&json!({ "properties": { "title": title } }))
            .send()
            .await?;

        let created: CreatedSpreadsheet = check_status("Sheets", response)
            .await?
            .json()
            .await
            .map_err(|e| ExportError::Parse(e.to_string()))?;

        debug!("Created spreadsheet {} ({})", created.spreadsheet_id, title);
        Ok(created.spreadsheet_id)
    }

    /// Write the header and lead rows starting at `Sheet1!A1`.
    pub async fn write_rows(&self, spreadsheet_id: &str, leads: &[LeadRecord]) -> Result<()> {
        let values = sheet_values(leads);
        let row_count = values.len();
        let response = self
            .client
            .put(format!(
                "{}/spreadsheets/{}/values/{}",
                self.sheets_base_url, spreadsheet_id, VALUES_RANGE
            ))
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({
                "range": VALUES_RANGE,
                "majorDimension": "ROWS",
                "values": values,
            }))
            .send()
            .await?;

        check_status("Sheets", response).await?;
        debug!("Wrote {} row(s) to {}", row_count, spreadsheet_id);
        Ok(())
    }

    /// Grant `email` writer access to the spreadsheet.
    pub async fn share(&self, spreadsheet_id: &str, email: &str) -> Result<()> {
        let response = self
            .client
            .post(format!(
                "{}/files/{}/permissions",
                self.drive_base_url, spreadsheet_id
            ))
            .bearer_auth(&self.token)
            .json(&json!({
                "type": "user",
                "role": "writer",
                "emailAddress": email,
            }))
            .send()
            .await?;

        check_status("Drive", response).await?;
        info!("Spreadsheet {} shared with {}", spreadsheet_id, email);
        Ok(())
    }
}

#[async_trait]
impl LeadSink for SheetsExporter {
    fn name(&self) -> &'static str {
        "google-sheets"
    }

    async fn export(&self, leads: &[LeadRecord]) -> Result<String> {
        let title = format!("Lead Export - {}", Timestamp::now().format("%Y-%m-%d %H:%M"));
        let spreadsheet_id = self.create_spreadsheet(&title).await?;
        self.write_rows(&spreadsheet_id, leads).await?;

        if let Some(email) = &self.share_with {
            self.share(&spreadsheet_id, email).await?;
        }

        Ok(spreadsheet_id)
    }
}

async fn check_status(api: &'static str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ExportError::Api {
        api,
        status: status.as_u16(),
        message,
    })
}
