//! Sheet webhook archive client.
//!
//! The webhook is an opaque spreadsheet-backed endpoint: `GET` returns the
//! history log as raw JSON text, `POST` appends one record. Appends are
//! dispatched on a detached task and never awaited by the response path.

use crate::models::HistoryRecord;
use reqwest::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Archive webhook not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),
}

/// Client for the archive webhook.
#[derive(Clone)]
pub struct SheetArchive {
    webhook_url: Option<String>,
    client: Client,
}

impl SheetArchive {
    pub fn new(webhook_url: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            webhook_url,
            client,
        }
    }

    /// Read the raw history log. The webhook's body passes through verbatim,
    /// whatever its status; only transport failures surface as errors.
    pub async fn read_history(&self) -> Result<String, ArchiveError> {
        let url = self
            .webhook_url
            .as_ref()
            .ok_or(ArchiveError::NotConfigured)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ArchiveError::Network(e.to_string()))?;

        response
            .text()
            .await
            .map_err(|e| ArchiveError::Network(e.to_string()))
    }

    /// Append a record asynchronously (non-blocking). Failures are logged
    /// and swallowed; the caller's response never depends on the outcome.
    pub fn record_async(&self, record: HistoryRecord) {
        let Some(url) = self.webhook_url.clone() else {
            tracing::debug!(song = %record.song, "Archive webhook not configured, skipping");
            return;
        };
        let client = self.client.clone();

        tokio::spawn(async move {
            let body = match serde_json::to_string(&record) {
                Ok(body) => body,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to encode history record");
                    return;
                }
            };

            // text/plain keeps Apps Script receivers from demanding a CORS
            // preflight; they parse the JSON body themselves.
            let result = client
                .post(&url)
                .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
                .body(body)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    tracing::info!(song = %record.song, "Preset archived to sheet");
                }
                Ok(response) => {
                    tracing::warn!(
                        song = %record.song,
                        status = %response.status(),
                        "Archive webhook rejected record"
                    );
                }
                Err(e) => {
                    tracing::warn!(song = %record.song, error = %e, "Failed to archive preset");
                }
            }
        });
    }
}
