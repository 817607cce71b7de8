//! Callvault Client Library
//!
//! HTTP client for the recordings source API. Fetches recording metadata
//! for a date window and downloads recording payloads into the local
//! staging area.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use callvault_core::constants::DATE_FORMAT;
use callvault_core::{DateWindow, RecordingItem, RecordingsResponse};

const API_KEY_HEADER: &str = "X-API-Key";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Client operation errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid recording URL: {0}")]
    InvalidUrl(String),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Source of recording metadata and payloads.
///
/// The production implementation talks to the recordings HTTP API.
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait RecordingSource: Send + Sync {
    /// Fetch the recordings listed for one date window.
    ///
    /// Entries are returned as decoded, malformed shapes included, so the
    /// caller can handle each item on its own.
    async fn fetch_recordings(&self, window: &DateWindow) -> ClientResult<Vec<RecordingItem>>;

    /// Download a recording payload to the destination path, streaming
    /// chunk by chunk.
    async fn download_to(&self, url: &str, dest: &Path) -> ClientResult<()>;
}

/// HTTP client for the recordings API
#[derive(Clone)]
pub struct RecordingsClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RecordingsClient {
    /// Create a client for the given endpoint URL and API key.
    pub fn new(endpoint: String, api_key: String) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(RecordingsClient {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl RecordingSource for RecordingsClient {
    async fn fetch_recordings(&self, window: &DateWindow) -> ClientResult<Vec<RecordingItem>> {
        let params = [
            ("fromdate", window.from.format(DATE_FORMAT).to_string()),
            ("todate", window.to.format(DATE_FORMAT).to_string()),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: RecordingsResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        Ok(body.recordings)
    }

    async fn download_to(&self, url: &str, dest: &Path) -> ClientResult<()> {
        if !url.starts_with("http") {
            return Err(ClientError::InvalidUrl(url.to_string()));
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut file = fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ClientError::Transport(e.to_string()))?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(())
    }
}
