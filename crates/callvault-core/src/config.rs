//! Configuration for the recording migration.
//!
//! All values come from the environment, with `.env` support via dotenvy.
//! A required value missing at startup produces an error before any window
//! is processed.

use std::env;
use std::path::{Path, PathBuf};

use crate::storage_types::StorageBackend;

const DEFAULT_RECORDINGS_API_URL: &str = "https://apithunder.makecontact.space/GetRecording";
const DEFAULT_STAGING_DIR: &str = ".";
const DEFAULT_FAILURE_LOG_PATH: &str = "failed_batches.log";
const DEFAULT_MAX_RETRY_ATTEMPTS: u32 = 3;

/// Migration settings sourced from the environment.
#[derive(Clone, Debug)]
pub struct MigrationConfig {
    /// Recordings endpoint, POSTed with `fromdate`/`todate` form fields.
    pub recordings_api_url: String,
    /// API key sent in the `X-API-Key` header. Read from
    /// `RECORDINGS_API_KEY`, with `CS_API_KEY` honored as a legacy alias.
    pub recordings_api_key: String,
    /// Selected storage backend; treated as S3 when unset.
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible providers.
    pub s3_endpoint: Option<String>,
    /// Destination directory for the local backend.
    pub local_storage_path: Option<String>,
    /// Scratch directory downloads land in before upload.
    pub staging_dir: PathBuf,
    /// Append-only log of windows abandoned after retry exhaustion.
    pub failure_log_path: PathBuf,
    /// Attempt budget per window, including the first attempt.
    pub max_retry_attempts: u32,
}

/// Shared configuration handle passed to the storage factory and service
/// wiring.
#[derive(Clone, Debug)]
pub struct Config(pub Box<MigrationConfig>);

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(Config(Box::new(MigrationConfig::from_env()?)))
    }

    pub fn as_migration(&self) -> &MigrationConfig {
        &self.0
    }

    pub fn recordings_api_url(&self) -> &str {
        &self.0.recordings_api_url
    }

    pub fn recordings_api_key(&self) -> &str {
        &self.0.recordings_api_key
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.0.storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.0.s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.0.s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.0.s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.0.local_storage_path.as_deref()
    }

    pub fn staging_dir(&self) -> &Path {
        &self.0.staging_dir
    }

    pub fn failure_log_path(&self) -> &Path {
        &self.0.failure_log_path
    }

    pub fn max_retry_attempts(&self) -> u32 {
        self.0.max_retry_attempts
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.0.validate()
    }
}

impl MigrationConfig {
    /// Loads configuration from environment variables, reading a `.env`
    /// file first when present.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let recordings_api_url = env::var("RECORDINGS_API_URL")
            .unwrap_or_else(|_| DEFAULT_RECORDINGS_API_URL.to_string());

        let recordings_api_key = env::var("RECORDINGS_API_KEY")
            .or_else(|_| env::var("CS_API_KEY"))
            .map_err(|_| anyhow::anyhow!("RECORDINGS_API_KEY must be set"))?;

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .and_then(|s| s.parse::<StorageBackend>().ok());

        let s3_bucket = env::var("S3_BUCKET")
            .or_else(|_| env::var("BUCKET_NAME"))
            .ok();
        let s3_region = env::var("S3_REGION")
            .or_else(|_| env::var("AWS_REGION"))
            .or_else(|_| env::var("REGION_NAME"))
            .ok();
        let s3_endpoint = env::var("S3_ENDPOINT").ok();
        let local_storage_path = env::var("LOCAL_STORAGE_PATH").ok();

        let staging_dir = PathBuf::from(
            env::var("STAGING_DIR").unwrap_or_else(|_| DEFAULT_STAGING_DIR.to_string()),
        );
        let failure_log_path = PathBuf::from(
            env::var("FAILURE_LOG_PATH").unwrap_or_else(|_| DEFAULT_FAILURE_LOG_PATH.to_string()),
        );

        let max_retry_attempts = env::var("MAX_RETRY_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_MAX_RETRY_ATTEMPTS.to_string())
            .parse()
            .unwrap_or(DEFAULT_MAX_RETRY_ATTEMPTS);

        let config = Self {
            recordings_api_url,
            recordings_api_key,
            storage_backend,
            s3_bucket,
            s3_region,
            s3_endpoint,
            local_storage_path,
            staging_dir,
            failure_log_path,
            max_retry_attempts,
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.recordings_api_key.is_empty() {
            return Err(anyhow::anyhow!("RECORDINGS_API_KEY must not be empty"));
        }

        if self.max_retry_attempts < 1 {
            return Err(anyhow::anyhow!("MAX_RETRY_ATTEMPTS must be at least 1"));
        }

        // Validate storage backend configuration
        let backend = self.storage_backend.unwrap_or(StorageBackend::S3);
        match backend {
            StorageBackend::S3 => {
                if self.s3_bucket.as_deref().map_or(true, str::is_empty) {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.as_deref().map_or(true, str::is_empty) {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.as_deref().map_or(true, str::is_empty) {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
