//! Storage trait and error types shared by all backends.

use std::path::Path;

use async_trait::async_trait;
use callvault_core::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction for recording objects.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a local file under the given storage key.
    ///
    /// Returns the stored object's location: a URL for S3, a filesystem
    /// path for local storage.
    async fn upload_file(
        &self,
        local_path: &Path,
        storage_key: &str,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Check whether an object exists under the given storage key.
    ///
    /// A missing object is `Ok(false)`. Any other backend failure is an
    /// `Err`, never a "does not exist" answer.
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the backend type of this storage implementation.
    fn backend_type(&self) -> StorageBackend;
}
