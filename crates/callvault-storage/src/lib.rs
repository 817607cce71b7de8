//! Callvault Storage Library
//!
//! This crate provides the storage abstraction for migrated recordings and
//! implementations for S3 and the local filesystem.
//!
//! # Storage key format
//!
//! All backends use the same key layout:
//!
//! - `recordings/{folder_label}/recording_{call_id}.mp3`
//!
//! Keys must not contain `..` or a leading `/`. Key derivation is
//! centralized in the `keys` module so every caller stays consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use callvault_core::StorageBackend;
pub use factory::create_storage;
pub use keys::{recording_filename, recording_key};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
