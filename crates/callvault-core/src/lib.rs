//! Callvault Core Library
//!
//! This crate provides the domain models, configuration, and shared types
//! used by the recording-migration components.

pub mod config;
pub mod constants;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, MigrationConfig};
pub use models::{
    DateWindow, RecordingItem, RecordingMetadata, RecordingRecord, RecordingsResponse,
};
pub use storage_types::StorageBackend;
