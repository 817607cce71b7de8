//! Callvault Services Layer
//!
//! This crate hosts the migration workflow: the date-range driver, the
//! per-window retry wrapper, the batch processor tying the recordings
//! client and the storage backends together, and the failure log for
//! windows abandoned after retry exhaustion.

pub mod migrate;

pub use migrate::{
    FailureLog, FailureRecord, MigrateService, RunSummary, WindowOutcome, WindowSummary,
    MAX_RETRY_BACKOFF_SECS,
};
