//! Recording migration workflow.

mod failure_log;
mod retry;
mod service;

pub use failure_log::{FailureLog, FailureRecord};
pub use retry::MAX_RETRY_BACKOFF_SECS;
pub use service::{MigrateService, RunSummary, WindowOutcome, WindowSummary};
