//! Retry backoff policy for window processing.

/// Maximum backoff delay in seconds between window attempts.
///
/// Caps exponential backoff so that high attempt budgets do not produce
/// excessively long delays.
pub const MAX_RETRY_BACKOFF_SECS: u64 = 300;

/// Backoff delay in seconds after the given attempt (1-based).
#[inline]
pub(crate) fn compute_retry_backoff_seconds(attempt: u32) -> u64 {
    2_u64.saturating_pow(attempt).min(MAX_RETRY_BACKOFF_SECS)
}
