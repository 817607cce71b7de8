//! Storage key derivation for recording objects.
//!
//! Layout: `recordings/{folder_label}/recording_{call_id}.mp3`. The same
//! call id always maps to the same key, which is what makes re-runs of a
//! window idempotent.

/// Local filename for a staged recording.
///
/// # Example
/// ```
/// use callvault_storage::keys::recording_filename;
///
/// assert_eq!(recording_filename("123"), "recording_123.mp3");
/// ```
pub fn recording_filename(call_id: &str) -> String {
    format!("recording_{}.mp3", call_id)
}

/// Storage key for a recording under a folder label.
///
/// # Example
/// ```
/// use callvault_storage::keys::recording_key;
///
/// let key = recording_key("july_2025", "123");
/// assert_eq!(key, "recordings/july_2025/recording_123.mp3");
/// ```
pub fn recording_key(folder_label: &str, call_id: &str) -> String {
    format!("recordings/{}/{}", folder_label, recording_filename(call_id))
}
