//! Recording metadata: the wire shapes returned by the recordings API and
//! the validated form used downstream.

use serde::Deserialize;

/// Response body of the recordings endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingsResponse {
    pub recordings: Vec<RecordingItem>,
}

/// One entry of the recordings array: a well-formed record, or whatever
/// else the API interleaved.
///
/// Non-object entries are kept as raw JSON so the batch processor can
/// reject them one at a time instead of failing the whole response.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecordingItem {
    Record(RecordingRecord),
    Other(serde_json::Value),
}

/// One recording entry as returned by the API.
///
/// Either field may be absent; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingRecord {
    #[serde(rename = "URL")]
    pub url: Option<String>,
    #[serde(rename = "CallId")]
    pub call_id: Option<String>,
}

/// A recording whose URL and call id are both present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingMetadata {
    pub url: String,
    pub call_id: String,
}

impl RecordingRecord {
    /// Validates the raw record, returning `None` when the URL or call id
    /// is missing or empty.
    pub fn into_metadata(self) -> Option<RecordingMetadata> {
        match (self.url, self.call_id) {
            (Some(url), Some(call_id)) if !url.is_empty() && !call_id.is_empty() => {
                Some(RecordingMetadata { url, call_id })
            }
            _ => None,
        }
    }
}
