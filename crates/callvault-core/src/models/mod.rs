//! Data models for the recording migration.
//!
//! Wire shapes returned by the recordings API, the validated form the
//! batch processor works with, and the date windows driving the loop.

mod recording;
mod window;

pub use recording::{RecordingItem, RecordingMetadata, RecordingRecord, RecordingsResponse};
pub use window::DateWindow;
