//! Append-only log of windows abandoned after retry exhaustion.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use callvault_core::DateWindow;

/// One permanently failed window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub window_label: String,
    pub message: String,
}

impl FailureRecord {
    pub fn new(window: &DateWindow, message: impl Into<String>) -> Self {
        FailureRecord {
            window_label: window.to_string(),
            message: message.into(),
        }
    }
}

/// Writer for the failure log file.
///
/// Each record is one appended line, `<from> to <to> - <message>`, so
/// entries from earlier runs are preserved.
#[derive(Debug, Clone)]
pub struct FailureLog {
    path: PathBuf,
}

impl FailureLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FailureLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the file when missing.
    pub async fn append(&self, record: &FailureRecord) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        let line = format!("{} - {}\n", record.window_label, record.message);
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
