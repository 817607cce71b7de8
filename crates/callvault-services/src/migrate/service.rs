//! Migration service: date-range driver, per-window retry wrapper, and
//! the batch processor moving recordings from the source API into storage.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;
use tokio::fs;

use callvault_client::{ClientError, RecordingSource};
use callvault_core::constants::RECORDING_CONTENT_TYPE;
use callvault_core::{DateWindow, RecordingItem};
use callvault_storage::{keys, Storage};

use super::failure_log::{FailureLog, FailureRecord};
use super::retry::compute_retry_backoff_seconds;

/// Counters for one processed window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WindowSummary {
    pub fetched: usize,
    pub uploaded: usize,
    pub skipped_existing: usize,
    pub skipped_invalid: usize,
    pub download_failures: usize,
    pub upload_failures: usize,
}

/// Outcome of one window after retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowOutcome {
    /// A processing attempt ran to completion.
    Completed(WindowSummary),
    /// Every attempt failed; a failure record was written.
    Exhausted,
}

/// Totals across all windows of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub windows: usize,
    pub completed: usize,
    pub exhausted: usize,
    pub errored: usize,
    pub uploaded: usize,
}

/// Orchestrates the recording migration across a date range.
pub struct MigrateService {
    source: Arc<dyn RecordingSource>,
    storage: Arc<dyn Storage>,
    failure_log: FailureLog,
    folder_label: String,
    staging_dir: PathBuf,
    max_attempts: u32,
}

impl MigrateService {
    pub fn new(
        source: Arc<dyn RecordingSource>,
        storage: Arc<dyn Storage>,
        failure_log: FailureLog,
        folder_label: String,
        staging_dir: PathBuf,
        max_attempts: u32,
    ) -> Self {
        MigrateService {
            source,
            storage,
            failure_log,
            folder_label,
            staging_dir,
            max_attempts,
        }
    }

    /// Process every day from `start` through `end` inclusive, one window
    /// at a time. A failing window never stops the range.
    #[tracing::instrument(skip(self), fields(migrate.operation = "run"))]
    pub async fn run(&self, start: NaiveDate, end: NaiveDate) -> Result<RunSummary, anyhow::Error> {
        let mut summary = RunSummary::default();

        for window in DateWindow::days(start, end) {
            summary.windows += 1;

            match self.run_window(&window).await {
                Ok(WindowOutcome::Completed(window_summary)) => {
                    summary.completed += 1;
                    summary.uploaded += window_summary.uploaded;
                }
                Ok(WindowOutcome::Exhausted) => {
                    summary.exhausted += 1;
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        window = %window,
                        "Window failed outside retry handling, continuing"
                    );
                    summary.errored += 1;
                }
            }
        }

        tracing::info!(
            windows = summary.windows,
            completed = summary.completed,
            exhausted = summary.exhausted,
            errored = summary.errored,
            uploaded = summary.uploaded,
            "Migration run completed"
        );

        Ok(summary)
    }

    /// Run one window with bounded exponential-backoff retries.
    ///
    /// Exhaustion appends a failure record and resolves to
    /// `Ok(WindowOutcome::Exhausted)`; the only `Err` this returns is a
    /// failure-log write fault.
    pub async fn run_window(&self, window: &DateWindow) -> Result<WindowOutcome, anyhow::Error> {
        for attempt in 1..=self.max_attempts {
            match self.process_window(window).await {
                Ok(summary) => {
                    if attempt > 1 {
                        tracing::info!(window = %window, attempt, "Window succeeded after retry");
                    }
                    return Ok(WindowOutcome::Completed(summary));
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        window = %window,
                        attempt,
                        max_attempts = self.max_attempts,
                        "Window processing attempt failed"
                    );

                    if attempt < self.max_attempts {
                        let backoff_seconds = compute_retry_backoff_seconds(attempt);
                        tracing::info!(
                            window = %window,
                            backoff_seconds,
                            "Retrying window after backoff"
                        );
                        tokio::time::sleep(Duration::from_secs(backoff_seconds)).await;
                    }
                }
            }
        }

        let record = FailureRecord::new(
            window,
            format!("Failed after {} attempts", self.max_attempts),
        );
        self.failure_log.append(&record).await.with_context(|| {
            format!(
                "Failed to write failure log {}",
                self.failure_log.path().display()
            )
        })?;

        tracing::error!(
            window = %window,
            attempts = self.max_attempts,
            failure_log = %self.failure_log.path().display(),
            "Window abandoned after exhausting retries"
        );

        Ok(WindowOutcome::Exhausted)
    }

    /// One processing attempt for one window: fetch the metadata, then
    /// dedupe-download-upload-clean each recording. A single item's
    /// failure, malformed shapes included, never aborts the batch;
    /// completing the loop is the only success condition.
    #[tracing::instrument(skip(self), fields(migrate.operation = "process_window"))]
    async fn process_window(&self, window: &DateWindow) -> Result<WindowSummary, anyhow::Error> {
        let mut summary = WindowSummary::default();

        let items = match self.source.fetch_recordings(window).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    window = %window,
                    "Failed to fetch recordings, treating window as empty"
                );
                return Ok(summary);
            }
        };

        if items.is_empty() {
            tracing::info!(window = %window, "No recordings in window");
            return Ok(summary);
        }

        summary.fetched = items.len();

        fs::create_dir_all(&self.staging_dir).await.with_context(|| {
            format!(
                "Failed to create staging directory {}",
                self.staging_dir.display()
            )
        })?;

        for item in items {
            let record = match item {
                RecordingItem::Record(record) => record,
                RecordingItem::Other(value) => {
                    tracing::warn!(
                        window = %window,
                        item = %value,
                        "Unexpected item in recordings response, skipping"
                    );
                    summary.skipped_invalid += 1;
                    continue;
                }
            };

            let metadata = match record.into_metadata() {
                Some(metadata) => metadata,
                None => {
                    tracing::warn!(window = %window, "Recording missing URL or call id, skipping");
                    summary.skipped_invalid += 1;
                    continue;
                }
            };

            if !metadata.url.starts_with("http") {
                tracing::warn!(
                    window = %window,
                    call_id = %metadata.call_id,
                    url = %metadata.url,
                    "Recording URL has unrecognized scheme, skipping"
                );
                summary.skipped_invalid += 1;
                continue;
            }

            // call_id becomes one key and filename segment
            if metadata.call_id.contains("..") || metadata.call_id.contains('/') {
                tracing::warn!(
                    window = %window,
                    call_id = %metadata.call_id,
                    "Recording call id is not a safe key segment, skipping"
                );
                summary.skipped_invalid += 1;
                continue;
            }

            let storage_key = keys::recording_key(&self.folder_label, &metadata.call_id);

            let already_stored = self
                .storage
                .exists(&storage_key)
                .await
                .with_context(|| format!("Failed to check existence of {}", storage_key))?;
            if already_stored {
                tracing::debug!(
                    key = %storage_key,
                    call_id = %metadata.call_id,
                    "Recording already stored, skipping"
                );
                summary.skipped_existing += 1;
                continue;
            }

            let staging_path = self
                .staging_dir
                .join(keys::recording_filename(&metadata.call_id));

            match self.source.download_to(&metadata.url, &staging_path).await {
                Ok(()) => {}
                Err(ClientError::Io(e)) => {
                    return Err(anyhow::Error::new(e).context(format!(
                        "Failed to write staging file {}",
                        staging_path.display()
                    )));
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        call_id = %metadata.call_id,
                        url = %metadata.url,
                        "Failed to download recording, skipping"
                    );
                    summary.download_failures += 1;
                    continue;
                }
            }

            match self
                .storage
                .upload_file(&staging_path, &storage_key, RECORDING_CONTENT_TYPE)
                .await
            {
                Ok(location) => {
                    fs::remove_file(&staging_path).await.with_context(|| {
                        format!("Failed to remove staging file {}", staging_path.display())
                    })?;
                    tracing::debug!(
                        key = %storage_key,
                        call_id = %metadata.call_id,
                        location = %location,
                        "Recording uploaded"
                    );
                    summary.uploaded += 1;
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        key = %storage_key,
                        call_id = %metadata.call_id,
                        staging_path = %staging_path.display(),
                        "Failed to upload recording, keeping staging file and continuing"
                    );
                    summary.upload_failures += 1;
                }
            }
        }

        tracing::info!(
            window = %window,
            fetched = summary.fetched,
            uploaded = summary.uploaded,
            skipped_existing = summary.skipped_existing,
            skipped_invalid = summary.skipped_invalid,
            download_failures = summary.download_failures,
            upload_failures = summary.upload_failures,
            "Window processing completed"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tempfile::{tempdir, TempDir};

    use callvault_client::ClientResult;
    use callvault_core::{RecordingRecord, StorageBackend};
    use callvault_storage::{LocalStorage, StorageError, StorageResult};

    struct MockSource {
        recordings: Vec<RecordingItem>,
        payload: Vec<u8>,
        fail_fetch: bool,
        fail_download: bool,
        download_calls: Mutex<Vec<String>>,
    }

    impl MockSource {
        fn with_recordings(recordings: Vec<RecordingItem>) -> Self {
            MockSource {
                recordings,
                payload: b"mp3 payload".to_vec(),
                fail_fetch: false,
                fail_download: false,
                download_calls: Mutex::new(Vec::new()),
            }
        }

        fn record(url: &str, call_id: &str) -> RecordingItem {
            RecordingItem::Record(RecordingRecord {
                url: Some(url.to_string()),
                call_id: Some(call_id.to_string()),
            })
        }

        fn download_calls(&self) -> Vec<String> {
            self.download_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecordingSource for MockSource {
        async fn fetch_recordings(
            &self,
            _window: &DateWindow,
        ) -> ClientResult<Vec<RecordingItem>> {
            if self.fail_fetch {
                return Err(ClientError::Transport("connection refused".to_string()));
            }
            Ok(self.recordings.clone())
        }

        async fn download_to(&self, url: &str, dest: &Path) -> ClientResult<()> {
            self.download_calls.lock().unwrap().push(url.to_string());
            if self.fail_download {
                return Err(ClientError::Status {
                    status: 500,
                    body: "server error".to_string(),
                });
            }
            tokio::fs::write(dest, &self.payload).await?;
            Ok(())
        }
    }

    struct FailingStorage {
        exists_calls: AtomicUsize,
    }

    impl FailingStorage {
        fn new() -> Self {
            FailingStorage {
                exists_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Storage for FailingStorage {
        async fn upload_file(
            &self,
            _local_path: &Path,
            _storage_key: &str,
            _content_type: &str,
        ) -> StorageResult<String> {
            Err(StorageError::UploadFailed("upload not expected".to_string()))
        }

        async fn exists(&self, _storage_key: &str) -> StorageResult<bool> {
            self.exists_calls.fetch_add(1, Ordering::SeqCst);
            Err(StorageError::BackendError("injected failure".to_string()))
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Local
        }
    }

    struct FlakyStorage {
        inner: LocalStorage,
        exists_failures: AtomicUsize,
        exists_calls: AtomicUsize,
    }

    impl FlakyStorage {
        fn failing_times(inner: LocalStorage, failures: usize) -> Self {
            FlakyStorage {
                inner,
                exists_failures: AtomicUsize::new(failures),
                exists_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Storage for FlakyStorage {
        async fn upload_file(
            &self,
            local_path: &Path,
            storage_key: &str,
            content_type: &str,
        ) -> StorageResult<String> {
            self.inner
                .upload_file(local_path, storage_key, content_type)
                .await
        }

        async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
            self.exists_calls.fetch_add(1, Ordering::SeqCst);
            let remaining = self.exists_failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.exists_failures.store(remaining - 1, Ordering::SeqCst);
                return Err(StorageError::BackendError("injected failure".to_string()));
            }
            self.inner.exists(storage_key).await
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Local
        }
    }

    struct RejectingUploadStorage;

    #[async_trait]
    impl Storage for RejectingUploadStorage {
        async fn upload_file(
            &self,
            _local_path: &Path,
            _storage_key: &str,
            _content_type: &str,
        ) -> StorageResult<String> {
            Err(StorageError::UploadFailed("injected failure".to_string()))
        }

        async fn exists(&self, _storage_key: &str) -> StorageResult<bool> {
            Ok(false)
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Local
        }
    }

    struct Fixture {
        staging: TempDir,
        log_dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                staging: tempdir().unwrap(),
                log_dir: tempdir().unwrap(),
            }
        }

        fn service(
            &self,
            source: Arc<dyn RecordingSource>,
            storage: Arc<dyn Storage>,
            max_attempts: u32,
        ) -> MigrateService {
            MigrateService::new(
                source,
                storage,
                FailureLog::new(self.log_path()),
                "july_2025".to_string(),
                self.staging.path().to_path_buf(),
                max_attempts,
            )
        }

        fn log_path(&self) -> PathBuf {
            self.log_dir.path().join("failed_batches.log")
        }

        fn staging_file(&self, call_id: &str) -> PathBuf {
            self.staging
                .path()
                .join(format!("recording_{}.mp3", call_id))
        }

        async fn log_contents(&self) -> Option<String> {
            tokio::fs::read_to_string(self.log_path()).await.ok()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window() -> DateWindow {
        DateWindow::single_day(date(2025, 7, 7)).unwrap()
    }

    fn completed(outcome: WindowOutcome) -> WindowSummary {
        match outcome {
            WindowOutcome::Completed(summary) => summary,
            WindowOutcome::Exhausted => panic!("expected a completed window"),
        }
    }

    #[tokio::test]
    async fn empty_window_is_noop_success() {
        let fixture = Fixture::new();
        let store = tempdir().unwrap();
        let source = Arc::new(MockSource::with_recordings(Vec::new()));
        let storage = Arc::new(LocalStorage::new(store.path()).await.unwrap());
        let service = fixture.service(source, storage, 3);

        let summary = completed(service.run_window(&window()).await.unwrap());

        assert_eq!(summary, WindowSummary::default());
        assert!(fixture.log_contents().await.is_none());
    }

    #[tokio::test]
    async fn fetch_failure_is_treated_as_empty_window() {
        let fixture = Fixture::new();
        let store = tempdir().unwrap();
        let mut source = MockSource::with_recordings(vec![MockSource::record(
            "http://example.com/a.mp3",
            "123",
        )]);
        source.fail_fetch = true;
        let storage = Arc::new(LocalStorage::new(store.path()).await.unwrap());
        let service = fixture.service(Arc::new(source), storage, 3);

        let summary = completed(service.run_window(&window()).await.unwrap());

        assert_eq!(summary, WindowSummary::default());
        assert!(fixture.log_contents().await.is_none());
    }

    #[tokio::test]
    async fn happy_path_uploads_and_cleans_staging() {
        let fixture = Fixture::new();
        let store = tempdir().unwrap();
        let source = Arc::new(MockSource::with_recordings(vec![MockSource::record(
            "http://example.com/a.mp3",
            "123",
        )]));
        let storage = Arc::new(LocalStorage::new(store.path()).await.unwrap());
        let service = fixture.service(source.clone(), storage, 3);

        let summary = completed(service.run_window(&window()).await.unwrap());

        assert_eq!(summary.fetched, 1);
        assert_eq!(summary.uploaded, 1);
        assert_eq!(source.download_calls(), vec!["http://example.com/a.mp3"]);

        let stored = store
            .path()
            .join("recordings/july_2025/recording_123.mp3");
        assert_eq!(tokio::fs::read(&stored).await.unwrap(), b"mp3 payload");
        assert!(!fixture.staging_file("123").exists());
        assert!(fixture.log_contents().await.is_none());
    }

    #[tokio::test]
    async fn existing_recording_skips_download_and_upload() {
        let fixture = Fixture::new();
        let store = tempdir().unwrap();
        let stored = store
            .path()
            .join("recordings/july_2025/recording_123.mp3");
        tokio::fs::create_dir_all(stored.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(&stored, b"previously uploaded")
            .await
            .unwrap();

        let source = Arc::new(MockSource::with_recordings(vec![MockSource::record(
            "http://example.com/a.mp3",
            "123",
        )]));
        let storage = Arc::new(LocalStorage::new(store.path()).await.unwrap());
        let service = fixture.service(source.clone(), storage, 3);

        let summary = completed(service.run_window(&window()).await.unwrap());

        assert_eq!(summary.skipped_existing, 1);
        assert_eq!(summary.uploaded, 0);
        assert!(source.download_calls().is_empty());
        assert_eq!(
            tokio::fs::read(&stored).await.unwrap(),
            b"previously uploaded"
        );
    }

    #[tokio::test]
    async fn invalid_records_are_skipped_in_isolation() {
        let fixture = Fixture::new();
        let store = tempdir().unwrap();
        let source = Arc::new(MockSource::with_recordings(vec![
            RecordingItem::Record(RecordingRecord {
                url: Some("http://example.com/no-id.mp3".to_string()),
                call_id: None,
            }),
            MockSource::record("file:///local/b.mp3", "456"),
            MockSource::record("http://example.com/c.mp3", "789"),
        ]));
        let storage = Arc::new(LocalStorage::new(store.path()).await.unwrap());
        let service = fixture.service(source, storage, 3);

        let summary = completed(service.run_window(&window()).await.unwrap());

        assert_eq!(summary.fetched, 3);
        assert_eq!(summary.skipped_invalid, 2);
        assert_eq!(summary.uploaded, 1);

        let stored = store
            .path()
            .join("recordings/july_2025/recording_789.mp3");
        assert!(stored.exists());
    }

    #[tokio::test]
    async fn unexpected_item_shape_skips_only_that_item() {
        let fixture = Fixture::new();
        let store = tempdir().unwrap();
        let source = Arc::new(MockSource::with_recordings(vec![
            RecordingItem::Other(serde_json::json!(42)),
            MockSource::record("http://example.com/a.mp3", "123"),
        ]));
        let storage = Arc::new(LocalStorage::new(store.path()).await.unwrap());
        let service = fixture.service(source.clone(), storage, 3);

        let summary = completed(service.run_window(&window()).await.unwrap());

        assert_eq!(summary.fetched, 2);
        assert_eq!(summary.skipped_invalid, 1);
        assert_eq!(summary.uploaded, 1);
        assert_eq!(source.download_calls(), vec!["http://example.com/a.mp3"]);

        let stored = store
            .path()
            .join("recordings/july_2025/recording_123.mp3");
        assert!(stored.exists());
        assert!(fixture.log_contents().await.is_none());
    }

    #[tokio::test]
    async fn unsafe_call_id_is_skipped_per_item() {
        let fixture = Fixture::new();
        let store = tempdir().unwrap();
        let source = Arc::new(MockSource::with_recordings(vec![
            MockSource::record("http://example.com/a.mp3", "../escape"),
            MockSource::record("http://example.com/b.mp3", "a/b"),
            MockSource::record("http://example.com/c.mp3", "123"),
        ]));
        let storage = Arc::new(LocalStorage::new(store.path()).await.unwrap());
        let service = fixture.service(source.clone(), storage, 3);

        let summary = completed(service.run_window(&window()).await.unwrap());

        assert_eq!(summary.fetched, 3);
        assert_eq!(summary.skipped_invalid, 2);
        assert_eq!(summary.uploaded, 1);
        assert_eq!(source.download_calls(), vec!["http://example.com/c.mp3"]);
        assert!(fixture.log_contents().await.is_none());
    }

    #[tokio::test]
    async fn download_failure_skips_item() {
        let fixture = Fixture::new();
        let store = tempdir().unwrap();
        let mut source = MockSource::with_recordings(vec![
            MockSource::record("http://example.com/a.mp3", "123"),
            MockSource::record("http://example.com/b.mp3", "456"),
        ]);
        source.fail_download = true;
        let storage = Arc::new(LocalStorage::new(store.path()).await.unwrap());
        let service = fixture.service(Arc::new(source), storage, 3);

        let summary = completed(service.run_window(&window()).await.unwrap());

        assert_eq!(summary.download_failures, 2);
        assert_eq!(summary.uploaded, 0);
        assert!(fixture.log_contents().await.is_none());
    }

    #[tokio::test]
    async fn upload_failure_keeps_staging_file() {
        let fixture = Fixture::new();
        let source = Arc::new(MockSource::with_recordings(vec![MockSource::record(
            "http://example.com/a.mp3",
            "123",
        )]));
        let service = fixture.service(source, Arc::new(RejectingUploadStorage), 3);

        let summary = completed(service.run_window(&window()).await.unwrap());

        assert_eq!(summary.upload_failures, 1);
        assert_eq!(summary.uploaded, 0);
        assert_eq!(
            tokio::fs::read(fixture.staging_file("123")).await.unwrap(),
            b"mp3 payload"
        );
        assert!(fixture.log_contents().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_writes_single_failure_record() {
        let fixture = Fixture::new();
        let source = Arc::new(MockSource::with_recordings(vec![MockSource::record(
            "http://example.com/a.mp3",
            "123",
        )]));
        let storage = Arc::new(FailingStorage::new());
        let service = fixture.service(source, storage.clone(), 3);

        let outcome = service.run_window(&window()).await.unwrap();

        assert_eq!(outcome, WindowOutcome::Exhausted);
        assert_eq!(storage.exists_calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            fixture.log_contents().await.unwrap(),
            "2025-07-07 to 2025-07-08 - Failed after 3 attempts\n"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn retry_success_midway_writes_no_failure_record() {
        let fixture = Fixture::new();
        let store = tempdir().unwrap();
        let source = Arc::new(MockSource::with_recordings(vec![MockSource::record(
            "http://example.com/a.mp3",
            "123",
        )]));
        let inner = LocalStorage::new(store.path()).await.unwrap();
        let storage = Arc::new(FlakyStorage::failing_times(inner, 2));
        let service = fixture.service(source, storage.clone(), 3);

        let summary = completed(service.run_window(&window()).await.unwrap());

        assert_eq!(summary.uploaded, 1);
        assert_eq!(storage.exists_calls.load(Ordering::SeqCst), 3);
        assert!(fixture.log_contents().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn driver_continues_after_exhausted_windows() {
        let fixture = Fixture::new();
        let source = Arc::new(MockSource::with_recordings(vec![MockSource::record(
            "http://example.com/a.mp3",
            "123",
        )]));
        let storage = Arc::new(FailingStorage::new());
        let service = fixture.service(source, storage.clone(), 2);

        let summary = service
            .run(date(2025, 7, 7), date(2025, 7, 8))
            .await
            .unwrap();

        assert_eq!(summary.windows, 2);
        assert_eq!(summary.exhausted, 2);
        assert_eq!(summary.completed, 0);
        assert_eq!(storage.exists_calls.load(Ordering::SeqCst), 4);

        let log = fixture.log_contents().await.unwrap();
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("2025-07-07 to 2025-07-08"));
        assert!(lines[1].starts_with("2025-07-08 to 2025-07-09"));
    }

    #[tokio::test(start_paused = true)]
    async fn driver_counts_windows_with_failing_failure_log() {
        let fixture = Fixture::new();
        let source = Arc::new(MockSource::with_recordings(vec![MockSource::record(
            "http://example.com/a.mp3",
            "123",
        )]));
        let storage = Arc::new(FailingStorage::new());
        // Failure log pointed at a directory so appends fail
        let service = MigrateService::new(
            source,
            storage,
            FailureLog::new(fixture.log_dir.path()),
            "july_2025".to_string(),
            fixture.staging.path().to_path_buf(),
            2,
        );

        let summary = service
            .run(date(2025, 7, 7), date(2025, 7, 7))
            .await
            .unwrap();

        assert_eq!(summary.windows, 1);
        assert_eq!(summary.errored, 1);
        assert_eq!(summary.exhausted, 0);
    }

    #[tokio::test]
    async fn rerun_skips_already_migrated_days() {
        let fixture = Fixture::new();
        let store = tempdir().unwrap();
        let source = Arc::new(MockSource::with_recordings(vec![MockSource::record(
            "http://example.com/a.mp3",
            "123",
        )]));
        let storage = Arc::new(LocalStorage::new(store.path()).await.unwrap());
        let service = fixture.service(source.clone(), storage, 3);

        let summary = service
            .run(date(2025, 7, 7), date(2025, 7, 8))
            .await
            .unwrap();

        assert_eq!(summary.windows, 2);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.uploaded, 1);
        assert_eq!(source.download_calls().len(), 1);
    }
}
