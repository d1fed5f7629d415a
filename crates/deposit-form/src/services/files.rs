/*
 *  Copyright 2025-2026 Colliery Software
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

//! Bounded file uploads.
//!
//! Uploads share a FIFO [`Semaphore`] sized to the configured concurrency.
//! Excess uploads wait for a slot in submission order and are never rejected;
//! a slot is released when its upload finishes, whatever the outcome.

use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::api::{DepositFileApiClient, ProgressCallback};
use crate::error::ApiError;
use crate::events;
use crate::models::{FileEntry, FileLinks, UploadFile};

/// Receives per-file upload progress.
///
/// Updates for one key arrive in order; the latest value wins.
pub trait UploadProgressNotifier: Send + Sync {
    fn on_upload_progress(&self, key: &str, percent: u8);
}

/// Outcome of one file in a batch upload, keyed by file name.
pub type UploadOutcome = (String, Result<FileEntry, ApiError>);

/// File operations on a draft.
#[async_trait]
pub trait DepositFilesService: Send + Sync {
    /// Register the notifier that receives progress for every later upload.
    fn set_progress_notifier(&self, notifier: Arc<dyn UploadProgressNotifier>);

    /// Upload one file under `init_url` (the draft's `files` link): initialize,
    /// send content, commit.
    async fn upload(&self, init_url: &str, file: UploadFile) -> Result<FileEntry, ApiError>;

    /// Upload several files. Each one succeeds or fails on its own.
    async fn upload_files(&self, init_url: &str, files: Vec<UploadFile>) -> Vec<UploadOutcome> {
        join_all(files.into_iter().map(|file| async move {
            let key = file.key.clone();
            (key, self.upload(init_url, file).await)
        }))
        .await
    }

    async fn delete(&self, links: &FileLinks) -> Result<(), ApiError>;

    /// Stop taking uploads. Uploads already transferring finish; queued and
    /// later ones fail with [`ApiError::UploadQueueClosed`].
    fn close(&self) {}
}

/// [`DepositFilesService`] over a [`DepositFileApiClient`].
pub struct RdmDepositFilesService {
    client: Arc<dyn DepositFileApiClient>,
    slots: Arc<Semaphore>,
    max_concurrency: usize,
    notifier: RwLock<Option<Arc<dyn UploadProgressNotifier>>>,
}

impl RdmDepositFilesService {
    /// A concurrency of zero is treated as one.
    pub fn new(client: Arc<dyn DepositFileApiClient>, max_concurrency: usize) -> Self {
        let max_concurrency = max_concurrency.max(1);
        Self {
            client,
            slots: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
            notifier: RwLock::new(None),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Uploads currently holding a slot.
    pub fn active_uploads(&self) -> usize {
        self.max_concurrency - self.slots.available_permits()
    }

    fn progress_callback(&self, key: &str) -> ProgressCallback {
        let notifier = self.notifier.read().clone();
        let key = key.to_string();
        Arc::new(move |percent| {
            if let Some(notifier) = &notifier {
                notifier.on_upload_progress(&key, percent);
            }
        })
    }

    async fn transfer(&self, init_url: &str, file: UploadFile) -> Result<FileEntry, ApiError> {
        let entry = self
            .client
            .initialize_file_upload(init_url, &file.key)
            .await?;
        let content_url = entry
            .links
            .content
            .clone()
            .ok_or(ApiError::MissingLink("content"))?;
        let commit_url = entry
            .links
            .commit
            .clone()
            .ok_or(ApiError::MissingLink("commit"))?;

        let on_progress = self.progress_callback(&file.key);
        self.client
            .upload_file(&content_url, file, on_progress)
            .await?;
        self.client.finalize_file_upload(&commit_url).await
    }
}

#[async_trait]
impl DepositFilesService for RdmDepositFilesService {
    fn set_progress_notifier(&self, notifier: Arc<dyn UploadProgressNotifier>) {
        *self.notifier.write() = Some(notifier);
    }

    fn close(&self) {
        self.slots.close();
        info!(
            event_type = events::FILE_UPLOAD_QUEUE_CLOSED,
            active = self.active_uploads(),
            "Upload queue closed"
        );
    }

    async fn upload(&self, init_url: &str, file: UploadFile) -> Result<FileEntry, ApiError> {
        let key = file.key.clone();
        debug!(event_type = events::FILE_UPLOAD_QUEUED, key = %key, size = file.size(), "Upload queued");
        let _slot = self
            .slots
            .acquire()
            .await
            .map_err(|_| ApiError::UploadQueueClosed)?;
        debug!(event_type = events::FILE_UPLOAD_STARTED, key = %key, "Upload started");

        match self.transfer(init_url, file).await {
            Ok(entry) => {
                info!(event_type = events::FILE_UPLOAD_FINISHED, key = %key, "Upload finished");
                Ok(entry)
            }
            Err(e) => {
                warn!(event_type = events::FILE_UPLOAD_FAILED, key = %key, error = %e, "Upload failed");
                Err(e)
            }
        }
    }

    async fn delete(&self, links: &FileLinks) -> Result<(), ApiError> {
        match self.client.delete_file(links).await {
            Ok(()) => {
                info!(event_type = events::FILE_DELETED, "File deleted");
                Ok(())
            }
            Err(e) => {
                warn!(event_type = events::FILE_DELETE_FAILED, error = %e, "File delete failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct SlowClient {
        active: AtomicUsize,
        peak: AtomicUsize,
        started: Mutex<Vec<String>>,
        fail_key: Option<String>,
    }

    #[async_trait]
    impl DepositFileApiClient for SlowClient {
        async fn initialize_file_upload(
            &self,
            _init_url: &str,
            key: &str,
        ) -> Result<FileEntry, ApiError> {
            self.started.lock().unwrap().push(key.to_string());
            let mut entry = FileEntry {
                key: key.to_string(),
                ..Default::default()
            };
            entry.links.content = Some(format!("http://files/{key}/content"));
            entry.links.commit = Some(format!("http://files/{key}/commit"));
            Ok(entry)
        }

        async fn upload_file(
            &self,
            upload_url: &str,
            file: UploadFile,
            on_progress: ProgressCallback,
        ) -> Result<(), ApiError> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            on_progress(50);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            if self.fail_key.as_deref() == Some(file.key.as_str()) {
                return Err(ApiError::Status {
                    method: "PUT",
                    url: upload_url.to_string(),
                    status: 500,
                    message: "boom".to_string(),
                    errors: Vec::new(),
                });
            }
            on_progress(100);
            Ok(())
        }

        async fn finalize_file_upload(&self, commit_url: &str) -> Result<FileEntry, ApiError> {
            let key = commit_url
                .trim_start_matches("http://files/")
                .trim_end_matches("/commit");
            Ok(FileEntry {
                key: key.to_string(),
                status: Some("completed".to_string()),
                ..Default::default()
            })
        }

        async fn delete_file(&self, _links: &FileLinks) -> Result<(), ApiError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(String, u8)>>);

    impl UploadProgressNotifier for Recorder {
        fn on_upload_progress(&self, key: &str, percent: u8) {
            self.0.lock().unwrap().push((key.to_string(), percent));
        }
    }

    fn files(n: usize) -> Vec<UploadFile> {
        (0..n)
            .map(|i| UploadFile::new(format!("file-{i}.txt"), vec![0u8; 8]))
            .collect()
    }

    #[tokio::test]
    async fn test_uploads_never_exceed_cap() {
        let client = Arc::new(SlowClient::default());
        let service = RdmDepositFilesService::new(client.clone(), 2);

        let outcomes = service.upload_files("http://files", files(6)).await;

        assert_eq!(outcomes.len(), 6);
        assert!(outcomes.iter().all(|(_, r)| r.is_ok()));
        assert!(client.peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(service.active_uploads(), 0);
    }

    #[tokio::test]
    async fn test_queued_uploads_start_in_submission_order() {
        let client = Arc::new(SlowClient::default());
        let service = RdmDepositFilesService::new(client.clone(), 1);

        service.upload_files("http://files", files(4)).await;

        let started = client.started.lock().unwrap().clone();
        assert_eq!(
            started,
            vec!["file-0.txt", "file-1.txt", "file-2.txt", "file-3.txt"]
        );
    }

    #[tokio::test]
    async fn test_failure_releases_slot_for_queued_uploads() {
        let client = Arc::new(SlowClient {
            fail_key: Some("file-0.txt".to_string()),
            ..Default::default()
        });
        let service = RdmDepositFilesService::new(client, 1);

        let outcomes = service.upload_files("http://files", files(3)).await;

        assert!(outcomes[0].1.is_err());
        assert!(outcomes[1].1.is_ok());
        assert!(outcomes[2].1.is_ok());
        assert_eq!(service.active_uploads(), 0);
    }

    #[tokio::test]
    async fn test_progress_reaches_notifier() {
        let service = RdmDepositFilesService::new(Arc::new(SlowClient::default()), 3);
        let recorder = Arc::new(Recorder::default());
        service.set_progress_notifier(recorder.clone());

        service
            .upload("http://files", UploadFile::new("a.txt", b"hello".to_vec()))
            .await
            .unwrap();

        let seen = recorder.0.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![("a.txt".to_string(), 50), ("a.txt".to_string(), 100)]
        );
    }

    #[tokio::test]
    async fn test_closing_fails_queued_uploads_and_lets_running_ones_finish() {
        let service = Arc::new(RdmDepositFilesService::new(Arc::new(SlowClient::default()), 1));

        let running = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .upload("http://files", UploadFile::new("running.txt", vec![1]))
                    .await
            })
        };
        while service.active_uploads() == 0 {
            tokio::task::yield_now().await;
        }
        let queued = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .upload("http://files", UploadFile::new("queued.txt", vec![2]))
                    .await
            })
        };
        tokio::task::yield_now().await;

        service.close();

        assert!(running.await.unwrap().is_ok());
        assert!(matches!(queued.await.unwrap(), Err(ApiError::UploadQueueClosed)));
        let late = service
            .upload("http://files", UploadFile::new("late.txt", vec![3]))
            .await;
        assert!(matches!(late, Err(ApiError::UploadQueueClosed)));
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        let service = RdmDepositFilesService::new(Arc::new(SlowClient::default()), 0);
        assert_eq!(service.max_concurrency(), 1);
    }
}
