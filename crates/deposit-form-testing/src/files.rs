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

use async_trait::async_trait;
use deposit_form::api::{DepositFileApiClient, ProgressCallback};
use deposit_form::models::{FileEntry, FileLinks, UploadFile};
use deposit_form::ApiError;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Progress ticks reported for every upload.
const PROGRESS_TICKS: [u8; 4] = [25, 50, 75, 100];

/// [`DepositFileApiClient`] that keeps file entries in memory.
///
/// Each upload sleeps between progress ticks so concurrent uploads overlap.
pub struct InMemoryFileApiClient {
    entries: Mutex<BTreeMap<String, FileEntry>>,
    contents: Mutex<BTreeMap<String, Vec<u8>>>,
    failing: Mutex<BTreeSet<String>>,
    started: Mutex<Vec<String>>,
    tick: Duration,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl Default for InMemoryFileApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryFileApiClient {
    pub fn new() -> Self {
        Self::with_tick(Duration::from_millis(5))
    }

    pub fn with_tick(tick: Duration) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            contents: Mutex::new(BTreeMap::new()),
            failing: Mutex::new(BTreeSet::new()),
            started: Mutex::new(Vec::new()),
            tick,
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Make the content upload of `key` fail with a 500.
    pub fn fail_upload(&self, key: &str) {
        self.failing.lock().insert(key.to_string());
    }

    /// Most uploads that were ever in flight at once.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn active_uploads(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Keys in the order their content transfer started.
    pub fn started(&self) -> Vec<String> {
        self.started.lock().clone()
    }

    pub fn entry(&self, key: &str) -> Option<FileEntry> {
        self.entries.lock().get(key).cloned()
    }

    pub fn content(&self, key: &str) -> Option<Vec<u8>> {
        self.contents.lock().get(key).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.entries.lock().len()
    }

    fn key_for(&self, url: &str, suffix: &str) -> Option<String> {
        let key = url.strip_suffix(suffix)?.rsplit('/').next()?;
        self.entries
            .lock()
            .contains_key(key)
            .then(|| key.to_string())
    }

    fn not_found(method: &'static str, url: &str) -> ApiError {
        ApiError::Status {
            method,
            url: url.to_string(),
            status: 404,
            message: "File not found.".to_string(),
            errors: Vec::new(),
        }
    }
}

#[async_trait]
impl DepositFileApiClient for InMemoryFileApiClient {
    async fn initialize_file_upload(
        &self,
        init_url: &str,
        key: &str,
    ) -> Result<FileEntry, ApiError> {
        let base = format!("{}/{}", init_url.trim_end_matches('/'), key);
        let entry = FileEntry {
            key: key.to_string(),
            status: Some("pending".to_string()),
            links: FileLinks {
                self_: Some(base.clone()),
                content: Some(format!("{base}/content")),
                commit: Some(format!("{base}/commit")),
                ..Default::default()
            },
            ..Default::default()
        };
        self.entries.lock().insert(key.to_string(), entry.clone());
        Ok(entry)
    }

    async fn upload_file(
        &self,
        upload_url: &str,
        file: UploadFile,
        on_progress: ProgressCallback,
    ) -> Result<(), ApiError> {
        let key = self
            .key_for(upload_url, "/content")
            .ok_or_else(|| Self::not_found("PUT", upload_url))?;
        self.started.lock().push(key.clone());

        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let fails = self.failing.lock().contains(&key);
        for percent in PROGRESS_TICKS {
            tokio::time::sleep(self.tick).await;
            if fails && percent > 50 {
                break;
            }
            on_progress(percent);
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        if fails {
            return Err(ApiError::Status {
                method: "PUT",
                url: upload_url.to_string(),
                status: 500,
                message: "Upload interrupted.".to_string(),
                errors: Vec::new(),
            });
        }

        if let Some(entry) = self.entries.lock().get_mut(&key) {
            entry.size = Some(file.size());
        }
        self.contents.lock().insert(key, file.data);
        Ok(())
    }

    async fn finalize_file_upload(&self, commit_url: &str) -> Result<FileEntry, ApiError> {
        let key = self
            .key_for(commit_url, "/commit")
            .ok_or_else(|| Self::not_found("POST", commit_url))?;
        let mut entries = self.entries.lock();
        let entry = entries
            .get_mut(&key)
            .ok_or_else(|| Self::not_found("POST", commit_url))?;
        entry.status = Some("completed".to_string());
        Ok(entry.clone())
    }

    async fn delete_file(&self, links: &FileLinks) -> Result<(), ApiError> {
        let url = links.self_.as_deref().ok_or(ApiError::MissingLink("self"))?;
        let key = url
            .rsplit('/')
            .next()
            .ok_or_else(|| Self::not_found("DELETE", url))?
            .to_string();
        self.contents.lock().remove(&key);
        self.entries
            .lock()
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| Self::not_found("DELETE", url))
    }
}
