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
use futures::StreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Method};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use super::http::{ApiConfig, HttpClient};
use crate::error::ApiError;
use crate::models::{FileEntry, FileLinks, FilesListing, UploadFile};

/// Receives upload progress as a whole percentage in `0..=100`.
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// Size of the body chunks progress is reported on.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// File operations against a draft's files endpoint.
///
/// An upload is three calls: initialize the entry, send the content, then
/// commit it.
#[async_trait]
pub trait DepositFileApiClient: Send + Sync {
    /// Register a new file entry under `init_url` (the draft's `files` link).
    async fn initialize_file_upload(&self, init_url: &str, key: &str)
        -> Result<FileEntry, ApiError>;

    /// Send the file content to the entry's `content` link.
    async fn upload_file(
        &self,
        upload_url: &str,
        file: UploadFile,
        on_progress: ProgressCallback,
    ) -> Result<(), ApiError>;

    /// Commit the uploaded content through the entry's `commit` link.
    async fn finalize_file_upload(&self, commit_url: &str) -> Result<FileEntry, ApiError>;

    async fn delete_file(&self, links: &FileLinks) -> Result<(), ApiError>;
}

/// [`DepositFileApiClient`] for the RDM draft files API.
pub struct RdmDepositFileApiClient {
    http: HttpClient,
}

impl RdmDepositFileApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl DepositFileApiClient for RdmDepositFileApiClient {
    async fn initialize_file_upload(
        &self,
        init_url: &str,
        key: &str,
    ) -> Result<FileEntry, ApiError> {
        let request = self
            .http
            .request(Method::POST, init_url)
            .json(&json!([{ "key": key }]));
        let (_, body) = self.http.send("POST", init_url, request).await?;
        let listing: FilesListing =
            serde_json::from_value(body).map_err(|e| ApiError::InvalidResponse {
                url: init_url.to_string(),
                message: e.to_string(),
            })?;
        let entry = listing
            .entries
            .into_iter()
            .find(|entry| entry.key == key)
            .ok_or_else(|| ApiError::InvalidResponse {
                url: init_url.to_string(),
                message: format!("no entry for '{key}' in the response"),
            })?;
        debug!(key, "File upload initialized");
        Ok(entry)
    }

    async fn upload_file(
        &self,
        upload_url: &str,
        file: UploadFile,
        on_progress: ProgressCallback,
    ) -> Result<(), ApiError> {
        let total = file.data.len();
        let chunks: Vec<Vec<u8>> = file
            .data
            .chunks(UPLOAD_CHUNK_SIZE)
            .map(<[u8]>::to_vec)
            .collect();

        let progress = Arc::clone(&on_progress);
        let mut sent = 0usize;
        let stream = futures::stream::iter(chunks).map(move |chunk| {
            sent += chunk.len();
            progress(percent(sent, total));
            Ok::<_, std::io::Error>(chunk)
        });

        let request = self
            .http
            .request(Method::PUT, upload_url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, total)
            .body(Body::wrap_stream(stream));
        self.http.send("PUT", upload_url, request).await?;

        on_progress(100);
        debug!(key = %file.key, bytes = total, "File content uploaded");
        Ok(())
    }

    async fn finalize_file_upload(&self, commit_url: &str) -> Result<FileEntry, ApiError> {
        let request = self.http.request(Method::POST, commit_url);
        let (_, body) = self.http.send("POST", commit_url, request).await?;
        entry_from(commit_url, body)
    }

    async fn delete_file(&self, links: &FileLinks) -> Result<(), ApiError> {
        let url = links.self_.as_deref().ok_or(ApiError::MissingLink("self"))?;
        let request = self.http.request(Method::DELETE, url);
        self.http.send("DELETE", url, request).await?;
        Ok(())
    }
}

fn entry_from(url: &str, body: Value) -> Result<FileEntry, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::InvalidResponse {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Whole percentage of `sent` over `total`. An empty file is complete.
fn percent(sent: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let ratio = (sent.min(total) as u128 * 100) / total as u128;
    ratio as u8
}
