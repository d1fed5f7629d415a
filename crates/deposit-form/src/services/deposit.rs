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

use std::sync::Arc;

use super::{DepositDraftsService, DepositFilesService, UploadOutcome, UploadProgressNotifier};
use crate::api::DepositApiResponse;
use crate::error::ApiError;
use crate::models::{FileEntry, FileLinks, Record, RecordLinks, UploadFile};

/// Single entry point for draft and file operations.
///
/// Holds no state beyond the two services it forwards to.
#[derive(Clone)]
pub struct DepositService {
    drafts: Arc<dyn DepositDraftsService>,
    files: Arc<dyn DepositFilesService>,
}

impl DepositService {
    pub fn new(drafts: Arc<dyn DepositDraftsService>, files: Arc<dyn DepositFilesService>) -> Self {
        Self { drafts, files }
    }

    pub fn drafts(&self) -> &Arc<dyn DepositDraftsService> {
        &self.drafts
    }

    pub fn files(&self) -> &Arc<dyn DepositFilesService> {
        &self.files
    }

    pub async fn create_draft(&self, draft: &Record) -> Result<DepositApiResponse, ApiError> {
        self.drafts.create(draft).await
    }

    pub async fn save_draft(&self, draft: &Record) -> Result<DepositApiResponse, ApiError> {
        self.drafts.save(draft).await
    }

    pub async fn read_draft(&self, links: &RecordLinks) -> Result<DepositApiResponse, ApiError> {
        self.drafts.read(links).await
    }

    pub async fn publish_draft(&self, draft: &Record) -> Result<DepositApiResponse, ApiError> {
        self.drafts.publish(draft).await
    }

    pub async fn delete_draft(&self, links: &RecordLinks) -> Result<(), ApiError> {
        self.drafts.delete(links).await
    }

    pub async fn upload_file(&self, init_url: &str, file: UploadFile) -> Result<FileEntry, ApiError> {
        self.files.upload(init_url, file).await
    }

    pub async fn upload_files(&self, init_url: &str, files: Vec<UploadFile>) -> Vec<UploadOutcome> {
        self.files.upload_files(init_url, files).await
    }

    pub async fn delete_file(&self, links: &FileLinks) -> Result<(), ApiError> {
        self.files.delete(links).await
    }

    pub fn set_progress_notifier(&self, notifier: Arc<dyn UploadProgressNotifier>) {
        self.files.set_progress_notifier(notifier);
    }

    pub fn close_uploads(&self) {
        self.files.close();
    }
}
