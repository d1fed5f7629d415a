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
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{DepositApiClient, DepositApiResponse};
use crate::error::ApiError;
use crate::events;
use crate::models::{Record, RecordLinks};

/// Draft lifecycle operations.
#[async_trait]
pub trait DepositDraftsService: Send + Sync {
    async fn create(&self, draft: &Record) -> Result<DepositApiResponse, ApiError>;
    async fn save(&self, draft: &Record) -> Result<DepositApiResponse, ApiError>;
    async fn read(&self, links: &RecordLinks) -> Result<DepositApiResponse, ApiError>;
    async fn publish(&self, draft: &Record) -> Result<DepositApiResponse, ApiError>;
    async fn delete(&self, links: &RecordLinks) -> Result<(), ApiError>;
}

/// Forwards to a [`DepositApiClient`] and logs the outcome.
pub struct RdmDepositDraftsService {
    client: Arc<dyn DepositApiClient>,
}

impl RdmDepositDraftsService {
    pub fn new(client: Arc<dyn DepositApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DepositDraftsService for RdmDepositDraftsService {
    async fn create(&self, draft: &Record) -> Result<DepositApiResponse, ApiError> {
        match self.client.create_draft(draft).await {
            Ok(response) => {
                info!(
                    event_type = events::DRAFT_CREATED,
                    record_id = response.data.id.as_deref().unwrap_or_default(),
                    field_errors = response.errors.len(),
                    "Draft created"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(event_type = events::DRAFT_SAVE_FAILED, error = %e, "Draft creation failed");
                Err(e)
            }
        }
    }

    async fn save(&self, draft: &Record) -> Result<DepositApiResponse, ApiError> {
        match self.client.save_draft(draft).await {
            Ok(response) => {
                info!(
                    event_type = events::DRAFT_SAVED,
                    record_id = response.data.id.as_deref().unwrap_or_default(),
                    field_errors = response.errors.len(),
                    "Draft saved"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(
                    event_type = events::DRAFT_SAVE_FAILED,
                    record_id = draft.id.as_deref().unwrap_or_default(),
                    error = %e,
                    "Draft save failed"
                );
                Err(e)
            }
        }
    }

    async fn read(&self, links: &RecordLinks) -> Result<DepositApiResponse, ApiError> {
        self.client.read_draft(links).await
    }

    async fn publish(&self, draft: &Record) -> Result<DepositApiResponse, ApiError> {
        match self.client.publish_draft(draft).await {
            Ok(response) => {
                info!(
                    event_type = events::DRAFT_PUBLISHED,
                    record_id = response.data.id.as_deref().unwrap_or_default(),
                    "Draft published"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(
                    event_type = events::DRAFT_PUBLISH_FAILED,
                    record_id = draft.id.as_deref().unwrap_or_default(),
                    status = e.status(),
                    error = %e,
                    "Draft publish failed"
                );
                Err(e)
            }
        }
    }

    async fn delete(&self, links: &RecordLinks) -> Result<(), ApiError> {
        match self.client.delete_draft(links).await {
            Ok(()) => {
                info!(event_type = events::DRAFT_DELETED, "Draft deleted");
                Ok(())
            }
            Err(e) => {
                warn!(event_type = events::DRAFT_DELETE_FAILED, error = %e, "Draft delete failed");
                Err(e)
            }
        }
    }
}
