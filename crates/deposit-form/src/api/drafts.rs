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
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

use super::http::{parse_field_errors, ApiConfig, HttpClient, RECORD_MEDIA_TYPE};
use super::DepositApiResponse;
use crate::error::ApiError;
use crate::models::{Record, RecordLinks};
use crate::serializer::RecordSerializer;

/// Draft operations against the records API.
#[async_trait]
pub trait DepositApiClient: Send + Sync {
    /// Create a new draft from a record that has never been saved.
    async fn create_draft(&self, draft: &Record) -> Result<DepositApiResponse, ApiError>;

    /// Update an existing draft in place.
    async fn save_draft(&self, draft: &Record) -> Result<DepositApiResponse, ApiError>;

    /// Fetch the current state of a draft.
    async fn read_draft(&self, links: &RecordLinks) -> Result<DepositApiResponse, ApiError>;

    /// Publish a saved draft.
    async fn publish_draft(&self, draft: &Record) -> Result<DepositApiResponse, ApiError>;

    /// Discard a draft.
    async fn delete_draft(&self, links: &RecordLinks) -> Result<(), ApiError>;
}

/// [`DepositApiClient`] for the RDM records API.
pub struct RdmDepositApiClient {
    http: HttpClient,
    create_url: String,
    serializer: Arc<dyn RecordSerializer>,
}

impl RdmDepositApiClient {
    pub fn new(
        config: &ApiConfig,
        create_url: impl Into<String>,
        serializer: Arc<dyn RecordSerializer>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(config)?,
            create_url: create_url.into(),
            serializer,
        })
    }

    pub fn create_url(&self) -> &str {
        &self.create_url
    }

    async fn send_record(
        &self,
        method: Method,
        method_name: &'static str,
        url: &str,
        payload: Option<Value>,
    ) -> Result<DepositApiResponse, ApiError> {
        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, RECORD_MEDIA_TYPE);
        if let Some(payload) = payload {
            request = request.json(&payload);
        }
        let (code, body) = self.http.send(method_name, url, request).await?;
        self.into_response(url, code, body)
    }

    fn into_response(
        &self,
        url: &str,
        code: u16,
        mut body: Value,
    ) -> Result<DepositApiResponse, ApiError> {
        let errors = parse_field_errors(&body);
        match body.as_object_mut() {
            Some(record) => {
                record.remove("errors");
            }
            None => {
                return Err(ApiError::InvalidResponse {
                    url: url.to_string(),
                    message: "expected a record object".to_string(),
                })
            }
        }
        let data = self.serializer.deserialize(&body)?;
        Ok(DepositApiResponse { code, data, errors })
    }
}

#[async_trait]
impl DepositApiClient for RdmDepositApiClient {
    async fn create_draft(&self, draft: &Record) -> Result<DepositApiResponse, ApiError> {
        let payload = self.serializer.serialize(draft)?;
        self.send_record(Method::POST, "POST", &self.create_url, Some(payload)).await
    }

    async fn save_draft(&self, draft: &Record) -> Result<DepositApiResponse, ApiError> {
        let url = draft.links.self_.as_deref().ok_or(ApiError::MissingLink("self"))?;
        let payload = self.serializer.serialize(draft)?;
        self.send_record(Method::PUT, "PUT", url, Some(payload)).await
    }

    async fn read_draft(&self, links: &RecordLinks) -> Result<DepositApiResponse, ApiError> {
        let url = links.self_.as_deref().ok_or(ApiError::MissingLink("self"))?;
        self.send_record(Method::GET, "GET", url, None).await
    }

    async fn publish_draft(&self, draft: &Record) -> Result<DepositApiResponse, ApiError> {
        let url = draft
            .links
            .publish
            .as_deref()
            .ok_or(ApiError::MissingLink("publish"))?;
        self.send_record(Method::POST, "POST", url, None).await
    }

    async fn delete_draft(&self, links: &RecordLinks) -> Result<(), ApiError> {
        let url = links.self_.as_deref().ok_or(ApiError::MissingLink("self"))?;
        let request = self.http.request(Method::DELETE, url);
        self.http.send("DELETE", url, request).await?;
        Ok(())
    }
}
