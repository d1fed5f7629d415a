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
use deposit_form::api::{BackendFieldError, DepositApiClient, DepositApiResponse};
use deposit_form::models::{Record, RecordLinks};
use deposit_form::{ApiError, RecordSerializer};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

const BASE_URL: &str = "mem://records";

/// A failure queued for the next call.
#[derive(Debug, Clone)]
struct QueuedFailure {
    status: u16,
    message: String,
    errors: Vec<BackendFieldError>,
}

/// [`DepositApiClient`] that stores drafts in memory.
///
/// Payloads go through the serializer in both directions, so tests exercise
/// the same conversion the HTTP client does.
pub struct InMemoryDepositApiClient {
    serializer: Arc<dyn RecordSerializer>,
    drafts: Mutex<BTreeMap<String, Value>>,
    next_id: Mutex<u64>,
    field_errors: Mutex<Vec<BackendFieldError>>,
    failure: Mutex<Option<QueuedFailure>>,
    calls: Mutex<Vec<&'static str>>,
}

impl InMemoryDepositApiClient {
    pub fn new(serializer: Arc<dyn RecordSerializer>) -> Self {
        Self {
            serializer,
            drafts: Mutex::new(BTreeMap::new()),
            next_id: Mutex::new(1),
            field_errors: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Field errors reported with every successful create or save until
    /// cleared.
    pub fn set_field_errors(&self, errors: Vec<BackendFieldError>) {
        *self.field_errors.lock() = errors;
    }

    pub fn clear_field_errors(&self) {
        self.field_errors.lock().clear();
    }

    /// Fail the next call with `status`.
    pub fn fail_next(&self, status: u16, message: &str, errors: Vec<BackendFieldError>) {
        *self.failure.lock() = Some(QueuedFailure {
            status,
            message: message.to_string(),
            errors,
        });
    }

    /// Names of the operations called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    /// The stored backend JSON of a draft.
    pub fn stored(&self, id: &str) -> Option<Value> {
        self.drafts.lock().get(id).cloned()
    }

    pub fn draft_count(&self) -> usize {
        self.drafts.lock().len()
    }

    fn begin(&self, call: &'static str, method: &'static str, url: &str) -> Result<(), ApiError> {
        self.calls.lock().push(call);
        match self.failure.lock().take() {
            Some(failure) => Err(ApiError::Status {
                method,
                url: url.to_string(),
                status: failure.status,
                message: failure.message,
                errors: failure.errors,
            }),
            None => Ok(()),
        }
    }

    fn not_found(method: &'static str, url: &str) -> ApiError {
        ApiError::Status {
            method,
            url: url.to_string(),
            status: 404,
            message: "The persistent identifier does not exist.".to_string(),
            errors: Vec::new(),
        }
    }

    fn id_from_link(url: &str) -> Option<&str> {
        url.strip_prefix(BASE_URL)?
            .trim_start_matches('/')
            .split('/')
            .next()
    }

    fn respond(&self, code: u16, stored: &Value, with_errors: bool) -> Result<DepositApiResponse, ApiError> {
        Ok(DepositApiResponse {
            code,
            data: self.serializer.deserialize(stored)?,
            errors: if with_errors {
                self.field_errors.lock().clone()
            } else {
                Vec::new()
            },
        })
    }

    fn links(id: &str) -> Value {
        json!({
            "self": format!("{BASE_URL}/{id}/draft"),
            "self_html": format!("mem://uploads/{id}"),
            "files": format!("{BASE_URL}/{id}/draft/files"),
            "publish": format!("{BASE_URL}/{id}/draft/actions/publish"),
        })
    }
}

#[async_trait]
impl DepositApiClient for InMemoryDepositApiClient {
    async fn create_draft(&self, draft: &Record) -> Result<DepositApiResponse, ApiError> {
        self.begin("create_draft", "POST", BASE_URL)?;
        let id = {
            let mut next = self.next_id.lock();
            let id = format!("draft-{:04}", *next);
            *next += 1;
            id
        };

        let mut stored = self.serializer.serialize(draft)?;
        if let Some(object) = stored.as_object_mut() {
            object.insert("id".to_string(), json!(id));
            object.insert("is_published".to_string(), json!(false));
            object.insert("links".to_string(), Self::links(&id));
        }
        self.drafts.lock().insert(id, stored.clone());
        self.respond(201, &stored, true)
    }

    async fn save_draft(&self, draft: &Record) -> Result<DepositApiResponse, ApiError> {
        let url = draft.links.self_.as_deref().ok_or(ApiError::MissingLink("self"))?;
        self.begin("save_draft", "PUT", url)?;
        let id = Self::id_from_link(url).ok_or_else(|| Self::not_found("PUT", url))?;
        if !self.drafts.lock().contains_key(id) {
            return Err(Self::not_found("PUT", url));
        }

        let mut stored = self.serializer.serialize(draft)?;
        if let Some(object) = stored.as_object_mut() {
            object.insert("id".to_string(), json!(id));
            object.insert("is_published".to_string(), json!(false));
            object.insert("links".to_string(), Self::links(id));
        }
        self.drafts.lock().insert(id.to_string(), stored.clone());
        self.respond(200, &stored, true)
    }

    async fn read_draft(&self, links: &RecordLinks) -> Result<DepositApiResponse, ApiError> {
        let url = links.self_.as_deref().ok_or(ApiError::MissingLink("self"))?;
        self.begin("read_draft", "GET", url)?;
        let stored = Self::id_from_link(url)
            .and_then(|id| self.stored(id))
            .ok_or_else(|| Self::not_found("GET", url))?;
        self.respond(200, &stored, false)
    }

    async fn publish_draft(&self, draft: &Record) -> Result<DepositApiResponse, ApiError> {
        let url = draft
            .links
            .publish
            .as_deref()
            .ok_or(ApiError::MissingLink("publish"))?;
        self.begin("publish_draft", "POST", url)?;
        let id = Self::id_from_link(url).ok_or_else(|| Self::not_found("POST", url))?;

        let mut drafts = self.drafts.lock();
        let stored = drafts
            .get_mut(id)
            .ok_or_else(|| Self::not_found("POST", url))?;
        if let Some(object) = stored.as_object_mut() {
            object.insert("is_published".to_string(), json!(true));
        }
        let stored = stored.clone();
        drop(drafts);
        self.respond(202, &stored, false)
    }

    async fn delete_draft(&self, links: &RecordLinks) -> Result<(), ApiError> {
        let url = links.self_.as_deref().ok_or(ApiError::MissingLink("self"))?;
        self.begin("delete_draft", "DELETE", url)?;
        let id = Self::id_from_link(url).ok_or_else(|| Self::not_found("DELETE", url))?;
        self.drafts
            .lock()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found("DELETE", url))
    }
}
