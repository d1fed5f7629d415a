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

//! A small records backend served by axum on an ephemeral port.
//!
//! Draft ids are `rec-1`, `rec-2`, ... Two ids are special: `missing`
//! answers 404 and `invalid` answers 400 with field errors.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct Inner {
    requests: Vec<CapturedRequest>,
    next_id: u32,
    files: BTreeMap<String, u64>,
}

#[derive(Clone)]
pub struct TestBackend {
    pub base: String,
    inner: Arc<Mutex<Inner>>,
}

impl TestBackend {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let backend = Self {
            base: format!("http://{addr}"),
            inner: Arc::new(Mutex::new(Inner::default())),
        };

        let app = Router::new().fallback(handle).with_state(backend.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        backend
    }

    pub fn create_url(&self) -> String {
        format!("{}/api/records", self.base)
    }

    pub fn draft_url(&self, id: &str) -> String {
        format!("{}/api/records/{id}/draft", self.base)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> CapturedRequest {
        self.requests().pop().expect("backend saw no request")
    }

    /// Size of the content received for `key`.
    pub fn received(&self, key: &str) -> Option<u64> {
        self.inner.lock().unwrap().files.get(key).copied()
    }

    fn record(&self, id: &str, body: &Value, published: bool) -> Value {
        let draft = self.draft_url(id);
        let mut record = json!({
            "id": id,
            "is_published": published,
            "access": body.get("access").cloned().unwrap_or(json!({"record": "public", "files": "public"})),
            "files": body.get("files").cloned().unwrap_or(json!({"enabled": true})),
            "metadata": body.get("metadata").cloned().unwrap_or(json!({})),
            "links": {
                "self": draft,
                "self_html": format!("{}/uploads/{id}", self.base),
                "files": format!("{draft}/files"),
                "publish": format!("{draft}/actions/publish"),
            }
        });
        if body.pointer("/metadata/title").is_none() {
            record["errors"] = json!([
                {"field": "metadata.title", "messages": ["Missing data for required field."]}
            ]);
        }
        record
    }

    fn file_entry(&self, draft_id: &str, key: &str, status: &str) -> Value {
        let file = format!("{}/files/{key}", self.draft_url(draft_id));
        let mut entry = json!({
            "key": key,
            "status": status,
            "links": {
                "self": file,
                "content": format!("{file}/content"),
                "commit": format!("{file}/commit"),
            }
        });
        if let Some(size) = self.received(key) {
            entry["size"] = json!(size);
        }
        entry
    }
}

async fn handle(
    State(backend): State<TestBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    backend.inner.lock().unwrap().requests.push(CapturedRequest {
        method: method.clone(),
        path: path.clone(),
        headers,
        body: body.clone(),
    });
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        (_, ["api", "records", "missing", ..]) => (
            StatusCode::NOT_FOUND,
            Json(json!({"status": 404, "message": "The persistent identifier does not exist."})),
        )
            .into_response(),
        (_, ["api", "records", "invalid", ..]) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "status": 400,
                "message": "A validation error occurred.",
                "errors": [{"field": "metadata.resource_type.id", "messages": ["Invalid value."]}]
            })),
        )
            .into_response(),
        (Method::POST, ["api", "records"]) => {
            let id = {
                let mut inner = backend.inner.lock().unwrap();
                inner.next_id += 1;
                format!("rec-{}", inner.next_id)
            };
            (StatusCode::CREATED, Json(backend.record(&id, &payload, false))).into_response()
        }
        (Method::PUT, ["api", "records", id, "draft"]) => {
            Json(backend.record(id, &payload, false)).into_response()
        }
        (Method::GET, ["api", "records", id, "draft"]) => {
            Json(backend.record(id, &json!({"metadata": {"title": "Stored"}}), false))
                .into_response()
        }
        (Method::DELETE, ["api", "records", _, "draft"]) => StatusCode::NO_CONTENT.into_response(),
        (Method::POST, ["api", "records", id, "draft", "actions", "publish"]) => (
            StatusCode::ACCEPTED,
            Json(backend.record(id, &json!({"metadata": {"title": "Published"}}), true)),
        )
            .into_response(),
        (Method::POST, ["api", "records", id, "draft", "files"]) => {
            let entries: Vec<Value> = payload
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|item| item.get("key").and_then(Value::as_str))
                .map(|key| backend.file_entry(id, key, "pending"))
                .collect();
            (StatusCode::CREATED, Json(json!({"enabled": true, "entries": entries})))
                .into_response()
        }
        (Method::PUT, ["api", "records", _, "draft", "files", key, "content"]) => {
            backend
                .inner
                .lock()
                .unwrap()
                .files
                .insert(key.to_string(), body.len() as u64);
            Json(json!({"key": key, "status": "pending"})).into_response()
        }
        (Method::POST, ["api", "records", id, "draft", "files", key, "commit"]) => {
            Json(backend.file_entry(id, key, "completed")).into_response()
        }
        (Method::DELETE, ["api", "records", _, "draft", "files", _]) => {
            StatusCode::NO_CONTENT.into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}
