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

//! Shared HTTP plumbing for the API clients.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::BackendFieldError;
use crate::error::ApiError;

/// Media type the records API answers with.
pub const RECORD_MEDIA_TYPE: &str = "application/vnd.inveniordm.v1+json";

/// Extra configuration for the API clients.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Headers sent with every request, e.g. an authorization token.
    pub headers: BTreeMap<String, String>,
}

impl ApiConfig {
    pub fn with_headers(headers: BTreeMap<String, String>) -> Self {
        Self { headers }
    }
}

/// A reqwest client with the configured default headers attached.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub(crate) fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(RECORD_MEDIA_TYPE));
        for (name, value) in &config.headers {
            let invalid = |reason: String| ApiError::InvalidHeader {
                name: name.clone(),
                reason,
            };
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
            headers.insert(header_name, header_value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send a request and decode its JSON body.
    ///
    /// Non-success statuses become [`ApiError::Status`]; an empty success
    /// body decodes to `Value::Null`.
    pub(crate) async fn send(
        &self,
        method: &'static str,
        url: &str,
        request: RequestBuilder,
    ) -> Result<(u16, Value), ApiError> {
        debug!(method, url, "Sending API request");
        let response = request.send().await.map_err(|e| ApiError::Transport {
            method,
            url: url.to_string(),
            message: e.to_string(),
        })?;
        read_response(method, url, response).await
    }
}

async fn read_response(
    method: &'static str,
    url: &str,
    response: Response,
) -> Result<(u16, Value), ApiError> {
    let status = response.status();
    let text = response.text().await.map_err(|e| ApiError::Transport {
        method,
        url: url.to_string(),
        message: e.to_string(),
    })?;

    if !status.is_success() {
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
        let errors = parse_field_errors(&body);
        warn!(method, url, status = status.as_u16(), %message, "API request failed");
        return Err(ApiError::Status {
            method,
            url: url.to_string(),
            status: status.as_u16(),
            message,
            errors,
        });
    }

    if text.trim().is_empty() {
        return Ok((status.as_u16(), Value::Null));
    }
    let body = serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    Ok((status.as_u16(), body))
}

/// Read the backend's `errors` array. Malformed entries are skipped.
pub(crate) fn parse_field_errors(body: &Value) -> Vec<BackendFieldError> {
    body.get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| serde_json::from_value(e.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
