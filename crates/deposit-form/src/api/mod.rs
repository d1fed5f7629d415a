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

//! # API Clients
//!
//! Thin HTTP wrappers over the records REST API. The drafts client speaks in
//! form records and runs every payload through the configured
//! [`RecordSerializer`](crate::serializer::RecordSerializer); the files client
//! deals in raw file entries.
//!
//! Every non-success response surfaces as [`ApiError::Status`](crate::error::ApiError)
//! with the status code and the backend's message. Nothing here retries.

mod drafts;
mod files;
mod http;

pub use drafts::{DepositApiClient, RdmDepositApiClient};
pub use files::{DepositFileApiClient, ProgressCallback, RdmDepositFileApiClient};
pub use http::{ApiConfig, RECORD_MEDIA_TYPE};

use serde::{Deserialize, Serialize};

use crate::models::Record;

/// A validation message attached to one field path by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendFieldError {
    pub field: String,
    #[serde(default)]
    pub messages: Vec<String>,
}

impl BackendFieldError {
    pub fn new(field: impl Into<String>, messages: Vec<String>) -> Self {
        Self {
            field: field.into(),
            messages,
        }
    }
}

/// Result of a successful draft call.
///
/// Drafts may be saved while invalid, in which case the backend answers with
/// a success status and lists the problems in `errors`.
#[derive(Debug, Clone, PartialEq)]
pub struct DepositApiResponse {
    pub code: u16,
    pub data: Record,
    pub errors: Vec<BackendFieldError>,
}

impl DepositApiResponse {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_field_error_defaults_messages() {
        let error: BackendFieldError =
            serde_json::from_value(json!({"field": "metadata.title"})).unwrap();
        assert_eq!(error.field, "metadata.title");
        assert!(error.messages.is_empty());
    }

    #[test]
    fn test_parse_field_errors_skips_malformed_entries() {
        let body = json!({
            "errors": [
                {"field": "metadata.title", "messages": ["Missing data for required field."]},
                {"messages": ["no field"]},
                "garbage"
            ]
        });
        let errors = http::parse_field_errors(&body);
        assert_eq!(
            errors,
            vec![BackendFieldError::new(
                "metadata.title",
                vec!["Missing data for required field.".to_string()]
            )]
        );
        assert!(http::parse_field_errors(&json!(null)).is_empty());
    }
}
