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

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::defaults::{default_file_upload_concurrency, default_locale};

/// Deposit form configuration as provided by the host page.
///
/// Keys follow the host's naming: `default_locale` and `custom_fields` are
/// snake case, the endpoint and upload settings are camel case. Keys this
/// crate does not use are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositConfig {
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default)]
    pub custom_fields: CustomFieldsConfig,
    #[serde(rename = "createUrl")]
    pub create_url: String,
    #[serde(rename = "apiHeaders", default, skip_serializing_if = "Option::is_none")]
    pub api_headers: Option<BTreeMap<String, String>>,
    #[serde(rename = "fileUploadConcurrency", default = "default_file_upload_concurrency")]
    pub file_upload_concurrency: usize,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldsConfig {
    /// Custom fields whose values are vocabulary references.
    #[serde(default)]
    pub vocabularies: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DepositConfig {
    /// Parse the JSON configuration object the host page embeds.
    pub fn from_json(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Extra headers attached to every API request.
    pub fn headers(&self) -> BTreeMap<String, String> {
        self.api_headers.clone().unwrap_or_default()
    }
}
