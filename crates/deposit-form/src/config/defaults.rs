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

use serde_json::Map;

use crate::config::types::*;

pub(crate) fn default_locale() -> String {
    "en".to_string()
}

pub(crate) fn default_file_upload_concurrency() -> usize {
    3
}

impl Default for DepositConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            custom_fields: CustomFieldsConfig::default(),
            create_url: "http://127.0.0.1:5000/api/records".to_string(),
            api_headers: None,
            file_upload_concurrency: default_file_upload_concurrency(),
            extra: Map::new(),
        }
    }
}
