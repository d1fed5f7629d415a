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

//! File entries attached to a draft.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

fn default_true() -> bool {
    true
}

/// The record's `files` block: whether files are enabled at all.
///
/// A record with `enabled = false` is a metadata-only record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_preview: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for FilesSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            default_preview: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileLinks {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A file entry as returned by the files endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    /// Backend status: `pending` until committed, then `completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub links: FileLinks,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Files listing passed in when the form boots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilesListing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_preview: Option<String>,
    #[serde(default)]
    pub entries: Vec<FileEntry>,
    #[serde(default)]
    pub links: Map<String, Value>,
}

/// A local file queued for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub key: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(key: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("key", &self.key)
            .field("size", &self.data.len())
            .finish()
    }
}
