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

//! Record Model
//!
//! The deposit record in the shape the form edits. This is the entity the
//! store owns for the lifetime of a form session; the serializer converts it
//! to and from the backend schema.
//!
//! Every struct keeps the fields it does not model in a flattened `extra` map
//! so that untouched backend data is written back as it was read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Access, Creatibutor, FilesSettings, Right, UiRight};

/// Workflow status of a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStatus {
    /// Not saved to the backend yet.
    New,
    Draft,
    Published,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordLinks {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub title: String,
    /// Resource type vocabulary id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub creators: Vec<Creatibutor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<Creatibutor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rights: Vec<Right>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Language vocabulary ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Display-only data rendered by the backend. Never sent back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiFields {
    #[serde(default)]
    pub rights: Vec<UiRight>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(default)]
    pub access: Access,
    #[serde(default)]
    pub files: FilesSettings,
    #[serde(default)]
    pub metadata: Metadata,
    /// Custom fields; vocabulary-backed ones hold bare ids.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub custom_fields: Map<String, Value>,
    #[serde(default)]
    pub links: RecordLinks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiFields>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    pub fn status(&self) -> WorkflowStatus {
        match (self.id.as_ref(), self.is_published) {
            (None, _) => WorkflowStatus::New,
            (Some(_), Some(true)) => WorkflowStatus::Published,
            (Some(_), _) => WorkflowStatus::Draft,
        }
    }

    /// Whether files are disabled for this record.
    pub fn is_metadata_only(&self) -> bool {
        !self.files.enabled
    }

    /// The `ui.rights` display catalog, empty when absent.
    pub fn ui_rights(&self) -> &[UiRight] {
        self.ui.as_ref().map(|ui| ui.rights.as_slice()).unwrap_or(&[])
    }
}
