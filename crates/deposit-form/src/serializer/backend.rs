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

//! Backend record schema.
//!
//! Mirrors the JSON the records REST API reads and writes. Only the parts the
//! form edits are typed; everything else rides along in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::models::{
    Access, Affiliation, FilesSettings, PersonOrOrg, RecordLinks, RightProps, UiFields,
};

/// Text keyed by locale, e.g. `{"en": "Creative Commons Attribution"}`.
pub type LocalizedText = BTreeMap<String, String>;

/// Reference to a vocabulary entry.
///
/// The backend may echo display data (`title`) next to the id; that lands in
/// `extra` on read and is not written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyRef {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VocabularyRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendCreatibutor {
    pub person_or_org: PersonOrOrg,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<VocabularyRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliations: Vec<Affiliation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendRight {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<RightProps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<VocabularyRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<BackendCreatibutor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<BackendCreatibutor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rights: Vec<BackendRight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<VocabularyRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FilesSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BackendMetadata>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub custom_fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<RecordLinks>,
    /// Read for display, never written.
    #[serde(default, skip_serializing)]
    pub ui: Option<UiFields>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
