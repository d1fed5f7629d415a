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

//! Licenses and rights.
//!
//! A [`Right`] is either a reference to a standard catalog entry (it has an
//! `id`) or a custom entry written inline. Titles and descriptions are
//! localized on the backend; the form edits the default-locale text in
//! `title`/`description` and keeps every other locale in the `*_translations`
//! maps so nothing is lost on save.
//!
//! [`UiRight`] is the backend-rendered catalog entry used only for display.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RightProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Right {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub title_translations: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub description_translations: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<RightProps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Right {
    /// Reference to a standard catalog license.
    pub fn standard(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Inline license written by the depositor.
    pub fn custom(
        title: impl Into<String>,
        description: Option<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description,
            link,
            ..Self::default()
        }
    }

    pub fn is_standard(&self) -> bool {
        self.id.is_some()
    }

    /// URL from `props.url`, if present.
    pub fn props_url(&self) -> Option<&str> {
        self.props.as_ref().and_then(|p| p.url.as_deref())
    }
}

/// Display entry from the backend's `ui.rights` block.
///
/// The backend renders these already localized. The shape is loose on
/// purpose: a display catalog that does not match expectations must not stop
/// the record from loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiRight {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_l10n: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_l10n: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<RightProps>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UiRight {
    /// Plain-text title, when the catalog carries one.
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().and_then(Value::as_str)
    }

    pub fn props_url(&self) -> Option<&str> {
        self.props.as_ref().and_then(|p| p.url.as_deref())
    }
}
