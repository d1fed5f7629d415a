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

use super::options::{sort_options, SelectOption};
use crate::form::FieldErrors;
use crate::models::Record;

/// A resource type as offered by the backend vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTypeOption {
    pub id: String,
    #[serde(default)]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ResourceTypeOption {
    /// `type` or `type / subtype`.
    pub fn label(&self) -> String {
        match self.subtype_name.as_deref().filter(|s| !s.is_empty()) {
            Some(subtype) => format!("{} / {}", self.type_name, subtype),
            None => self.type_name.clone(),
        }
    }
}

/// Error block shown under the select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedError {
    pub content: String,
}

pub struct ResourceTypeField {
    field_path: String,
    label: Option<String>,
    label_icon: Option<String>,
    required: bool,
    options: Vec<ResourceTypeOption>,
}

impl ResourceTypeField {
    pub fn new(options: Vec<ResourceTypeOption>) -> Self {
        Self {
            field_path: "metadata.resource_type".to_string(),
            label: None,
            label_icon: None,
            required: false,
            options,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>, icon: Option<String>) -> Self {
        self.label = Some(label.into());
        self.label_icon = icon;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn field_path(&self) -> &str {
        &self.field_path
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn label_icon(&self) -> Option<&str> {
        self.label_icon.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Options labeled and sorted for display.
    pub fn create_options(&self) -> Vec<SelectOption> {
        sort_options(
            self.options
                .iter()
                .map(|option| SelectOption {
                    value: option.id.clone(),
                    text: option.label(),
                    icon: option.icon.clone(),
                })
                .collect(),
        )
    }

    pub fn group_errors(&self, errors: &FieldErrors) -> Option<GroupedError> {
        errors
            .message(&self.field_path)
            .map(|content| GroupedError { content })
    }

    pub fn selected<'a>(&self, record: &'a Record) -> Option<&'a str> {
        record.metadata.resource_type.as_deref()
    }

    /// Set the selected resource type; an empty id clears it.
    pub fn select(&self, record: &Record, id: Option<&str>) -> Record {
        let mut record = record.clone();
        record.metadata.resource_type = id.filter(|id| !id.is_empty()).map(str::to_string);
        record
    }
}
