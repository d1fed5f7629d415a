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
use std::collections::BTreeMap;

/// Validation messages keyed by dotted field path
/// (`metadata.creators.0.person_or_org.identifiers`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    by_path: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: &str, message: impl Into<String>) {
        self.by_path
            .entry(path.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.by_path.get(path).map(Vec::as_slice)
    }

    /// All messages for `path` joined into one line.
    pub fn message(&self, path: &str) -> Option<String> {
        self.get(path).map(|messages| messages.join(" "))
    }

    /// Whether `path` or anything nested below it has an error.
    pub fn has_errors_under(&self, path: &str) -> bool {
        let nested = format!("{path}.");
        self.by_path
            .range(path.to_string()..)
            .take_while(|(key, _)| key.starts_with(path))
            .any(|(key, _)| key == path || key.starts_with(&nested))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.by_path.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}
