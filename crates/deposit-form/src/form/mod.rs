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

//! Form state: the values being edited, the values the form was loaded with,
//! and per-path validation errors.

mod errors;
mod ordered_list;

pub use errors::FieldErrors;
pub use ordered_list::{ListEdit, OrderedList};

use serde::{Deserialize, Serialize};

use crate::models::Record;

/// When the host wants client-side validation to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOptions {
    pub validate_on_blur: Option<bool>,
    pub validate_on_change: Option<bool>,
    pub validate_on_mount: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub values: Record,
    pub initial_values: Record,
    pub errors: FieldErrors,
    pub initial_errors: FieldErrors,
}

impl FormState {
    pub fn new(record: Record) -> Self {
        Self {
            values: record.clone(),
            initial_values: record,
            errors: FieldErrors::new(),
            initial_errors: FieldErrors::new(),
        }
    }

    /// Reinitialize from a freshly saved record and the errors the backend
    /// reported for it.
    pub fn reset(&mut self, record: Record, errors: FieldErrors) {
        self.values = record.clone();
        self.initial_values = record;
        self.errors = errors.clone();
        self.initial_errors = errors;
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.initial_values
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error shown for a list field.
    ///
    /// The current error wins; the initial error is only shown while the
    /// list is still the one the form was loaded with.
    pub fn list_error(&self, path: &str, unchanged: bool) -> Option<String> {
        self.errors
            .message(path)
            .or_else(|| unchanged.then(|| self.initial_errors.message(path)).flatten())
    }

    /// Whether `path` or anything below it is in error, under the same rule
    /// as [`FormState::list_error`].
    pub fn has_list_errors(&self, path: &str, unchanged: bool) -> bool {
        self.errors.has_errors_under(path)
            || (unchanged && self.initial_errors.has_errors_under(path))
    }
}
