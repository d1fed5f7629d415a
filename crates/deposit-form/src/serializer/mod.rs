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

//! # Record Serializer
//!
//! Converts backend records to the form shape and back.
//!
//! For every canonical backend record `R` (vocabulary references carried as
//! `{"id": ...}` only, no empty values) the round trip
//! `serialize(deserialize(R)) == R` holds. Malformed input fails with a
//! [`SerializerError`] instead of dropping fields.

pub mod backend;
mod rdm;

pub use rdm::RdmRecordSerializer;

use serde_json::Value;

use crate::api::BackendFieldError;
use crate::error::SerializerError;
use crate::form::FieldErrors;
use crate::models::Record;

/// Conversion between the backend record schema and the form record.
pub trait RecordSerializer: Send + Sync {
    /// Backend JSON to form record.
    fn deserialize(&self, record: &Value) -> Result<Record, SerializerError>;

    /// Form record to backend JSON. UI-only data is never included.
    fn serialize(&self, record: &Record) -> Result<Value, SerializerError>;

    /// Map backend validation errors onto form field paths.
    fn deserialize_errors(&self, errors: &[BackendFieldError]) -> FieldErrors {
        let mut field_errors = FieldErrors::new();
        for error in errors {
            for message in &error.messages {
                field_errors.add(&error.field, message.clone());
            }
        }
        field_errors
    }
}

/// Recursively drop `null`, empty strings, empty lists and empty objects.
pub fn remove_empty_values(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, remove_empty_values(value)))
                .filter(|(_, value)| !is_empty(value))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(remove_empty_values)
                .filter(|value| !is_empty(value))
                .collect(),
        ),
        other => other,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
