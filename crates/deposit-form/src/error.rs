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

//! Error types for the deposit form.
//!
//! Each layer has its own error enum; [`DepositError`] is what the store and
//! the app bootstrapper hand back to callers.

use chrono::NaiveDate;
use thiserror::Error;

use crate::api::BackendFieldError;
use crate::config::ConfigError;
use crate::form::FieldErrors;

/// Errors raised while converting between backend and form records.
#[derive(Debug, Error)]
pub enum SerializerError {
    #[error("Malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Expected the record to be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Vocabulary field '{field}' is malformed: {reason}")]
    Vocabulary { field: String, reason: String },
}

/// Errors raised by the draft and file API clients.
///
/// Non-success responses always carry the status code and a message. No
/// retries are attempted.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{method} {url} failed with status {status}: {message}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        message: String,
        errors: Vec<BackendFieldError>,
    },

    #[error("{method} {url} could not be sent: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },

    #[error("Invalid response body from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    #[error("Record has no '{0}' link")]
    MissingLink(&'static str),

    #[error("Invalid request header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("HTTP client could not be built: {0}")]
    Client(String),

    #[error("Upload queue is closed")]
    UploadQueueClosed,

    #[error("Record serialization failed: {0}")]
    Serializer(#[from] SerializerError),
}

impl ApiError {
    /// HTTP status of the failed call, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Field errors reported by the backend alongside the failure.
    pub fn field_errors(&self) -> &[BackendFieldError] {
        match self {
            ApiError::Status { errors, .. } => errors,
            _ => &[],
        }
    }
}

/// Index errors from [`crate::form::OrderedList`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("Index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Errors raised by field view models when a mutation is not allowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("At most {max} entries are allowed")]
    MaxEntriesReached { max: usize },

    #[error("An embargo cannot be set while the record and its files are public or the community is restricted")]
    EmbargoUnavailable,

    #[error("An embargo end date is required")]
    EmbargoDateRequired,

    #[error("Embargo end date {until} must be in the future")]
    EmbargoDateNotInFuture { until: NaiveDate },

    #[error(transparent)]
    List(#[from] ListError),
}

/// Top-level error for store and app operations.
#[derive(Debug, Error)]
pub enum DepositError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Serializer(#[from] SerializerError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("The draft has validation errors on {} field(s)", .errors.len())]
    Validation { errors: FieldErrors },

    #[error("No file named '{key}' in this draft")]
    UnknownFile { key: String },

    #[error("Upload of '{key}' failed: {source}")]
    Upload {
        key: String,
        #[source]
        source: ApiError,
    },
}

impl From<ListError> for DepositError {
    fn from(err: ListError) -> Self {
        DepositError::Field(FieldError::List(err))
    }
}
