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

//! # Deposit Form
//!
//! The headless core of a research record deposit form: it loads a record,
//! lets field view models edit it, saves and publishes drafts, and uploads
//! files with a bounded number of parallel transfers.
//!
//! ## Layers
//!
//! - [`serializer`]: backend record JSON to form [`models::Record`] and back.
//! - [`api`]: HTTP clients for drafts and files.
//! - [`services`]: draft delegation, upload concurrency and progress.
//! - [`store`]: the single state container and its async operations.
//! - [`fields`]: view models for access rights, creatibutors, licenses and
//!   resource types.
//! - [`app`]: bootstraps all of the above from a [`config::DepositConfig`].
//!
//! The crate never installs a `tracing` subscriber; hosts choose their own.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod fields;
pub mod form;
pub mod i18n;
pub mod models;
pub mod serializer;
pub mod services;
pub mod store;

pub use app::{DepositFormApp, DepositFormProps};
pub use config::{ConfigFormat, ConfigLoader, DepositConfig};
pub use error::{ApiError, DepositError, FieldError, ListError, SerializerError};
pub use form::{FieldErrors, FormState, ListEdit, OrderedList};
pub use models::Record;
pub use serializer::{RdmRecordSerializer, RecordSerializer};
pub use services::DepositService;
pub use store::{configure_store, DepositStore};
