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

//! # deposit-form-testing
//!
//! Test utilities for the deposit form that need no backend.
//!
//! - [`InMemoryDepositApiClient`] keeps drafts in a map and can be told to
//!   report field errors or fail the next call.
//! - [`InMemoryFileApiClient`] simulates slow uploads and tracks how many run
//!   at once.
//! - [`RecordingProgressNotifier`] records every progress tick.
//! - [`fixtures`] builds configs, backend records and upload files.
//!
//! ```rust,ignore
//! let drafts = Arc::new(InMemoryDepositApiClient::new(serializer.clone()));
//! let files = Arc::new(InMemoryFileApiClient::new());
//! let app = DepositFormApp::new(
//!     DepositFormProps::new(fixtures::config(), fixtures::backend_record())
//!         .with_api_client(drafts.clone())
//!         .with_file_api_client(files.clone()),
//! )?;
//! ```

mod drafts;
mod files;
pub mod fixtures;
mod notifier;

pub use drafts::InMemoryDepositApiClient;
pub use files::InMemoryFileApiClient;
pub use notifier::RecordingProgressNotifier;
