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

//! Domain services above the API clients.
//!
//! The drafts service delegates to its client. The files service adds the
//! upload concurrency cap and progress forwarding. [`DepositService`] bundles
//! both for the store.

mod deposit;
mod drafts;
mod files;

pub use deposit::DepositService;
pub use drafts::{DepositDraftsService, RdmDepositDraftsService};
pub use files::{
    DepositFilesService, RdmDepositFilesService, UploadOutcome, UploadProgressNotifier,
};
