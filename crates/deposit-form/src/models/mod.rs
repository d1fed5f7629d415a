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

//! Domain types for the deposit form.
//!
//! These are the form-side shapes. The backend wire schema lives in
//! [`crate::serializer`].

pub mod access;
pub mod community;
pub mod creatibutor;
pub mod files;
pub mod record;
pub mod right;

pub use access::{Access, Embargo, Visibility};
pub use community::{Community, CommunityAccess};
pub use creatibutor::{Affiliation, Creatibutor, CreatibutorType, Identifier, PersonOrOrg};
pub use files::{FileEntry, FileLinks, FilesListing, FilesSettings, UploadFile};
pub use record::{Metadata, Record, RecordLinks, UiFields, WorkflowStatus};
pub use right::{Right, RightProps, UiRight};
