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

//! Field view models.
//!
//! Each field reads one or more paths of the form state and derives what a
//! widget shows. Edits return an updated [`Record`](crate::models::Record)
//! that the caller dispatches to the store.

pub mod access_right;
pub mod creatibutors;
pub mod license;
mod options;
pub mod resource_type;

pub use access_right::{
    AccessLevel, AccessMessage, AccessRightField, AccessRightView, EmbargoSelection, EmbargoView,
    FilesAccessView, MessageTone, MetadataAccessView,
};
pub use creatibutors::{
    display_name, AutocompleteNames, CreatibutorItem, CreatibutorsField, CreatibutorsSchema,
    CreatibutorsView, ModalLabels,
};
pub use license::{LicenseField, LicenseFieldView, LicenseType, VisibleLicense};
pub use options::{sort_options, SelectOption};
pub use resource_type::{GroupedError, ResourceTypeField, ResourceTypeOption};
