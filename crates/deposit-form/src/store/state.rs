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
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::config::DepositConfig;
use crate::form::FormState;
use crate::models::{Community, FileEntry, FileLinks, FilesListing, Record};

/// Last draft operation and how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionState {
    DraftSaveStarted,
    DraftSaveSucceeded,
    DraftHasValidationErrors,
    DraftSaveFailed,
    DraftPublishStarted,
    DraftPublishFailed,
    DraftPublished,
    DraftDeleteStarted,
    DraftDeleteFailed,
    DraftDeleted,
}

/// Upload state of one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileUploadStatus {
    /// Known to the backend but not committed, or queued locally.
    #[default]
    Pending,
    Uploading,
    Finished,
    Failed,
}

impl FileUploadStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, FileUploadStatus::Finished | FileUploadStatus::Failed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileState {
    pub key: String,
    pub size: Option<u64>,
    pub checksum: Option<String>,
    pub mimetype: Option<String>,
    pub status: FileUploadStatus,
    pub progress_percentage: u8,
    pub links: FileLinks,
    pub error: Option<String>,
}

impl FileState {
    pub fn queued(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size: Some(size),
            ..Default::default()
        }
    }

    /// Local view of a backend entry. Committed entries count as finished.
    pub fn from_entry(entry: FileEntry) -> Self {
        let completed = entry.status.as_deref() == Some("completed");
        Self {
            key: entry.key,
            size: entry.size,
            checksum: entry.checksum,
            mimetype: entry.mimetype,
            status: if completed {
                FileUploadStatus::Finished
            } else {
                FileUploadStatus::Pending
            },
            progress_percentage: if completed { 100 } else { 0 },
            links: entry.links,
            error: None,
        }
    }
}

/// Files of the draft, keyed by file name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilesState {
    pub entries: BTreeMap<String, FileState>,
    pub links: Map<String, Value>,
}

impl FilesState {
    pub fn from_listing(listing: FilesListing) -> Self {
        Self {
            entries: listing
                .entries
                .into_iter()
                .map(|entry| (entry.key.clone(), FileState::from_entry(entry)))
                .collect(),
            links: listing.links,
        }
    }

    pub fn get(&self, key: &str) -> Option<&FileState> {
        self.entries.get(key)
    }

    pub fn is_uploading(&self) -> bool {
        self.entries
            .values()
            .any(|f| f.status == FileUploadStatus::Uploading)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    pub selected_community: Option<Community>,
}

/// Permission flags granted to the current user, e.g. `can_manage`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions(BTreeMap<String, bool>);

impl Permissions {
    pub fn new(flags: BTreeMap<String, bool>) -> Self {
        Self(flags)
    }

    /// Missing flags are denied.
    pub fn allows(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }
}

/// Everything the deposit form shares across its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DepositState {
    pub config: DepositConfig,
    pub editor: EditorState,
    pub files: FilesState,
    pub permissions: Permissions,
    pub form: FormState,
    pub action_state: Option<ActionState>,
}

impl DepositState {
    pub fn record(&self) -> &Record {
        &self.form.values
    }

    /// Visibility of the selected community; public when there is none.
    pub fn community_is_public(&self) -> bool {
        self.editor
            .selected_community
            .as_ref()
            .map_or(true, |c| c.access.visibility.is_public())
    }
}
