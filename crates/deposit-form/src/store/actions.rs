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

//! Store actions and the reducer that applies them.

use crate::form::{FieldErrors, FormState};
use crate::models::{Community, FileEntry, Record};

use super::state::{ActionState, DepositState, FileState, FileUploadStatus};

/// Every change to [`DepositState`] goes through one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum DepositAction {
    /// The user edited the form.
    FormChanged(Record),
    SaveStarted,
    /// The backend accepted the draft, possibly reporting field errors.
    DraftSaved { record: Record, errors: FieldErrors },
    DraftSaveFailed { errors: FieldErrors },
    PublishStarted,
    DraftPublished { record: Record },
    DraftPublishFailed { errors: FieldErrors },
    DeleteStarted,
    DraftDeleted { record: Record },
    DraftDeleteFailed,
    UploadInitiated { key: String, size: u64 },
    UploadProgress { key: String, percent: u8 },
    UploadFinished { entry: FileEntry },
    UploadFailed { key: String, message: String },
    FileDeleted { key: String },
    CommunityChanged(Option<Community>),
}

/// Apply `action` to `state`.
pub fn reduce(state: &mut DepositState, action: DepositAction) {
    match action {
        DepositAction::FormChanged(record) => {
            state.form.values = record;
        }
        DepositAction::SaveStarted => {
            state.action_state = Some(ActionState::DraftSaveStarted);
        }
        DepositAction::DraftSaved { record, errors } => {
            state.action_state = Some(if errors.is_empty() {
                ActionState::DraftSaveSucceeded
            } else {
                ActionState::DraftHasValidationErrors
            });
            state.form.reset(record, errors);
        }
        DepositAction::DraftSaveFailed { errors } => {
            state.action_state = Some(ActionState::DraftSaveFailed);
            state.form.errors = errors;
        }
        DepositAction::PublishStarted => {
            state.action_state = Some(ActionState::DraftPublishStarted);
        }
        DepositAction::DraftPublished { record } => {
            state.action_state = Some(ActionState::DraftPublished);
            state.form.reset(record, FieldErrors::new());
        }
        DepositAction::DraftPublishFailed { errors } => {
            state.action_state = Some(ActionState::DraftPublishFailed);
            state.form.errors = errors;
        }
        DepositAction::DeleteStarted => {
            state.action_state = Some(ActionState::DraftDeleteStarted);
        }
        DepositAction::DraftDeleted { record } => {
            state.action_state = Some(ActionState::DraftDeleted);
            state.form = FormState::new(record);
            state.files.entries.clear();
        }
        DepositAction::DraftDeleteFailed => {
            state.action_state = Some(ActionState::DraftDeleteFailed);
        }
        DepositAction::UploadInitiated { key, size } => {
            state
                .files
                .entries
                .insert(key.clone(), FileState::queued(key, size));
        }
        DepositAction::UploadProgress { key, percent } => {
            let file = state
                .files
                .entries
                .entry(key.clone())
                .or_insert_with(|| FileState {
                    key,
                    ..Default::default()
                });
            file.progress_percentage = percent.min(100);
            if !file.status.is_terminal() {
                file.status = FileUploadStatus::Uploading;
            }
        }
        DepositAction::UploadFinished { entry } => {
            let mut file = FileState::from_entry(entry);
            file.status = FileUploadStatus::Finished;
            file.progress_percentage = 100;
            if let Some(previous) = state.files.entries.get(&file.key) {
                file.size = file.size.or(previous.size);
            }
            state.files.entries.insert(file.key.clone(), file);
        }
        DepositAction::UploadFailed { key, message } => {
            let file = state
                .files
                .entries
                .entry(key.clone())
                .or_insert_with(|| FileState {
                    key,
                    ..Default::default()
                });
            file.status = FileUploadStatus::Failed;
            file.error = Some(message);
        }
        DepositAction::FileDeleted { key } => {
            state.files.entries.remove(&key);
        }
        DepositAction::CommunityChanged(community) => {
            state.editor.selected_community = community;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DepositConfig;
    use crate::store::state::{EditorState, FilesState, Permissions};

    fn state() -> DepositState {
        DepositState {
            config: DepositConfig::default(),
            editor: EditorState::default(),
            files: FilesState::default(),
            permissions: Permissions::default(),
            form: FormState::new(Record::default()),
            action_state: None,
        }
    }

    #[test]
    fn test_saved_with_errors_reports_validation_state() {
        let mut state = state();
        let mut errors = FieldErrors::new();
        errors.add("metadata.title", "Missing data for required field.");
        let mut record = Record::default();
        record.id = Some("abcd".into());

        reduce(&mut state, DepositAction::DraftSaved { record, errors });

        assert_eq!(state.action_state, Some(ActionState::DraftHasValidationErrors));
        assert_eq!(state.form.values.id.as_deref(), Some("abcd"));
        assert_eq!(state.form.initial_errors.len(), 1);
        assert!(!state.form.is_dirty());
    }

    #[test]
    fn test_progress_is_last_write_wins() {
        let mut state = state();
        reduce(
            &mut state,
            DepositAction::UploadInitiated {
                key: "a.txt".into(),
                size: 4,
            },
        );
        for percent in [10, 60, 40] {
            reduce(
                &mut state,
                DepositAction::UploadProgress {
                    key: "a.txt".into(),
                    percent,
                },
            );
        }
        let file = state.files.get("a.txt").unwrap();
        assert_eq!(file.progress_percentage, 40);
        assert_eq!(file.status, FileUploadStatus::Uploading);
    }

    #[test]
    fn test_progress_after_failure_keeps_terminal_status() {
        let mut state = state();
        reduce(
            &mut state,
            DepositAction::UploadFailed {
                key: "a.txt".into(),
                message: "boom".into(),
            },
        );
        reduce(
            &mut state,
            DepositAction::UploadProgress {
                key: "a.txt".into(),
                percent: 100,
            },
        );
        let file = state.files.get("a.txt").unwrap();
        assert_eq!(file.status, FileUploadStatus::Failed);
        assert_eq!(file.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_finished_upload_keeps_local_size() {
        let mut state = state();
        reduce(
            &mut state,
            DepositAction::UploadInitiated {
                key: "a.txt".into(),
                size: 4,
            },
        );
        reduce(
            &mut state,
            DepositAction::UploadFinished {
                entry: FileEntry {
                    key: "a.txt".into(),
                    ..Default::default()
                },
            },
        );
        let file = state.files.get("a.txt").unwrap();
        assert_eq!(file.status, FileUploadStatus::Finished);
        assert_eq!(file.size, Some(4));
        assert_eq!(file.progress_percentage, 100);
    }

    #[test]
    fn test_delete_resets_form_and_files() {
        let mut state = state();
        state.form.values.metadata.title = "Draft".into();
        reduce(
            &mut state,
            DepositAction::UploadInitiated {
                key: "a.txt".into(),
                size: 1,
            },
        );
        reduce(
            &mut state,
            DepositAction::DraftDeleted {
                record: Record::default(),
            },
        );
        assert_eq!(state.action_state, Some(ActionState::DraftDeleted));
        assert!(state.files.entries.is_empty());
        assert!(state.form.values.metadata.title.is_empty());
    }
}
