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

//! # Deposit Store
//!
//! A single state container for the form session. State changes only through
//! [`DepositAction`]s applied by the reducer; the async operations on
//! [`DepositStore`] call the [`DepositService`] and dispatch the outcome.
//!
//! The lock is never held across an `.await`.

mod actions;
mod state;

pub use actions::{reduce, DepositAction};
pub use state::{
    ActionState, DepositState, EditorState, FileState, FileUploadStatus, FilesState, Permissions,
};

use futures::future::join_all;
use parking_lot::RwLock;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::DepositConfig;
use crate::error::{ApiError, DepositError};
use crate::events;
use crate::form::{FieldErrors, FormState};
use crate::models::{Community, FilesListing, FilesSettings, Record, UploadFile};
use crate::serializer::RecordSerializer;
use crate::services::{DepositService, UploadOutcome, UploadProgressNotifier};

/// What the store is built from.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub config: DepositConfig,
    pub record: Record,
    pub preselected_community: Option<Community>,
    pub files: FilesListing,
    pub permissions: Permissions,
}

/// A draft as the backend stored it, with the errors it reported.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedDraft {
    pub record: Record,
    pub errors: FieldErrors,
}

/// Dispatch-only handle on the store state.
///
/// Holds no services, so collaborators such as the progress notifier can
/// keep one without owning the store.
#[derive(Clone)]
pub struct StoreDispatcher {
    state: Arc<RwLock<DepositState>>,
}

impl StoreDispatcher {
    pub fn dispatch(&self, action: DepositAction) {
        debug!(?action, "Dispatching store action");
        reduce(&mut self.state.write(), action);
    }

    /// Derive an action from the current state and apply it under one write
    /// guard, so no other dispatch lands in between. Nothing is applied on
    /// error.
    pub fn dispatch_with<E>(
        &self,
        derive: impl FnOnce(&DepositState) -> Result<DepositAction, E>,
    ) -> Result<(), E> {
        let mut state = self.state.write();
        let action = derive(&state)?;
        debug!(?action, "Dispatching store action");
        reduce(&mut state, action);
        Ok(())
    }

    pub fn state(&self) -> DepositState {
        self.state.read().clone()
    }
}

/// Forwards upload progress into the store.
pub struct StoreProgressNotifier {
    dispatcher: StoreDispatcher,
}

impl StoreProgressNotifier {
    pub fn new(dispatcher: StoreDispatcher) -> Self {
        Self { dispatcher }
    }
}

impl UploadProgressNotifier for StoreProgressNotifier {
    fn on_upload_progress(&self, key: &str, percent: u8) {
        self.dispatcher.dispatch(DepositAction::UploadProgress {
            key: key.to_string(),
            percent,
        });
    }
}

#[derive(Clone)]
pub struct DepositStore {
    dispatcher: StoreDispatcher,
    service: DepositService,
    serializer: Arc<dyn RecordSerializer>,
}

/// Build the store and register its progress notifier on the files service.
pub fn configure_store(
    init: StoreConfig,
    service: DepositService,
    serializer: Arc<dyn RecordSerializer>,
) -> DepositStore {
    let mut record = init.record;
    if let Some(enabled) = init.files.enabled {
        record.files.enabled = enabled;
    }
    if init.files.default_preview.is_some() {
        record.files.default_preview = init.files.default_preview.clone();
    }

    let state = DepositState {
        config: init.config,
        editor: EditorState {
            selected_community: init.preselected_community,
        },
        files: FilesState::from_listing(init.files),
        permissions: init.permissions,
        form: FormState::new(record),
        action_state: None,
    };

    let store = DepositStore {
        dispatcher: StoreDispatcher {
            state: Arc::new(RwLock::new(state)),
        },
        service,
        serializer,
    };
    store
        .service
        .set_progress_notifier(Arc::new(StoreProgressNotifier::new(store.dispatcher())));
    store
}

impl DepositStore {
    /// Snapshot of the current state.
    pub fn state(&self) -> DepositState {
        self.dispatcher.state()
    }

    /// Read part of the state without cloning all of it.
    pub fn read<R>(&self, f: impl FnOnce(&DepositState) -> R) -> R {
        f(&self.dispatcher.state.read())
    }

    pub fn dispatch(&self, action: DepositAction) {
        self.dispatcher.dispatch(action);
    }

    pub fn dispatcher(&self) -> StoreDispatcher {
        self.dispatcher.clone()
    }

    pub fn service(&self) -> &DepositService {
        &self.service
    }

    pub fn serializer(&self) -> &Arc<dyn RecordSerializer> {
        &self.serializer
    }

    /// Apply a user edit to the form values.
    ///
    /// The edit runs under the state write lock and must not call back into
    /// the store.
    pub fn update_form(&self, edit: impl FnOnce(&mut Record)) {
        let _ = self.try_update_form(|current| {
            let mut record = current.clone();
            edit(&mut record);
            Ok::<_, Infallible>(record)
        });
    }

    /// Apply an edit that may be refused. Nothing is dispatched on error.
    pub fn try_update_form<E>(
        &self,
        edit: impl FnOnce(&Record) -> Result<Record, E>,
    ) -> Result<(), E> {
        self.dispatcher
            .dispatch_with(|s| edit(&s.form.values).map(DepositAction::FormChanged))
    }

    /// Save the current form values, creating the draft if it has no id yet.
    ///
    /// Field errors reported with a successful save do not fail the call;
    /// they land in the form state.
    pub async fn save_draft(&self) -> Result<SavedDraft, DepositError> {
        self.dispatch(DepositAction::SaveStarted);
        let draft = self.read(|s| s.form.values.clone());
        self.persist(&draft).await
    }

    /// Save, then publish when the save reported no field errors.
    pub async fn publish_draft(&self) -> Result<Record, DepositError> {
        self.dispatch(DepositAction::PublishStarted);
        let draft = self.read(|s| s.form.values.clone());

        let saved = match self.persist(&draft).await {
            Ok(saved) => saved,
            Err(e) => {
                let errors = self.read(|s| s.form.errors.clone());
                self.dispatch(DepositAction::DraftPublishFailed { errors });
                return Err(e);
            }
        };

        if !saved.errors.is_empty() {
            warn!(
                event_type = events::DRAFT_PUBLISH_FAILED,
                record_id = saved.record.id.as_deref().unwrap_or_default(),
                field_errors = saved.errors.len(),
                "Publish refused: draft has validation errors"
            );
            self.dispatch(DepositAction::DraftPublishFailed {
                errors: saved.errors.clone(),
            });
            return Err(DepositError::Validation {
                errors: saved.errors,
            });
        }

        match self.service.publish_draft(&saved.record).await {
            Ok(response) => {
                self.dispatch(DepositAction::DraftPublished {
                    record: response.data.clone(),
                });
                Ok(response.data)
            }
            Err(e) => {
                let errors = self.serializer.deserialize_errors(e.field_errors());
                self.dispatch(DepositAction::DraftPublishFailed { errors });
                Err(e.into())
            }
        }
    }

    /// Discard the draft. An unsaved draft is only reset locally.
    pub async fn delete_draft(&self) -> Result<(), DepositError> {
        self.dispatch(DepositAction::DeleteStarted);
        let draft = self.read(|s| s.form.values.clone());

        if draft.links.self_.is_some() {
            if let Err(e) = self.service.delete_draft(&draft.links).await {
                self.dispatch(DepositAction::DraftDeleteFailed);
                return Err(e.into());
            }
        }

        let record = Record {
            files: FilesSettings {
                enabled: draft.files.enabled,
                ..Default::default()
            },
            ..Default::default()
        };
        self.dispatch(DepositAction::DraftDeleted { record });
        Ok(())
    }

    /// Upload files to the draft, saving it first when it has no files link.
    ///
    /// Each file finishes or fails on its own; only a failure to create the
    /// draft fails the whole call.
    pub async fn upload_files(
        &self,
        files: Vec<UploadFile>,
    ) -> Result<Vec<UploadOutcome>, DepositError> {
        let mut links = self.read(|s| s.form.values.links.clone());
        if links.files.is_none() {
            links = self.save_draft().await?.record.links;
        }
        let init_url = links.files.ok_or(ApiError::MissingLink("files"))?;

        for file in &files {
            self.dispatch(DepositAction::UploadInitiated {
                key: file.key.clone(),
                size: file.size(),
            });
        }

        let init_url = init_url.as_str();
        let outcomes = join_all(files.into_iter().map(|file| async move {
            let key = file.key.clone();
            let result = self.service.upload_file(init_url, file).await;
            match &result {
                Ok(entry) => self.dispatch(DepositAction::UploadFinished {
                    entry: entry.clone(),
                }),
                Err(e) => self.dispatch(DepositAction::UploadFailed {
                    key: key.clone(),
                    message: e.to_string(),
                }),
            }
            (key, result)
        }))
        .await;
        Ok(outcomes)
    }

    /// Remove a file from the draft. Files never sent to the backend are
    /// only dropped locally.
    pub async fn delete_file(&self, key: &str) -> Result<(), DepositError> {
        let links = self
            .read(|s| s.files.get(key).map(|f| f.links.clone()))
            .ok_or_else(|| DepositError::UnknownFile {
                key: key.to_string(),
            })?;

        if links.self_.is_some() {
            self.service.delete_file(&links).await?;
        }
        self.dispatch(DepositAction::FileDeleted {
            key: key.to_string(),
        });
        Ok(())
    }

    /// Select the community the draft will be submitted to.
    pub fn change_community(&self, community: Option<Community>) {
        info!(
            event_type = events::COMMUNITY_CHANGED,
            community_id = community.as_ref().map(|c| c.id.as_str()).unwrap_or_default(),
            "Selected community changed"
        );
        self.dispatch(DepositAction::CommunityChanged(community));
    }

    async fn persist(&self, draft: &Record) -> Result<SavedDraft, DepositError> {
        let result = if draft.id.is_none() {
            self.service.create_draft(draft).await
        } else {
            self.service.save_draft(draft).await
        };

        match result {
            Ok(response) => {
                let errors = self.serializer.deserialize_errors(&response.errors);
                self.dispatch(DepositAction::DraftSaved {
                    record: response.data.clone(),
                    errors: errors.clone(),
                });
                Ok(SavedDraft {
                    record: response.data,
                    errors,
                })
            }
            Err(e) => {
                let errors = self.serializer.deserialize_errors(e.field_errors());
                self.dispatch(DepositAction::DraftSaveFailed { errors });
                Err(e.into())
            }
        }
    }
}
