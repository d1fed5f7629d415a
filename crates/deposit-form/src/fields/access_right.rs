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

//! # Access Right Field
//!
//! Derives what the depositor is told about record and file visibility from
//! the record's access settings, the selected community's visibility and
//! whether the record has files at all. A restricted community makes the
//! record effectively restricted. With files disabled the record is metadata
//! only and the persisted files visibility is ignored.
//!
//! The only edit this field performs is the embargo selection.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::FieldError;
use crate::i18n::SharedTranslator;
use crate::models::{Access, Community, Embargo, Record, Visibility};
use crate::store::DepositState;

/// Visual weight of the access message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageTone {
    Positive,
    Warning,
    Negative,
}

/// The effective protection level shown to the depositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Public,
    RestrictedFiles,
    Restricted,
    EmbargoedFilesOnly,
    EmbargoedFullRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessMessage {
    pub level: AccessLevel,
    pub title: String,
    pub body: String,
    pub icon: &'static str,
    pub tone: MessageTone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataAccessView {
    pub visibility: Visibility,
    pub public_enabled: bool,
    pub restricted_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilesAccessView {
    pub metadata_only: bool,
    /// `None` when the record has no files.
    pub visibility: Option<Visibility>,
    pub public_enabled: bool,
    pub restricted_enabled: bool,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbargoView {
    pub enabled: bool,
    pub active: bool,
    pub until: Option<NaiveDate>,
    pub reason: Option<String>,
    pub help: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRightView {
    pub label: String,
    pub label_icon: Option<String>,
    pub metadata: MetadataAccessView,
    pub files: FilesAccessView,
    pub message: AccessMessage,
    pub options_header: String,
    pub embargo: EmbargoView,
}

/// What the depositor picked in the embargo options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbargoSelection {
    pub active: bool,
    pub until: Option<NaiveDate>,
    pub reason: Option<String>,
}

pub struct AccessRightField {
    field_path: String,
    label: String,
    label_icon: Option<String>,
    translator: SharedTranslator,
}

impl AccessRightField {
    pub fn new(translator: SharedTranslator) -> Self {
        Self {
            field_path: "access".to_string(),
            label: translator.translate("Visibility"),
            label_icon: Some("shield".to_string()),
            translator,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_label_icon(mut self, icon: Option<String>) -> Self {
        self.label_icon = icon;
        self
    }

    pub fn field_path(&self) -> &str {
        &self.field_path
    }

    /// View for the record and community held in the store.
    pub fn view_state(&self, state: &DepositState) -> AccessRightView {
        self.view(state.record(), state.editor.selected_community.as_ref())
    }

    pub fn view(&self, record: &Record, community: Option<&Community>) -> AccessRightView {
        let community_access = community_visibility(community);
        let metadata_only = record.is_metadata_only();
        let access = &record.access;

        AccessRightView {
            label: self.label.clone(),
            label_icon: self.label_icon.clone(),
            metadata: metadata_view(access, community_access),
            files: self.files_view(access, community_access, metadata_only),
            message: self.message(access, community_access, metadata_only),
            options_header: self.translator.translate("Options"),
            embargo: self.embargo_view(access, community_access, metadata_only),
        }
    }

    /// Access message for the given settings.
    pub fn message(
        &self,
        access: &Access,
        community_access: Visibility,
        metadata_only: bool,
    ) -> AccessMessage {
        let t = &self.translator;
        let public_record = access.record.is_public() && community_access.is_public();
        let public_files = metadata_only || access.files.is_public();
        let embargo_date = access
            .embargo
            .as_ref()
            .filter(|e| e.active)
            .map(|e| e.until.map(|d| d.to_string()).unwrap_or_default());

        match (public_record, public_files, embargo_date) {
            (true, true, _) => AccessMessage {
                level: AccessLevel::Public,
                title: t.translate("Public"),
                body: if metadata_only {
                    t.translate("The record is publicly accessible.")
                } else {
                    t.translate("The record and files are publicly accessible.")
                },
                icon: "lock open",
                tone: MessageTone::Positive,
            },
            (true, false, None) => AccessMessage {
                level: AccessLevel::RestrictedFiles,
                title: t.translate("Restricted files"),
                body: t.translate(
                    "The record is publicly accessible, but files are restricted to users with access.",
                ),
                icon: "lock",
                tone: MessageTone::Warning,
            },
            (true, false, Some(date)) => AccessMessage {
                level: AccessLevel::EmbargoedFilesOnly,
                title: t.translate("Embargoed (files-only)"),
                body: t.translate_with(
                    "The record is publicly accessible. On {{date}} the files will become publicly accessible.",
                    &[("date", date.as_str())],
                ),
                icon: "clock outline",
                tone: MessageTone::Warning,
            },
            (false, _, None) => AccessMessage {
                level: AccessLevel::Restricted,
                title: t.translate("Restricted"),
                body: if metadata_only {
                    t.translate("The record is restricted to users with access.")
                } else {
                    t.translate("The record and files are restricted to users with access.")
                },
                icon: "lock",
                tone: MessageTone::Negative,
            },
            (false, _, Some(date)) => AccessMessage {
                level: AccessLevel::EmbargoedFullRecord,
                title: t.translate("Embargoed (full record)"),
                body: if metadata_only {
                    t.translate_with(
                        "On {{date}} the record will become publicly accessible.",
                        &[("date", date.as_str())],
                    )
                } else {
                    t.translate_with(
                        "On {{date}} the record and files will become publicly accessible.",
                        &[("date", date.as_str())],
                    )
                },
                icon: "clock outline",
                tone: MessageTone::Negative,
            },
        }
    }

    /// Apply an embargo selection to the record's access settings.
    ///
    /// Activating an embargo needs something restricted under a public
    /// community and an end date after `today`. Deactivating always works and
    /// clears the date and reason.
    pub fn select_embargo(
        &self,
        record: &Record,
        community: Option<&Community>,
        selection: EmbargoSelection,
        today: NaiveDate,
    ) -> Result<Record, FieldError> {
        let mut record = record.clone();
        if !selection.active {
            record.access.embargo = Some(Embargo::inactive());
            return Ok(record);
        }

        let community_access = community_visibility(community);
        if !embargo_available(&record.access, community_access, record.is_metadata_only()) {
            return Err(FieldError::EmbargoUnavailable);
        }
        let until = selection.until.ok_or(FieldError::EmbargoDateRequired)?;
        if until <= today {
            return Err(FieldError::EmbargoDateNotInFuture { until });
        }

        let extra = record.access.embargo.take().map(|e| e.extra).unwrap_or_default();
        record.access.embargo = Some(Embargo {
            active: true,
            until: Some(until),
            reason: selection.reason.filter(|r| !r.trim().is_empty()),
            extra,
        });
        Ok(record)
    }

    fn files_view(
        &self,
        access: &Access,
        community_access: Visibility,
        metadata_only: bool,
    ) -> FilesAccessView {
        if metadata_only {
            return FilesAccessView {
                metadata_only,
                visibility: None,
                public_enabled: false,
                restricted_enabled: false,
                notice: Some(self.translator.translate("The record has no files.")),
            };
        }
        FilesAccessView {
            metadata_only,
            visibility: Some(access.files),
            public_enabled: access.record.is_public() && community_access.is_public(),
            restricted_enabled: true,
            notice: None,
        }
    }

    fn embargo_view(
        &self,
        access: &Access,
        community_access: Visibility,
        metadata_only: bool,
    ) -> EmbargoView {
        let enabled = embargo_available(access, community_access, metadata_only);
        let embargo = access.embargo.clone().unwrap_or_default();
        let help = if enabled {
            self.translator.translate(
                "Embargoed content becomes publicly accessible on the selected date.",
            )
        } else {
            self.translator
                .translate("Record or files protection must be restricted to apply an embargo.")
        };
        EmbargoView {
            enabled,
            active: enabled && embargo.active,
            until: embargo.until,
            reason: embargo.reason,
            help,
        }
    }
}

fn metadata_view(access: &Access, community_access: Visibility) -> MetadataAccessView {
    MetadataAccessView {
        visibility: access.record,
        public_enabled: community_access.is_public(),
        restricted_enabled: true,
    }
}

fn community_visibility(community: Option<&Community>) -> Visibility {
    community.map_or(Visibility::Public, |c| c.access.visibility)
}

/// An embargo needs a public community and something restricted to lift.
fn embargo_available(access: &Access, community_access: Visibility, metadata_only: bool) -> bool {
    let restricted_files = !metadata_only && !access.files.is_public();
    community_access.is_public() && (!access.record.is_public() || restricted_files)
}
