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

//! # License Field
//!
//! Each persisted [`Right`] is shown through a [`VisibleLicense`] resolved
//! against the record's `ui.rights` catalog. The resolved text lives only on
//! the display value; edits take plain `Right`s so catalog text never ends up
//! in the saved record.

use serde::Serialize;

use crate::error::FieldError;
use crate::form::{ListEdit, OrderedList};
use crate::i18n::SharedTranslator;
use crate::models::{Record, Right, UiRight};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseType {
    Standard,
    Custom,
}

/// A license as displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleLicense {
    pub index: usize,
    pub license_type: LicenseType,
    /// Catalog id for standard licenses, title for custom ones.
    pub key: String,
    /// The persisted entry, kept for editing custom licenses.
    pub initial: Option<Right>,
    pub title: String,
    pub description: String,
    pub link: String,
}

impl VisibleLicense {
    /// Resolve `right` against the display catalog.
    ///
    /// Standard entries match the catalog by id, custom entries by title.
    /// Localized catalog text wins over the entry's own text. The link is the
    /// first non-empty of catalog `props.url`, catalog `link`, entry
    /// `props.url`, entry `link`.
    pub fn new(ui_rights: &[UiRight], right: &Right, index: usize) -> Self {
        let license_type = if right.is_standard() {
            LicenseType::Standard
        } else {
            LicenseType::Custom
        };

        let ui_right = match (&right.id, &right.title) {
            (Some(id), _) => ui_rights.iter().find(|ui| ui.id.as_ref() == Some(id)),
            (None, Some(title)) => ui_rights
                .iter()
                .find(|ui| ui.title_text() == Some(title.as_str())),
            (None, None) => None,
        };

        let title = first_non_empty([
            ui_right.and_then(|ui| ui.title_l10n.as_deref()),
            right.title.as_deref(),
        ]);
        let description = first_non_empty([
            ui_right.and_then(|ui| ui.description_l10n.as_deref()),
            right.description.as_deref(),
        ]);
        let link = first_non_empty([
            ui_right.and_then(UiRight::props_url),
            ui_right.and_then(|ui| ui.link.as_deref()),
            right.props_url(),
            right.link.as_deref(),
        ]);

        Self {
            index,
            license_type,
            key: right
                .id
                .clone()
                .or_else(|| right.title.clone())
                .unwrap_or_default(),
            initial: (license_type == LicenseType::Custom).then(|| right.clone()),
            title,
            description,
            link,
        }
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<&str>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseFieldView {
    pub field_path: String,
    pub label: String,
    pub label_icon: Option<String>,
    pub required: bool,
    pub licenses: Vec<VisibleLicense>,
    pub display_add_buttons: bool,
    pub add_standard_label: String,
    pub add_custom_label: String,
}

pub struct LicenseField {
    field_path: String,
    ui_field_path: String,
    label: String,
    label_icon: Option<String>,
    required: bool,
    max_licenses: Option<usize>,
    translator: SharedTranslator,
}

impl LicenseField {
    /// Unbounded by default; see [`LicenseField::with_max_licenses`].
    pub fn new(translator: SharedTranslator) -> Self {
        Self {
            field_path: "metadata.rights".to_string(),
            ui_field_path: "ui.rights".to_string(),
            label: translator.translate("Licenses"),
            label_icon: Some("drivers license".to_string()),
            required: false,
            max_licenses: None,
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

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_max_licenses(mut self, max: usize) -> Self {
        self.max_licenses = Some(max);
        self
    }

    pub fn field_path(&self) -> &str {
        &self.field_path
    }

    pub fn ui_field_path(&self) -> &str {
        &self.ui_field_path
    }

    pub fn max_licenses(&self) -> Option<usize> {
        self.max_licenses
    }

    /// Add actions are offered while fewer than `max_licenses` entries exist.
    pub fn display_add_buttons(&self, count: usize) -> bool {
        self.max_licenses.map_or(true, |max| count < max)
    }

    pub fn visible_licenses(&self, record: &Record) -> Vec<VisibleLicense> {
        let ui_rights = record.ui_rights();
        record
            .metadata
            .rights
            .iter()
            .enumerate()
            .map(|(index, right)| VisibleLicense::new(ui_rights, right, index))
            .collect()
    }

    pub fn view(&self, record: &Record) -> LicenseFieldView {
        LicenseFieldView {
            field_path: self.field_path.clone(),
            label: self.label.clone(),
            label_icon: self.label_icon.clone(),
            required: self.required,
            licenses: self.visible_licenses(record),
            display_add_buttons: self.display_add_buttons(record.metadata.rights.len()),
            add_standard_label: self.translator.translate("Add standard"),
            add_custom_label: self.translator.translate("Add custom"),
        }
    }

    /// Apply one edit. Adding is refused once the maximum is reached.
    pub fn edit(&self, record: &Record, edit: ListEdit<Right>) -> Result<Record, FieldError> {
        let current = OrderedList::from(record.metadata.rights.clone());
        if let (ListEdit::Push(_), Some(max)) = (&edit, self.max_licenses) {
            if !self.display_add_buttons(current.len()) {
                return Err(FieldError::MaxEntriesReached { max });
            }
        }
        let mut record = record.clone();
        record.metadata.rights = current.apply(edit)?.into_vec();
        Ok(record)
    }
}
