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

//! # Creatibutors Field
//!
//! Creators and contributors are ordered lists. Adding appends; every other
//! edit addresses an entry by its displayed index.

use serde::{Deserialize, Serialize};

use super::options::{sort_options, SelectOption};
use crate::error::FieldError;
use crate::form::{FormState, ListEdit, OrderedList};
use crate::i18n::SharedTranslator;
use crate::models::{Creatibutor, CreatibutorType, Record};

/// Which list the field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatibutorsSchema {
    Creators,
    Contributors,
}

impl CreatibutorsSchema {
    pub fn default_field_path(self) -> &'static str {
        match self {
            CreatibutorsSchema::Creators => "metadata.creators",
            CreatibutorsSchema::Contributors => "metadata.contributors",
        }
    }

    /// Creators are required, contributors are not.
    pub fn is_required(self) -> bool {
        self == CreatibutorsSchema::Creators
    }
}

/// How the name input offers suggestions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutocompleteNames {
    #[default]
    Search,
    SearchOnly,
    Off,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalLabels {
    pub add_label: String,
    pub edit_label: String,
}

/// `family, given (affiliation)` for persons, `name (affiliation)` for
/// organizations. Missing parts render as empty.
pub fn display_name(creatibutor: &Creatibutor) -> String {
    let person = &creatibutor.person_or_org;
    let affiliation = creatibutor
        .primary_affiliation_name()
        .filter(|name| !name.is_empty())
        .map(|name| format!(" ({name})"))
        .unwrap_or_default();

    match person.kind {
        CreatibutorType::Person => {
            let family_name = person.family_name.as_deref().unwrap_or_default();
            let given_name = person
                .given_name
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(|name| format!(", {name}"))
                .unwrap_or_default();
            format!("{family_name}{given_name}{affiliation}")
        }
        CreatibutorType::Organization => {
            let name = person.name.as_deref().unwrap_or_default();
            format!("{name}{affiliation}")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatibutorItem {
    /// Stable widget key: `{field_path}.{index}`.
    pub key: String,
    pub index: usize,
    pub display_name: String,
    pub role: Option<String>,
    pub identifiers_error: Option<String>,
    pub value: Creatibutor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatibutorsView {
    pub field_path: String,
    pub label: String,
    pub label_icon: Option<String>,
    pub required: bool,
    pub items: Vec<CreatibutorItem>,
    /// List-level error message, shown next to the add button.
    pub error: Option<String>,
    pub has_error: bool,
    pub add_button_label: String,
    pub modal: ModalLabels,
    pub role_options: Vec<SelectOption>,
    pub autocomplete_names: AutocompleteNames,
    pub show_role: bool,
    pub show_person_search: bool,
}

pub struct CreatibutorsField {
    field_path: String,
    schema: CreatibutorsSchema,
    label: String,
    label_icon: Option<String>,
    role_options: Vec<SelectOption>,
    autocomplete_names: AutocompleteNames,
    add_button_label: String,
    modal: ModalLabels,
    show_role: bool,
    show_person_search: bool,
}

impl CreatibutorsField {
    pub fn new(schema: CreatibutorsSchema, translator: SharedTranslator) -> Self {
        Self {
            field_path: schema.default_field_path().to_string(),
            schema,
            label: translator.translate("Creators"),
            label_icon: Some("user".to_string()),
            role_options: Vec::new(),
            autocomplete_names: AutocompleteNames::default(),
            add_button_label: translator.translate("Add creator"),
            modal: ModalLabels {
                add_label: translator.translate("Add creator"),
                edit_label: translator.translate("Edit creator"),
            },
            show_role: schema == CreatibutorsSchema::Contributors,
            show_person_search: true,
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

    pub fn with_add_button_label(mut self, label: impl Into<String>) -> Self {
        self.add_button_label = label.into();
        self
    }

    pub fn with_modal(mut self, modal: ModalLabels) -> Self {
        self.modal = modal;
        self
    }

    /// Role options are shown sorted by their text.
    pub fn with_role_options(mut self, options: Vec<SelectOption>) -> Self {
        self.role_options = sort_options(options);
        self
    }

    pub fn with_autocomplete_names(mut self, mode: AutocompleteNames) -> Self {
        self.autocomplete_names = mode;
        self
    }

    pub fn with_show_role(mut self, show: bool) -> Self {
        self.show_role = show;
        self
    }

    pub fn with_show_person_search(mut self, show: bool) -> Self {
        self.show_person_search = show;
        self
    }

    pub fn field_path(&self) -> &str {
        &self.field_path
    }

    pub fn schema(&self) -> CreatibutorsSchema {
        self.schema
    }

    pub fn list(&self, record: &Record) -> OrderedList<Creatibutor> {
        OrderedList::from(self.entries(record).to_vec())
    }

    pub fn view(&self, form: &FormState) -> CreatibutorsView {
        let current = self.entries(&form.values);
        let unchanged = current == self.entries(&form.initial_values);
        let error = form.list_error(&self.field_path, unchanged);
        let has_error = form.has_list_errors(&self.field_path, unchanged);

        let items = current
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let key = format!("{}.{}", self.field_path, index);
                let identifiers_path = format!("{key}.person_or_org.identifiers");
                CreatibutorItem {
                    identifiers_error: form.list_error(&identifiers_path, unchanged),
                    display_name: display_name(value),
                    role: value.role.clone(),
                    value: value.clone(),
                    key,
                    index,
                }
            })
            .collect();

        CreatibutorsView {
            field_path: self.field_path.clone(),
            label: self.label.clone(),
            label_icon: self.label_icon.clone(),
            required: self.schema.is_required(),
            items,
            error,
            has_error,
            add_button_label: self.add_button_label.clone(),
            modal: self.modal.clone(),
            role_options: self.role_options.clone(),
            autocomplete_names: self.autocomplete_names,
            show_role: self.show_role,
            show_person_search: self.show_person_search,
        }
    }

    /// Apply one edit and return the updated record.
    pub fn edit(&self, record: &Record, edit: ListEdit<Creatibutor>) -> Result<Record, FieldError> {
        let updated = self.list(record).apply(edit)?;
        let mut record = record.clone();
        *self.entries_mut(&mut record) = updated.into_vec();
        Ok(record)
    }

    fn entries<'a>(&self, record: &'a Record) -> &'a [Creatibutor] {
        match self.schema {
            CreatibutorsSchema::Creators => &record.metadata.creators,
            CreatibutorsSchema::Contributors => &record.metadata.contributors,
        }
    }

    fn entries_mut<'a>(&self, record: &'a mut Record) -> &'a mut Vec<Creatibutor> {
        match self.schema {
            CreatibutorsSchema::Creators => &mut record.metadata.creators,
            CreatibutorsSchema::Contributors => &mut record.metadata.contributors,
        }
    }
}
