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

//! Default serializer for the research-data records schema.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::backend::{
    BackendCreatibutor, BackendMetadata, BackendRecord, BackendRight, LocalizedText,
    VocabularyRef,
};
use super::{remove_empty_values, RecordSerializer};
use crate::api::BackendFieldError;
use crate::error::SerializerError;
use crate::form::FieldErrors;
use crate::models::{Creatibutor, Metadata, Record, Right};

/// Serializer applying a default locale to localized text and flattening
/// vocabulary references to bare ids.
#[derive(Debug, Clone)]
pub struct RdmRecordSerializer {
    default_locale: String,
    vocabularies: Vec<String>,
}

impl RdmRecordSerializer {
    /// # Arguments
    ///
    /// * `default_locale` - Locale whose text the form edits directly
    /// * `vocabularies` - Names of vocabulary-backed custom fields
    pub fn new(default_locale: impl Into<String>, vocabularies: Vec<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            vocabularies,
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    fn split_localized(&self, text: Option<LocalizedText>) -> (Option<String>, BTreeMap<String, String>) {
        match text {
            Some(mut translations) => {
                let value = translations.remove(&self.default_locale);
                (value, translations)
            }
            None => (None, BTreeMap::new()),
        }
    }

    fn join_localized(
        &self,
        value: &Option<String>,
        translations: &BTreeMap<String, String>,
    ) -> Option<LocalizedText> {
        let mut text = translations.clone();
        if let Some(value) = value {
            text.insert(self.default_locale.clone(), value.clone());
        }
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn deserialize_right(&self, right: BackendRight) -> Right {
        let (title, title_translations) = self.split_localized(right.title);
        let (description, description_translations) = self.split_localized(right.description);
        Right {
            id: right.id,
            title,
            title_translations,
            description,
            description_translations,
            link: right.link,
            props: right.props,
            icon: right.icon,
            extra: right.extra,
        }
    }

    fn serialize_right(&self, right: &Right) -> BackendRight {
        BackendRight {
            id: right.id.clone(),
            title: self.join_localized(&right.title, &right.title_translations),
            description: self.join_localized(&right.description, &right.description_translations),
            link: right.link.clone(),
            props: right.props.clone(),
            icon: right.icon.clone(),
            extra: right.extra.clone(),
        }
    }

    fn flatten_vocabulary_fields(
        &self,
        custom_fields: &mut Map<String, Value>,
    ) -> Result<(), SerializerError> {
        for field in &self.vocabularies {
            let Some(value) = custom_fields.get_mut(field) else {
                continue;
            };
            let flattened = match value {
                Value::Null => continue,
                Value::Object(_) => Value::String(vocabulary_id(field, value)?),
                Value::Array(items) => Value::Array(
                    items
                        .iter()
                        .map(|item| vocabulary_id(field, item).map(Value::String))
                        .collect::<Result<_, _>>()?,
                ),
                other => {
                    return Err(SerializerError::Vocabulary {
                        field: field.clone(),
                        reason: format!("expected an object or a list, found {}", kind_of(other)),
                    })
                }
            };
            *value = flattened;
        }
        Ok(())
    }

    fn inflate_vocabulary_fields(
        &self,
        custom_fields: &mut Map<String, Value>,
    ) -> Result<(), SerializerError> {
        for field in &self.vocabularies {
            let Some(value) = custom_fields.get_mut(field) else {
                continue;
            };
            let inflated = match value {
                Value::Null => continue,
                Value::String(id) => vocabulary_ref(id),
                Value::Array(items) => Value::Array(
                    items
                        .iter()
                        .map(|item| match item {
                            Value::String(id) => Ok(vocabulary_ref(id)),
                            other => Err(SerializerError::Vocabulary {
                                field: field.clone(),
                                reason: format!("expected an id, found {}", kind_of(other)),
                            }),
                        })
                        .collect::<Result<_, _>>()?,
                ),
                other => {
                    return Err(SerializerError::Vocabulary {
                        field: field.clone(),
                        reason: format!("expected an id or a list of ids, found {}", kind_of(other)),
                    })
                }
            };
            *value = inflated;
        }
        Ok(())
    }
}

impl RecordSerializer for RdmRecordSerializer {
    fn deserialize(&self, record: &Value) -> Result<Record, SerializerError> {
        if !record.is_object() {
            return Err(SerializerError::NotAnObject {
                found: kind_of(record),
            });
        }
        let backend = BackendRecord::deserialize(record)?;
        let metadata = backend.metadata.unwrap_or_default();

        let mut custom_fields = backend.custom_fields;
        self.flatten_vocabulary_fields(&mut custom_fields)?;

        Ok(Record {
            id: backend.id,
            is_published: backend.is_published,
            access: backend.access.unwrap_or_default(),
            files: backend.files.unwrap_or_default(),
            metadata: Metadata {
                title: metadata.title.unwrap_or_default(),
                resource_type: metadata.resource_type.map(|r| r.id),
                creators: metadata.creators.into_iter().map(deserialize_creatibutor).collect(),
                contributors: metadata
                    .contributors
                    .into_iter()
                    .map(deserialize_creatibutor)
                    .collect(),
                rights: metadata
                    .rights
                    .into_iter()
                    .map(|r| self.deserialize_right(r))
                    .collect(),
                publication_date: metadata.publication_date,
                description: metadata.description,
                languages: metadata.languages.into_iter().map(|l| l.id).collect(),
                extra: metadata.extra,
            },
            custom_fields,
            links: backend.links.unwrap_or_default(),
            ui: backend.ui,
            extra: backend.extra,
        })
    }

    fn serialize(&self, record: &Record) -> Result<Value, SerializerError> {
        let mut custom_fields = record.custom_fields.clone();
        self.inflate_vocabulary_fields(&mut custom_fields)?;

        let metadata = &record.metadata;
        let backend = BackendRecord {
            id: record.id.clone(),
            is_published: record.is_published,
            access: Some(record.access.clone()),
            files: Some(record.files.clone()),
            metadata: Some(BackendMetadata {
                title: Some(metadata.title.clone()),
                resource_type: metadata.resource_type.as_ref().map(VocabularyRef::new),
                creators: metadata.creators.iter().map(serialize_creatibutor).collect(),
                contributors: metadata.contributors.iter().map(serialize_creatibutor).collect(),
                rights: metadata.rights.iter().map(|r| self.serialize_right(r)).collect(),
                publication_date: metadata.publication_date.clone(),
                description: metadata.description.clone(),
                languages: metadata.languages.iter().map(VocabularyRef::new).collect(),
                extra: metadata.extra.clone(),
            }),
            custom_fields,
            links: Some(record.links.clone()),
            ui: None,
            extra: record.extra.clone(),
        };

        Ok(remove_empty_values(serde_json::to_value(backend)?))
    }

    fn deserialize_errors(&self, errors: &[BackendFieldError]) -> FieldErrors {
        let locale_suffix = format!(".{}", self.default_locale);
        let mut field_errors = FieldErrors::new();
        for error in errors {
            let path = error
                .field
                .strip_suffix(".id")
                .or_else(|| error.field.strip_suffix(locale_suffix.as_str()))
                .unwrap_or(&error.field);
            for message in &error.messages {
                field_errors.add(path, message.clone());
            }
        }
        field_errors
    }
}

fn deserialize_creatibutor(creatibutor: BackendCreatibutor) -> Creatibutor {
    Creatibutor {
        person_or_org: creatibutor.person_or_org,
        role: creatibutor.role.map(|r| r.id),
        affiliations: creatibutor.affiliations,
        extra: creatibutor.extra,
    }
}

fn serialize_creatibutor(creatibutor: &Creatibutor) -> BackendCreatibutor {
    BackendCreatibutor {
        person_or_org: creatibutor.person_or_org.clone(),
        role: creatibutor.role.as_ref().map(VocabularyRef::new),
        affiliations: creatibutor.affiliations.clone(),
        extra: creatibutor.extra.clone(),
    }
}

fn vocabulary_id(field: &str, value: &Value) -> Result<String, SerializerError> {
    value
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SerializerError::Vocabulary {
            field: field.to_string(),
            reason: "entry has no string 'id'".to_string(),
        })
}

fn vocabulary_ref(id: &str) -> Value {
    let mut entry = Map::new();
    entry.insert("id".to_string(), Value::String(id.to_string()));
    Value::Object(entry)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
