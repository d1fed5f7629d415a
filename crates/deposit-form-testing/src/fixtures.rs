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

//! Ready-made configs, records and files.

use deposit_form::api::BackendFieldError;
use deposit_form::models::{Community, CommunityAccess, UploadFile, Visibility};
use deposit_form::store::Permissions;
use deposit_form::DepositConfig;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Config pointing at `create_url` with an upload cap of `concurrency`.
pub fn config_with(create_url: &str, concurrency: usize) -> DepositConfig {
    let mut config = DepositConfig::default();
    config.create_url = create_url.to_string();
    config.file_upload_concurrency = concurrency;
    config.custom_fields.vocabularies = vec!["cern:experiments".to_string()];
    config
}

pub fn config() -> DepositConfig {
    config_with("http://127.0.0.1:5000/api/records", 2)
}

/// A new, never saved record in backend shape.
pub fn new_record() -> Value {
    json!({
        "access": {"record": "public", "files": "public"},
        "files": {"enabled": true},
        "metadata": {}
    })
}

/// A canonical saved draft: vocabulary references are `{id}` only and no
/// value is empty.
pub fn backend_record() -> Value {
    json!({
        "id": "abcd-1234",
        "is_published": false,
        "access": {
            "record": "public",
            "files": "restricted",
            "embargo": {"active": true, "until": "2031-01-01", "reason": "Pending patent"}
        },
        "files": {"enabled": true, "default_preview": "article.pdf"},
        "metadata": {
            "title": "Measurements of the Higgs boson",
            "resource_type": {"id": "publication-article"},
            "publication_date": "2024-03-01",
            "creators": [
                {
                    "person_or_org": {
                        "type": "person",
                        "family_name": "Doe",
                        "given_name": "Jane",
                        "identifiers": [{"scheme": "orcid", "identifier": "0000-0002-1825-0097"}]
                    },
                    "affiliations": [{"id": "01ggx4157", "name": "CERN"}]
                },
                {
                    "person_or_org": {"type": "organization", "name": "ATLAS Collaboration"}
                }
            ],
            "contributors": [
                {
                    "person_or_org": {"type": "person", "family_name": "Roe", "given_name": "Rick"},
                    "role": {"id": "supervisor"}
                }
            ],
            "rights": [
                {"id": "cc-by-4.0"},
                {
                    "title": {"en": "Custom license", "de": "Eigene Lizenz"},
                    "description": {"en": "Reuse with attribution."},
                    "link": "https://example.org/license"
                }
            ],
            "languages": [{"id": "eng"}],
            "description": "<p>Abstract.</p>"
        },
        "custom_fields": {
            "cern:experiments": [{"id": "atlas"}],
            "cern:beam_energy": 13.6
        },
        "links": {
            "self": "mem://records/abcd-1234/draft",
            "self_html": "mem://uploads/abcd-1234",
            "files": "mem://records/abcd-1234/draft/files",
            "publish": "mem://records/abcd-1234/draft/actions/publish"
        }
    })
}

/// [`backend_record`] with the display block the backend adds.
pub fn backend_record_with_ui() -> Value {
    let mut record = backend_record();
    if let Some(object) = record.as_object_mut() {
        object.insert(
            "ui".to_string(),
            json!({
                "rights": [{
                    "id": "cc-by-4.0",
                    "title_l10n": "Creative Commons Attribution 4.0 International",
                    "description_l10n": "Permits almost any use subject to providing credit.",
                    "props": {"url": "https://creativecommons.org/licenses/by/4.0/legalcode"}
                }],
                "publication_date_l10n_long": "March 1, 2024"
            }),
        );
    }
    record
}

pub fn community(id: &str, visibility: Visibility) -> Community {
    Community {
        id: id.to_string(),
        slug: Some(id.to_string()),
        access: CommunityAccess {
            visibility,
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn permissions(flags: &[(&str, bool)]) -> Permissions {
    Permissions::new(
        flags
            .iter()
            .map(|(name, allowed)| (name.to_string(), *allowed))
            .collect::<BTreeMap<_, _>>(),
    )
}

/// `size` bytes of deterministic content.
pub fn upload_file(key: &str, size: usize) -> UploadFile {
    UploadFile::new(key, (0..size).map(|i| (i % 251) as u8).collect::<Vec<u8>>())
}

pub fn field_error(field: &str, message: &str) -> BackendFieldError {
    BackendFieldError::new(field, vec![message.to_string()])
}
