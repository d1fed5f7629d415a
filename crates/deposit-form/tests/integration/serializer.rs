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

use deposit_form::{RdmRecordSerializer, RecordSerializer, SerializerError};
use proptest::prelude::*;
use serde_json::{json, Value};

fn serializer() -> RdmRecordSerializer {
    RdmRecordSerializer::new("en", vec!["cern:experiments".to_string()])
}

fn canonical_record() -> Value {
    json!({
        "id": "q7x2-m9k1",
        "is_published": false,
        "parent": {"id": "p001", "communities": {"default": "blr"}},
        "access": {
            "record": "restricted",
            "files": "restricted",
            "embargo": {"active": true, "until": "2030-06-30", "reason": "Thesis under review"}
        },
        "files": {"enabled": true, "default_preview": "thesis.pdf"},
        "metadata": {
            "title": "Beam loss monitoring",
            "resource_type": {"id": "publication-thesis"},
            "publication_date": "2025-11",
            "creators": [{
                "person_or_org": {
                    "type": "person",
                    "family_name": "Nakamura",
                    "given_name": "Aiko",
                    "identifiers": [{"scheme": "orcid", "identifier": "0000-0001-5109-3700"}]
                },
                "affiliations": [{"name": "KEK"}]
            }],
            "contributors": [{
                "person_or_org": {"type": "organization", "name": "BE-BI"},
                "role": {"id": "hostinginstitution"}
            }],
            "rights": [
                {"id": "cc-by-sa-4.0"},
                {"title": {"en": "Internal use", "fr": "Usage interne"}, "link": "https://example.org/internal"}
            ],
            "languages": [{"id": "eng"}, {"id": "fra"}],
            "subjects": [{"subject": "accelerator physics"}],
            "description": "<p>Thesis.</p>"
        },
        "custom_fields": {
            "cern:experiments": [{"id": "lhcb"}, {"id": "cms"}],
            "thesis:university": "University of Tokyo"
        },
        "links": {
            "self": "https://repo.example.org/api/records/q7x2-m9k1/draft",
            "self_html": "https://repo.example.org/uploads/q7x2-m9k1",
            "files": "https://repo.example.org/api/records/q7x2-m9k1/draft/files",
            "publish": "https://repo.example.org/api/records/q7x2-m9k1/draft/actions/publish"
        }
    })
}

#[test]
fn test_canonical_record_round_trips() {
    let serializer = serializer();
    let record = serializer.deserialize(&canonical_record()).unwrap();

    assert_eq!(record.metadata.resource_type.as_deref(), Some("publication-thesis"));
    assert_eq!(record.metadata.languages, vec!["eng", "fra"]);
    assert_eq!(record.custom_fields["cern:experiments"], json!(["lhcb", "cms"]));
    assert_eq!(record.metadata.rights[1].title.as_deref(), Some("Internal use"));

    assert_eq!(serializer.serialize(&record).unwrap(), canonical_record());
}

#[test]
fn test_display_block_is_read_but_never_written() {
    let serializer = serializer();
    let mut with_ui = canonical_record();
    with_ui["ui"] = json!({
        "rights": [{"id": "cc-by-sa-4.0", "title_l10n": "Creative Commons Attribution Share Alike 4.0 International"}],
        "publication_date_l10n_long": "November 2025"
    });

    let record = serializer.deserialize(&with_ui).unwrap();
    assert_eq!(record.ui_rights().len(), 1);
    assert_eq!(serializer.serialize(&record).unwrap(), canonical_record());
}

#[test]
fn test_backend_echoed_titles_are_not_written_back() {
    let serializer = serializer();
    let mut echoed = canonical_record();
    echoed["metadata"]["resource_type"] = json!({"id": "publication-thesis", "title": {"en": "Thesis"}});
    echoed["metadata"]["languages"] = json!([{"id": "eng", "title": {"en": "English"}}, {"id": "fra"}]);

    let record = serializer.deserialize(&echoed).unwrap();
    assert_eq!(serializer.serialize(&record).unwrap(), canonical_record());
}

#[test]
fn test_edits_that_empty_a_field_remove_it() {
    let serializer = serializer();
    let mut record = serializer.deserialize(&canonical_record()).unwrap();
    record.metadata.contributors.clear();
    record.metadata.description = Some(String::new());
    record.custom_fields.insert("cern:experiments".to_string(), json!([]));

    let out = serializer.serialize(&record).unwrap();
    assert!(out["metadata"].get("contributors").is_none());
    assert!(out["metadata"].get("description").is_none());
    assert!(out["custom_fields"].get("cern:experiments").is_none());
    assert_eq!(out["custom_fields"]["thesis:university"], "University of Tokyo");
}

#[test]
fn test_malformed_vocabulary_fails_instead_of_dropping() {
    let mut broken = canonical_record();
    broken["custom_fields"]["cern:experiments"] = json!([{"title": "no id"}]);

    let err = serializer().deserialize(&broken).unwrap_err();
    assert!(matches!(err, SerializerError::Vocabulary { .. }));
}

#[test]
fn test_nested_backend_keys_survive_a_round_trip() {
    let serializer = serializer();
    let mut record = canonical_record();
    record["access"]["embargo"]["lifted_at"] = json!("2030-07-01T00:00:00");
    record["metadata"]["creators"][0]["person_or_org"]["identifiers"][0]["verified"] = json!(true);
    record["metadata"]["creators"][0]["affiliations"] =
        json!([{"id": "01ggx4157", "name": "CERN", "acronym": "CERN"}]);

    let out = serializer.serialize(&serializer.deserialize(&record).unwrap()).unwrap();
    assert_eq!(out, record);
}

/// A record without access, files or a creatibutor type comes back with the
/// defaults written out: canonical records always carry these blocks.
#[test]
fn test_absent_blocks_are_written_with_defaults() {
    let serializer = serializer();
    let sparse = json!({
        "metadata": {"title": "Sparse", "creators": [{"person_or_org": {"family_name": "Doe"}}]}
    });

    let out = serializer.serialize(&serializer.deserialize(&sparse).unwrap()).unwrap();
    assert_eq!(out["access"], json!({"record": "public", "files": "public"}));
    assert_eq!(out["files"], json!({"enabled": true}));
    assert_eq!(out["metadata"]["creators"][0]["person_or_org"]["type"], "person");
    assert_eq!(serializer.serialize(&serializer.deserialize(&out).unwrap()).unwrap(), out);
}

fn word() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,15}"
}

fn date() -> impl Strategy<Value = String> {
    (2020u32..2040, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
}

fn visibility() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("public"), Just("restricted")]
}

fn identifier() -> impl Strategy<Value = Value> {
    ("[0-9]{4}-[0-9]{4}", proptest::option::of(any::<bool>())).prop_map(|(id, verified)| {
        let mut identifier = json!({"scheme": "orcid", "identifier": id});
        if let Some(verified) = verified {
            identifier["verified"] = json!(verified);
        }
        identifier
    })
}

fn affiliation() -> impl Strategy<Value = Value> {
    (
        proptest::option::of("0[a-z0-9]{8}"),
        word(),
        proptest::option::of("[A-Z]{2,5}"),
    )
        .prop_map(|(id, name, acronym)| {
            let mut affiliation = json!({"name": name});
            if let Some(id) = id {
                affiliation["id"] = json!(id);
            }
            if let Some(acronym) = acronym {
                affiliation["acronym"] = json!(acronym);
            }
            affiliation
        })
}

fn person_or_org() -> impl Strategy<Value = Value> {
    let person = (
        word(),
        proptest::option::of(word()),
        proptest::collection::vec(identifier(), 0..3),
    )
        .prop_map(|(family, given, identifiers)| {
            let mut person = json!({"type": "person", "family_name": family});
            if let Some(given) = given {
                person["given_name"] = json!(given);
            }
            if !identifiers.is_empty() {
                person["identifiers"] = json!(identifiers);
            }
            person
        });
    let organization = word().prop_map(|name| json!({"type": "organization", "name": name}));
    prop_oneof![person, organization]
}

fn creatibutor(with_role: bool) -> impl Strategy<Value = Value> {
    (
        person_or_org(),
        proptest::collection::vec(affiliation(), 0..3),
        "[a-z]{4,12}",
    )
        .prop_map(move |(person_or_org, affiliations, role)| {
            let mut entry = json!({"person_or_org": person_or_org});
            if !affiliations.is_empty() {
                entry["affiliations"] = json!(affiliations);
            }
            if with_role {
                entry["role"] = json!({"id": role});
            }
            entry
        })
}

fn right() -> impl Strategy<Value = Value> {
    let standard = "[a-z]{2,6}-[0-9]\\.[0-9]".prop_map(|id| json!({"id": id}));
    let custom = (word(), proptest::option::of(word()), proptest::option::of(word())).prop_map(
        |(title, french, description)| {
            let mut right = json!({"title": {"en": title}, "link": "https://example.org/terms"});
            if let Some(french) = french {
                right["title"]["fr"] = json!(french);
            }
            if let Some(description) = description {
                right["description"] = json!({"en": description});
            }
            right
        },
    );
    prop_oneof![standard, custom]
}

fn embargo() -> impl Strategy<Value = Value> {
    (
        any::<bool>(),
        proptest::option::of(date()),
        proptest::option::of(word()),
        proptest::option::of(date()),
    )
        .prop_map(|(active, until, reason, lifted_at)| {
            let mut embargo = json!({"active": active});
            if let Some(until) = until {
                embargo["until"] = json!(until);
            }
            if let Some(reason) = reason {
                embargo["reason"] = json!(reason);
            }
            if let Some(lifted_at) = lifted_at {
                embargo["lifted_at"] = json!(lifted_at);
            }
            embargo
        })
}

proptest! {
    #[test]
    fn prop_generated_records_round_trip(
        title in word(),
        record_access in visibility(),
        files_access in visibility(),
        embargo in proptest::option::of(embargo()),
        creators in proptest::collection::vec(creatibutor(false), 1..4),
        contributors in proptest::collection::vec(creatibutor(true), 0..3),
        rights in proptest::collection::vec(right(), 0..4),
        experiments in proptest::collection::vec("[a-z]{3,8}", 0..3),
        metadata_only in any::<bool>(),
    ) {
        let mut access = json!({"record": record_access, "files": files_access});
        if let Some(embargo) = embargo {
            access["embargo"] = embargo;
        }
        let mut metadata = json!({"title": title, "creators": creators});
        if !contributors.is_empty() {
            metadata["contributors"] = json!(contributors);
        }
        if !rights.is_empty() {
            metadata["rights"] = json!(rights);
        }
        let mut backend = json!({
            "access": access,
            "files": {"enabled": !metadata_only},
            "metadata": metadata,
        });
        if !experiments.is_empty() {
            backend["custom_fields"] = json!({
                "cern:experiments": experiments.iter().map(|id| json!({"id": id})).collect::<Vec<_>>()
            });
        }

        let serializer = serializer();
        let record = serializer.deserialize(&backend).unwrap();
        prop_assert_eq!(record.is_metadata_only(), metadata_only);
        prop_assert_eq!(serializer.serialize(&record).unwrap(), backend);
    }
}
