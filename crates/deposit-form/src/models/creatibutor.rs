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

//! Creators and contributors ("creatibutors").

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Whether a creatibutor is a person or an organization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatibutorType {
    #[default]
    Person,
    Organization,
}

/// A persistent identifier such as an ORCID or ROR id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub scheme: String,
    pub identifier: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonOrOrg {
    #[serde(rename = "type", default)]
    pub kind: CreatibutorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    /// Organization name; for persons the backend fills in "family, given".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<Identifier>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An affiliation, either a vocabulary entry (`id`) or free text (`name`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Affiliation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A creator or contributor entry as the form edits it.
///
/// `role` holds the role vocabulary id; the serializer inflates it back to
/// `{"id": ...}` for the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Creatibutor {
    pub person_or_org: PersonOrOrg,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliations: Vec<Affiliation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Creatibutor {
    pub fn person(family_name: impl Into<String>, given_name: impl Into<String>) -> Self {
        Self {
            person_or_org: PersonOrOrg {
                kind: CreatibutorType::Person,
                family_name: Some(family_name.into()),
                given_name: Some(given_name.into()),
                ..PersonOrOrg::default()
            },
            ..Self::default()
        }
    }

    pub fn organization(name: impl Into<String>) -> Self {
        Self {
            person_or_org: PersonOrOrg {
                kind: CreatibutorType::Organization,
                name: Some(name.into()),
                ..PersonOrOrg::default()
            },
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_affiliation(mut self, name: impl Into<String>) -> Self {
        self.affiliations.push(Affiliation {
            name: Some(name.into()),
            ..Affiliation::default()
        });
        self
    }

    /// Name of the first affiliation, if any.
    pub fn primary_affiliation_name(&self) -> Option<&str> {
        self.affiliations.first().and_then(|a| a.name.as_deref())
    }
}
