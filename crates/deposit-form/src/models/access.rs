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

//! Record-level access settings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Visibility of the record metadata or of its files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Restricted,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Restricted => "restricted",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-limited restriction lifted on `until`.
///
/// Backend bookkeeping such as `lifted_at` stays in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embargo {
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Embargo {
    /// An embargo that is switched off, with no date or reason.
    pub fn inactive() -> Self {
        Self::default()
    }
}

/// Access settings of a record.
///
/// Fields the backend computes (for example `status`) are kept untouched in
/// `extra` so they survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Access {
    #[serde(default)]
    pub record: Visibility,
    #[serde(default)]
    pub files: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embargo: Option<Embargo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Access {
    /// Whether an embargo is currently switched on.
    pub fn embargo_active(&self) -> bool {
        self.embargo.as_ref().map(|e| e.active).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_access_defaults_to_public() {
        let access: Access = serde_json::from_value(json!({})).unwrap();
        assert_eq!(access.record, Visibility::Public);
        assert_eq!(access.files, Visibility::Public);
        assert!(!access.embargo_active());
    }

    #[test]
    fn test_access_rejects_unknown_visibility() {
        let result: Result<Access, _> = serde_json::from_value(json!({"record": "secret"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_embargo_date_parses() {
        let access: Access = serde_json::from_value(json!({
            "record": "restricted",
            "files": "restricted",
            "embargo": {"active": true, "until": "2031-05-01", "reason": "pending patent"},
            "status": "embargoed"
        }))
        .unwrap();

        let embargo = access.embargo.as_ref().unwrap();
        assert_eq!(embargo.until, NaiveDate::from_ymd_opt(2031, 5, 1));
        assert_eq!(access.extra.get("status"), Some(&json!("embargoed")));
    }

    #[test]
    fn test_embargo_keeps_backend_bookkeeping() {
        let raw = json!({
            "record": "public",
            "files": "restricted",
            "embargo": {"active": false, "until": "2024-01-01", "lifted_at": "2024-01-02T00:00:00"}
        });
        let access: Access = serde_json::from_value(raw.clone()).unwrap();

        let embargo = access.embargo.as_ref().unwrap();
        assert_eq!(embargo.extra.get("lifted_at"), Some(&json!("2024-01-02T00:00:00")));
        assert_eq!(serde_json::to_value(&access).unwrap(), raw);
    }
}
