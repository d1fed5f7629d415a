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

//! Translation lookup and locale-aware ordering.
//!
//! Field view models receive a [`Translator`] when they are built; nothing in
//! this crate reads translations from global state.

use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Message lookup keyed by the source-language string.
pub trait Translator: Send + Sync {
    fn translate(&self, msgid: &str) -> String;

    /// Translate and substitute `{{name}}` placeholders.
    fn translate_with(&self, msgid: &str, args: &[(&str, &str)]) -> String {
        interpolate(&self.translate(msgid), args)
    }

    fn locale(&self) -> &str;
}

/// Shared handle to a translator.
pub type SharedTranslator = Arc<dyn Translator>;

/// Returns every message untranslated.
#[derive(Debug, Clone)]
pub struct IdentityTranslator {
    locale: String,
}

impl IdentityTranslator {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }
}

impl Default for IdentityTranslator {
    fn default() -> Self {
        Self::new("en")
    }
}

impl Translator for IdentityTranslator {
    fn translate(&self, msgid: &str) -> String {
        msgid.to_string()
    }

    fn locale(&self) -> &str {
        &self.locale
    }
}

/// Translator backed by a message catalog; unknown messages fall back to the
/// source string.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    locale: String,
    messages: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn new(locale: impl Into<String>, messages: HashMap<String, String>) -> Self {
        Self {
            locale: locale.into(),
            messages,
        }
    }

    /// Build from a flat JSON object of `msgid -> translation`. Non-string
    /// entries are skipped.
    pub fn from_json(locale: impl Into<String>, catalog: &Value) -> Self {
        let messages = catalog
            .as_object()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                    .collect()
            })
            .unwrap_or_default();
        Self::new(locale, messages)
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, msgid: &str) -> String {
        self.messages
            .get(msgid)
            .filter(|t| !t.is_empty())
            .cloned()
            .unwrap_or_else(|| msgid.to_string())
    }

    fn locale(&self) -> &str {
        &self.locale
    }
}

fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{{{name}}}}}"), value)
    })
}

/// Locale-aware string comparison.
///
/// Strings are compared first ignoring case and accents, then by accents,
/// then with lowercase ordered before uppercase, and finally by code point so
/// the ordering is total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_key(a)
        .cmp(&base_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

fn base_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn accent_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn case_key(s: &str) -> Vec<bool> {
    s.chars().map(char::is_uppercase).collect()
}
