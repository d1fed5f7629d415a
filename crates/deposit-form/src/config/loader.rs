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

//! Turns the host's configuration into a validated [`DepositConfig`].
//!
//! The host either hands over the JSON object it renders into the page, or
//! points at a TOML/JSON file. File contents may reference environment
//! variables as `${VAR}`, `${VAR:-default}` or `${VAR:?message}`.

use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use crate::config::{ConfigError, DepositConfig, Validate};

/// Syntax of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Format implied by a file extension; files without one are TOML.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") | None => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat {
                extension: ext.to_string(),
            }),
        }
    }
}

/// Where `${VAR}` references are resolved.
#[derive(Debug, Clone, Default)]
enum VarSource {
    #[default]
    Process,
    Fixed(BTreeMap<String, String>),
}

#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    vars: VarSource,
}

impl ConfigLoader {
    /// Loader resolving variables from the process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader resolving variables from `vars` only.
    pub fn with_vars(vars: BTreeMap<String, String>) -> Self {
        Self {
            vars: VarSource::Fixed(vars),
        }
    }

    /// Validate the configuration object rendered by the host page.
    pub fn load_value(&self, config: &Value) -> Result<DepositConfig, ConfigError> {
        let config = DepositConfig::from_json(config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_str(&self, content: &str, format: ConfigFormat) -> Result<DepositConfig, ConfigError> {
        let content = self.substitute_vars(content)?;
        let config: DepositConfig = match format {
            ConfigFormat::Toml => toml::from_str(&content)?,
            ConfigFormat::Json => serde_json::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load_file(&self, path: &Path) -> Result<DepositConfig, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config = self.load_str(&content, format)?;
        tracing::debug!(path = %path.display(), "Loaded deposit form configuration");
        Ok(config)
    }

    fn lookup(&self, name: &str) -> Option<String> {
        match &self.vars {
            VarSource::Process => env::var(name).ok(),
            VarSource::Fixed(vars) => vars.get(name).cloned(),
        }
    }

    fn substitute_vars(&self, content: &str) -> Result<String, ConfigError> {
        let pattern = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::EnvSubstitutionError(e.to_string()))?;
        let mut failure = None;
        let substituted = pattern.replace_all(content, |caps: &Captures<'_>| {
            match self.resolve(&caps[1]) {
                Ok(value) => value,
                Err(e) => {
                    failure.get_or_insert(e);
                    String::new()
                }
            }
        });
        match failure {
            Some(e) => Err(e),
            None => Ok(substituted.into_owned()),
        }
    }

    fn resolve(&self, expr: &str) -> Result<String, ConfigError> {
        if let Some((name, default)) = expr.split_once(":-") {
            return Ok(self.lookup(name).unwrap_or_else(|| default.to_string()));
        }
        let (name, hint) = match expr.split_once(":?") {
            Some((name, hint)) => (name, Some(hint)),
            None => (expr, None),
        };
        self.lookup(name).ok_or_else(|| {
            ConfigError::EnvSubstitutionError(match hint {
                Some(hint) => format!("variable '{name}' is not set: {hint}"),
                None => format!("variable '{name}' is not set"),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::Builder;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn vars(pairs: &[(&str, &str)]) -> ConfigLoader {
        ConfigLoader::with_vars(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_substitution_forms() {
        let loader = vars(&[("REPO", "https://repo.example.org")]);

        assert_eq!(
            loader.substitute_vars("${REPO}/api/records").unwrap(),
            "https://repo.example.org/api/records"
        );
        assert_eq!(loader.substitute_vars("${LOCALE:-fr}").unwrap(), "fr");
        let err = loader.substitute_vars("${TOKEN:?ask the repository admin}").unwrap_err();
        assert!(err.to_string().contains("ask the repository admin"));
    }

    #[test]
    fn test_host_config_object_is_validated() {
        let loader = ConfigLoader::new();
        let config = loader
            .load_value(&json!({
                "createUrl": "https://repo.example.org/api/records",
                "apiHeaders": {"X-CSRFToken": "abc"}
            }))
            .unwrap();
        assert_eq!(config.file_upload_concurrency, 3);

        let result = loader.load_value(&json!({"createUrl": "not a url"}));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    #[serial]
    fn test_load_toml_file_with_process_env() {
        env::set_var("DEPOSIT_TEST_TOKEN", "secret");
        let file = write_config(
            ".toml",
            r#"
default_locale = "de"
createUrl = "https://repo.example.org/api/records"
fileUploadConcurrency = 5

[apiHeaders]
Authorization = "Bearer ${DEPOSIT_TEST_TOKEN}"

[custom_fields]
vocabularies = ["rdm:journal"]
"#,
        );

        let config = ConfigLoader::new().load_file(file.path()).unwrap();
        env::remove_var("DEPOSIT_TEST_TOKEN");

        assert_eq!(config.default_locale, "de");
        assert_eq!(config.file_upload_concurrency, 5);
        assert_eq!(config.custom_fields.vocabularies, vec!["rdm:journal"]);
        assert_eq!(
            config.headers().get("Authorization").map(String::as_str),
            Some("Bearer secret")
        );
    }

    #[test]
    fn test_load_json_file_applies_defaults() {
        let file = write_config(".json", r#"{"createUrl": "https://repo.example.org/api/records"}"#);

        let config = ConfigLoader::new().load_file(file.path()).unwrap();
        assert_eq!(config.default_locale, "en");
        assert!(config.headers().is_empty());
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let result = ConfigLoader::new().load_str(
            r#"{"createUrl": "https://repo.example.org/api/records", "fileUploadConcurrency": 0}"#,
            ConfigFormat::Json,
        );
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_config(".yaml", "createUrl: x");
        let result = ConfigLoader::new().load_file(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
    }
}
