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

use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

use crate::config::{types::*, ValidationError};

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for DepositConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = validate_create_url(&self.create_url) {
            errors.push(e);
        }
        if self.file_upload_concurrency == 0 {
            errors.push(ValidationError::InvalidConcurrency {
                value: self.file_upload_concurrency,
            });
        }
        if self.default_locale.trim().is_empty() {
            errors.push(ValidationError::EmptyLocale);
        }
        for (name, value) in self.headers() {
            if let Err(e) = validate_header(&name, &value) {
                errors.push(e);
            }
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Multiple { errors }),
        }
    }
}

fn validate_create_url(create_url: &str) -> Result<(), ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidCreateUrl {
        url: create_url.to_string(),
        reason,
    };
    let url = Url::parse(create_url).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

fn validate_header(name: &str, value: &str) -> Result<(), ValidationError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| ValidationError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    HeaderValue::from_str(value).map_err(|e| ValidationError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}
