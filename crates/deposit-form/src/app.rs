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

//! # Deposit Form App
//!
//! Wires the form together. Every collaborator can be supplied by the host;
//! whatever is missing is built from the configuration:
//!
//! ```text
//! serializer -> API clients -> drafts/files services -> DepositService -> store
//! ```
//!
//! The store's progress notifier is registered on the files service once the
//! store exists.
//!
//! ```rust,ignore
//! let app = DepositFormApp::new(DepositFormProps::new(config, record_json))?;
//! app.store().save_draft().await?;
//! ```

use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::api::{
    ApiConfig, DepositApiClient, DepositFileApiClient, RdmDepositApiClient, RdmDepositFileApiClient,
};
use crate::config::{ConfigLoader, DepositConfig, Validate};
use crate::error::DepositError;
use crate::form::FormOptions;
use crate::i18n::{IdentityTranslator, SharedTranslator};
use crate::models::{Community, FilesListing};
use crate::serializer::{RdmRecordSerializer, RecordSerializer};
use crate::services::{
    DepositDraftsService, DepositFilesService, DepositService, RdmDepositDraftsService,
    RdmDepositFilesService,
};
use crate::store::{configure_store, DepositStore, Permissions, StoreConfig};

/// Everything the host page hands to the form.
pub struct DepositFormProps {
    pub config: DepositConfig,
    /// The record in backend shape.
    pub record: Value,
    pub preselected_community: Option<Community>,
    pub files: Option<FilesListing>,
    pub permissions: Option<Permissions>,
    pub record_serializer: Option<Arc<dyn RecordSerializer>>,
    pub api_client: Option<Arc<dyn DepositApiClient>>,
    pub file_api_client: Option<Arc<dyn DepositFileApiClient>>,
    pub drafts_service: Option<Arc<dyn DepositDraftsService>>,
    pub files_service: Option<Arc<dyn DepositFilesService>>,
    pub translator: Option<SharedTranslator>,
    pub form_options: FormOptions,
}

impl DepositFormProps {
    /// Props from the configuration object the host page renders.
    pub fn from_config_value(config: &Value, record: Value) -> Result<Self, DepositError> {
        Ok(Self::new(ConfigLoader::new().load_value(config)?, record))
    }

    /// Props from a TOML or JSON configuration file.
    pub fn from_config_file(path: &Path, record: Value) -> Result<Self, DepositError> {
        Ok(Self::new(ConfigLoader::new().load_file(path)?, record))
    }

    pub fn new(config: DepositConfig, record: Value) -> Self {
        Self {
            config,
            record,
            preselected_community: None,
            files: None,
            permissions: None,
            record_serializer: None,
            api_client: None,
            file_api_client: None,
            drafts_service: None,
            files_service: None,
            translator: None,
            form_options: FormOptions::default(),
        }
    }

    pub fn with_preselected_community(mut self, community: Community) -> Self {
        self.preselected_community = Some(community);
        self
    }

    pub fn with_files(mut self, files: FilesListing) -> Self {
        self.files = Some(files);
        self
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn with_record_serializer(mut self, serializer: Arc<dyn RecordSerializer>) -> Self {
        self.record_serializer = Some(serializer);
        self
    }

    pub fn with_api_client(mut self, client: Arc<dyn DepositApiClient>) -> Self {
        self.api_client = Some(client);
        self
    }

    pub fn with_file_api_client(mut self, client: Arc<dyn DepositFileApiClient>) -> Self {
        self.file_api_client = Some(client);
        self
    }

    pub fn with_drafts_service(mut self, service: Arc<dyn DepositDraftsService>) -> Self {
        self.drafts_service = Some(service);
        self
    }

    pub fn with_files_service(mut self, service: Arc<dyn DepositFilesService>) -> Self {
        self.files_service = Some(service);
        self
    }

    pub fn with_translator(mut self, translator: SharedTranslator) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_form_options(mut self, options: FormOptions) -> Self {
        self.form_options = options;
        self
    }
}

/// A booted deposit form.
pub struct DepositFormApp {
    store: DepositStore,
    translator: SharedTranslator,
    form_options: FormOptions,
}

impl DepositFormApp {
    /// Validate the configuration, build missing collaborators, deserialize
    /// the record and create the store.
    pub fn new(props: DepositFormProps) -> Result<Self, DepositError> {
        props.config.validate().map_err(crate::config::ConfigError::from)?;
        let config = props.config;

        let serializer: Arc<dyn RecordSerializer> = match props.record_serializer {
            Some(serializer) => serializer,
            None => Arc::new(RdmRecordSerializer::new(
                config.default_locale.clone(),
                config.custom_fields.vocabularies.clone(),
            )),
        };

        let api_config = ApiConfig::with_headers(config.headers());

        let drafts_service: Arc<dyn DepositDraftsService> = match props.drafts_service {
            Some(service) => service,
            None => {
                let client: Arc<dyn DepositApiClient> = match props.api_client {
                    Some(client) => client,
                    None => Arc::new(RdmDepositApiClient::new(
                        &api_config,
                        config.create_url.clone(),
                        Arc::clone(&serializer),
                    )?),
                };
                Arc::new(RdmDepositDraftsService::new(client))
            }
        };

        let files_service: Arc<dyn DepositFilesService> = match props.files_service {
            Some(service) => service,
            None => {
                let client: Arc<dyn DepositFileApiClient> = match props.file_api_client {
                    Some(client) => client,
                    None => Arc::new(RdmDepositFileApiClient::new(&api_config)?),
                };
                Arc::new(RdmDepositFilesService::new(
                    client,
                    config.file_upload_concurrency,
                ))
            }
        };

        let record = serializer.deserialize(&props.record)?;
        let translator = props
            .translator
            .unwrap_or_else(|| Arc::new(IdentityTranslator::new(config.default_locale.clone())));

        info!(
            record_id = record.id.as_deref().unwrap_or_default(),
            create_url = %config.create_url,
            upload_concurrency = config.file_upload_concurrency,
            "Deposit form initialized"
        );

        let store = configure_store(
            StoreConfig {
                config,
                record,
                preselected_community: props.preselected_community,
                files: props.files.unwrap_or_default(),
                permissions: props.permissions.unwrap_or_default(),
            },
            DepositService::new(drafts_service, files_service),
            serializer,
        );

        Ok(Self {
            store,
            translator,
            form_options: props.form_options,
        })
    }

    pub fn store(&self) -> &DepositStore {
        &self.store
    }

    pub fn translator(&self) -> &SharedTranslator {
        &self.translator
    }

    pub fn form_options(&self) -> FormOptions {
        self.form_options
    }

    /// Tear the form down: uploads still waiting for a slot fail and no new
    /// ones are accepted.
    pub fn close(&self) {
        self.store.service().close_uploads();
    }
}
