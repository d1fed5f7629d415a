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

use std::sync::{Arc, Mutex};

use deposit_form::api::{ApiConfig, RdmDepositApiClient, RdmDepositFileApiClient};
use deposit_form::models::UploadFile;
use deposit_form::services::{
    DepositFilesService, RdmDepositDraftsService, RdmDepositFilesService, UploadProgressNotifier,
};
use deposit_form::{DepositService, RdmRecordSerializer, RecordSerializer};
use serde_json::json;

use crate::backend::TestBackend;

#[derive(Default)]
struct Ticks(Mutex<Vec<(String, u8)>>);

impl UploadProgressNotifier for Ticks {
    fn on_upload_progress(&self, key: &str, percent: u8) {
        self.0.lock().unwrap().push((key.to_string(), percent));
    }
}

fn files_service(cap: usize) -> RdmDepositFilesService {
    let client = RdmDepositFileApiClient::new(&ApiConfig::default()).unwrap();
    RdmDepositFilesService::new(Arc::new(client), cap)
}

#[tokio::test]
async fn test_batch_upload_over_http() {
    let backend = TestBackend::start().await;
    let service = files_service(2);
    let ticks = Arc::new(Ticks::default());
    service.set_progress_notifier(ticks.clone());

    let files: Vec<UploadFile> = ["one.csv", "two.csv", "three.csv"]
        .iter()
        .map(|key| UploadFile::new(*key, vec![b'x'; 70 * 1024]))
        .collect();
    let init_url = format!("{}/files", backend.draft_url("rec-3"));

    let outcomes = service.upload_files(&init_url, files).await;

    let keys: Vec<_> = outcomes.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, vec!["one.csv", "two.csv", "three.csv"]);
    for (key, result) in &outcomes {
        let entry = result.as_ref().unwrap();
        assert_eq!(entry.status.as_deref(), Some("completed"));
        assert_eq!(backend.received(key), Some(70 * 1024));
    }
    assert_eq!(service.active_uploads(), 0);

    let ticks = ticks.0.lock().unwrap();
    for key in ["one.csv", "two.csv", "three.csv"] {
        let last = ticks.iter().rev().find(|(k, _)| k == key).map(|(_, p)| *p);
        assert_eq!(last, Some(100));
    }
}

#[tokio::test]
async fn test_failed_initialization_fails_only_that_file() {
    let backend = TestBackend::start().await;
    let service = files_service(1);

    // The backend knows no route below this url, so initialization fails.
    let outcomes = service
        .upload_files(
            &format!("{}/elsewhere", backend.base),
            vec![UploadFile::new("a.txt", b"a".to_vec())],
        )
        .await;

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].1.as_ref().unwrap_err().status(), Some(404));
    assert_eq!(service.active_uploads(), 0);
}

#[tokio::test]
async fn test_deposit_service_drives_both_clients() {
    let backend = TestBackend::start().await;
    let serializer: Arc<dyn RecordSerializer> = Arc::new(RdmRecordSerializer::new("en", Vec::new()));
    let drafts = RdmDepositApiClient::new(&ApiConfig::default(), backend.create_url(), serializer.clone())
        .unwrap();
    let service = DepositService::new(
        Arc::new(RdmDepositDraftsService::new(Arc::new(drafts))),
        Arc::new(files_service(2)),
    );

    let draft = serializer
        .deserialize(&json!({"metadata": {"title": "Run 3 calibration"}}))
        .unwrap();
    let created = service.create_draft(&draft).await.unwrap().data;
    let files_url = created.links.files.clone().unwrap();

    let entry = service
        .upload_file(&files_url, UploadFile::new("calib.json", b"{}".to_vec()))
        .await
        .unwrap();
    assert_eq!(entry.key, "calib.json");

    service.delete_file(&entry.links).await.unwrap();
    let published = service.publish_draft(&created).await.unwrap();
    assert_eq!(published.data.is_published, Some(true));
}
