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

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::http::Method;
use deposit_form::api::{
    ApiConfig, DepositApiClient, DepositFileApiClient, RdmDepositApiClient,
    RdmDepositFileApiClient, RECORD_MEDIA_TYPE,
};
use deposit_form::models::{Record, RecordLinks, UploadFile};
use deposit_form::{ApiError, RdmRecordSerializer, RecordSerializer};
use serde_json::json;

use crate::backend::TestBackend;

fn serializer() -> Arc<dyn RecordSerializer> {
    Arc::new(RdmRecordSerializer::new("en", Vec::new()))
}

fn drafts_client(backend: &TestBackend) -> RdmDepositApiClient {
    let headers = BTreeMap::from([(
        "Authorization".to_string(),
        "Bearer token-123".to_string(),
    )]);
    RdmDepositApiClient::new(
        &ApiConfig::with_headers(headers),
        backend.create_url(),
        serializer(),
    )
    .unwrap()
}

fn titled(title: &str) -> Record {
    serializer()
        .deserialize(&json!({"metadata": {"title": title}}))
        .unwrap()
}

#[tokio::test]
async fn test_create_posts_record_with_configured_headers() {
    let backend = TestBackend::start().await;
    let client = drafts_client(&backend);

    let response = client.create_draft(&titled("Hello")).await.unwrap();

    assert_eq!(response.code, 201);
    assert_eq!(response.data.id.as_deref(), Some("rec-1"));
    assert!(!response.has_errors());
    assert_eq!(response.data.links.self_, Some(backend.draft_url("rec-1")));

    let request = backend.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/api/records");
    assert_eq!(request.header("authorization"), Some("Bearer token-123"));
    assert_eq!(request.header("accept"), Some(RECORD_MEDIA_TYPE));
    assert_eq!(request.header("content-type"), Some(RECORD_MEDIA_TYPE));
    assert_eq!(request.json()["metadata"]["title"], "Hello");
    assert!(request.json().get("ui").is_none());
}

#[tokio::test]
async fn test_success_response_keeps_field_errors_apart() {
    let backend = TestBackend::start().await;
    let client = drafts_client(&backend);

    let response = client.create_draft(&Record::default()).await.unwrap();

    assert_eq!(response.code, 201);
    assert!(response.has_errors());
    assert_eq!(response.errors[0].field, "metadata.title");
    assert_eq!(response.data.id.as_deref(), Some("rec-1"));
}

#[tokio::test]
async fn test_save_read_publish_and_delete_follow_record_links() {
    let backend = TestBackend::start().await;
    let client = drafts_client(&backend);

    let created = client.create_draft(&titled("First")).await.unwrap().data;
    let mut edited = created.clone();
    edited.metadata.title = "Second".to_string();

    let saved = client.save_draft(&edited).await.unwrap();
    assert_eq!(saved.code, 200);
    assert_eq!(saved.data.metadata.title, "Second");
    let request = backend.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.path, "/api/records/rec-1/draft");

    let read = client.read_draft(&saved.data.links).await.unwrap();
    assert_eq!(read.data.metadata.title, "Stored");

    let published = client.publish_draft(&saved.data).await.unwrap();
    assert_eq!(published.code, 202);
    assert_eq!(published.data.is_published, Some(true));
    assert_eq!(
        backend.last_request().path,
        "/api/records/rec-1/draft/actions/publish"
    );

    client.delete_draft(&saved.data.links).await.unwrap();
    assert_eq!(backend.last_request().method, Method::DELETE);
    assert_eq!(backend.requests().len(), 5);
}

#[tokio::test]
async fn test_error_status_carries_backend_message_and_errors() {
    let backend = TestBackend::start().await;
    let client = drafts_client(&backend);

    let links = RecordLinks {
        self_: Some(backend.draft_url("missing")),
        ..Default::default()
    };
    match client.read_draft(&links).await.unwrap_err() {
        ApiError::Status {
            method,
            status,
            message,
            errors,
            ..
        } => {
            assert_eq!(method, "GET");
            assert_eq!(status, 404);
            assert_eq!(message, "The persistent identifier does not exist.");
            assert!(errors.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }

    let mut invalid = titled("Bad");
    invalid.id = Some("invalid".to_string());
    invalid.links.self_ = Some(backend.draft_url("invalid"));
    let err = client.save_draft(&invalid).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.field_errors().len(), 1);
    assert_eq!(err.field_errors()[0].field, "metadata.resource_type.id");
    assert!(err.to_string().contains("A validation error occurred."));
}

#[tokio::test]
async fn test_unreachable_backend_is_a_transport_error() {
    let client = RdmDepositApiClient::new(
        &ApiConfig::default(),
        "http://127.0.0.1:1/api/records",
        serializer(),
    )
    .unwrap();

    let err = client.create_draft(&titled("Offline")).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { method: "POST", .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_file_upload_cycle() {
    let backend = TestBackend::start().await;
    let client = RdmDepositFileApiClient::new(&ApiConfig::default()).unwrap();
    let files_url = format!("{}/files", backend.draft_url("rec-7"));

    let entry = client
        .initialize_file_upload(&files_url, "data.bin")
        .await
        .unwrap();
    assert_eq!(entry.key, "data.bin");
    assert_eq!(entry.status.as_deref(), Some("pending"));
    assert_eq!(backend.last_request().json(), json!([{"key": "data.bin"}]));

    let ticks = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&ticks);
    let data: Vec<u8> = (0..150 * 1024).map(|i| (i % 256) as u8).collect();
    client
        .upload_file(
            entry.links.content.as_deref().unwrap(),
            UploadFile::new("data.bin", data),
            Arc::new(move |percent: u8| recorder.lock().unwrap().push(percent)),
        )
        .await
        .unwrap();

    let ticks = ticks.lock().unwrap().clone();
    assert_eq!(ticks.last(), Some(&100));
    assert!(ticks.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(backend.received("data.bin"), Some(150 * 1024));
    assert_eq!(
        backend.last_request().header("content-type"),
        Some("application/octet-stream")
    );

    let committed = client
        .finalize_file_upload(entry.links.commit.as_deref().unwrap())
        .await
        .unwrap();
    assert_eq!(committed.status.as_deref(), Some("completed"));
    assert_eq!(committed.size, Some(150 * 1024));

    client.delete_file(&committed.links).await.unwrap();
    let request = backend.last_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.path, "/api/records/rec-7/draft/files/data.bin");
}

#[tokio::test]
async fn test_initialize_against_unknown_route_reports_status() {
    let backend = TestBackend::start().await;
    let client = RdmDepositFileApiClient::new(&ApiConfig::default()).unwrap();

    // Unknown routes answer a bare 404.
    let err = client
        .initialize_file_upload(&format!("{}/nowhere", backend.base), "a.txt")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}
