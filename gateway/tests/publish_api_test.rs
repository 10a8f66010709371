//! Publish / fetch API integration tests

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use gateway::api;
use gateway::store::{BlobStore, MemoryBlobStore, SqliteBlobStore, StoreError, StoredBlob};
use gateway::AppState;
use shared_types::{Field, Mode, PublishedReference, SyncController};

const PUBLIC_URL: &str = "http://tuneup.test";

fn setup_app(store: Arc<dyn BlobStore>) -> axum::Router {
    let state = Arc::new(AppState::new(store, PUBLIC_URL));
    api::router(1024).with_state(state)
}

/// Store that fails every operation, as a broken backend would
struct FailingStore;

#[async_trait]
impl BlobStore for FailingStore {
    fn kind(&self) -> &'static str {
        "failing"
    }

    async fn put(&self, _pathname: &str, _body: Bytes) -> Result<StoredBlob, StoreError> {
        Err(StoreError::Backend("disk on fire".to_string()))
    }

    async fn get(&self, _key: &str) -> Result<Bytes, StoreError> {
        Err(StoreError::Backend("disk on fire".to_string()))
    }
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Option<String>, Bytes) {
    let response = app.clone().oneshot(req).await.expect("request failed");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let body = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    (status, content_type, body)
}

fn publish_request(body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/publish")
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

fn fetch_request(id: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/api/data/{id}"))
        .body(Body::empty())
        .unwrap()
}

async fn publish(app: &axum::Router, body: &str) -> PublishedReference {
    let (status, _, bytes) = send(app, publish_request(body)).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&bytes).expect("publish should answer with a JSON string")
}

#[tokio::test]
async fn test_publish_then_fetch_returns_exact_jsonl() {
    let app = setup_app(Arc::new(MemoryBlobStore::new()));

    let mut controller = SyncController::default();
    controller.add_record();
    controller.edit_field(1, Field::Prompt, "Hi");
    let jsonl = controller.jsonl().to_string();

    let reference = publish(&app, &jsonl).await;
    assert!(reference
        .as_str()
        .starts_with("http://tuneup.test/api/data/"));
    assert!(reference.id().ends_with(".jsonl"));

    let (status, content_type, body) = send(&app, fetch_request(reference.id())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain"));
    assert_eq!(body, Bytes::from(jsonl));
}

#[tokio::test]
async fn test_each_publish_gets_its_own_reference() {
    let app = setup_app(Arc::new(MemoryBlobStore::new()));

    let first = publish(&app, "{\"text\":\"one\"}").await;
    let second = publish(&app, "{\"text\":\"two\"}").await;
    assert_ne!(first, second);

    let (_, _, body) = send(&app, fetch_request(first.id())).await;
    assert_eq!(body, Bytes::from_static(b"{\"text\":\"one\"}"));
}

#[tokio::test]
async fn test_publish_empty_dataset() {
    let app = setup_app(Arc::new(MemoryBlobStore::new()));
    let mut controller = SyncController::new(Mode::Autocomplete);
    controller.remove_record(0);

    let reference = publish(&app, controller.jsonl()).await;
    let (status, _, body) = send(&app, fetch_request(reference.id())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_fetch_unknown_id_is_404() {
    let app = setup_app(Arc::new(MemoryBlobStore::new()));

    let (status, _, body) = send(&app, fetch_request("doesnotexist.jsonl")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value, serde_json::json!({"message": "Data not found"}));
}

#[tokio::test]
async fn test_fetch_rejects_traversal_ids() {
    let app = setup_app(Arc::new(MemoryBlobStore::new()));

    let (status, _, _) = send(&app, fetch_request("..%2Fetc%2Fpasswd")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_publish_store_failure_is_500() {
    let app = setup_app(Arc::new(FailingStore));

    let (status, _, body) = send(&app, publish_request("{\"text\":\"x\"}")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["message"], "Error storing data");
}

#[tokio::test]
async fn test_fetch_store_failure_is_500() {
    let app = setup_app(Arc::new(FailingStore));

    let (status, _, body) = send(&app, fetch_request("abc.jsonl")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["message"], "Error retrieving data");
}

#[tokio::test]
async fn test_publish_over_limit_is_rejected() {
    let app = setup_app(Arc::new(MemoryBlobStore::new()));

    let (status, _, _) = send(&app, publish_request("x".repeat(2048))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_publish_and_fetch_with_sqlite_store() {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let db_url = format!("sqlite:{}", temp_dir.path().join("blobs.db").display());
    let store = SqliteBlobStore::open(&db_url)
        .await
        .expect("failed to open sqlite store");
    let app = setup_app(Arc::new(store));

    let jsonl = "{\"prompt\":\"a\",\"completion\":\"b\"}";
    let reference = publish(&app, jsonl).await;
    let (status, _, body) = send(&app, fetch_request(reference.id())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Bytes::from_static(jsonl.as_bytes()));
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app(Arc::new(MemoryBlobStore::new()));
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, _, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["status"], "healthy");
    assert_eq!(value["service"], "gateway");
}
