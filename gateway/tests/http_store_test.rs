//! HttpBlobStore against an in-process fake object store

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use gateway::store::{BlobStore, HttpBlobStore, StoreError};

const TOKEN: &str = "test-token";

#[derive(Clone, Default)]
struct FakeStore {
    blobs: Arc<Mutex<HashMap<String, Bytes>>>,
    public_base: Arc<Mutex<String>>,
}

async fn fake_put(
    State(store): State<FakeStore>,
    Path(pathname): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"));
    if !authorized {
        return (StatusCode::FORBIDDEN, "bad token").into_response();
    }

    let (stem, ext) = pathname
        .rsplit_once('.')
        .unwrap_or((pathname.as_str(), "bin"));
    let key = format!("{stem}-{}.{ext}", store.blobs.lock().await.len() + 1);
    store.blobs.lock().await.insert(key.clone(), body);
    let url = format!("{}/{}", store.public_base.lock().await, key);
    Json(json!({ "url": url, "pathname": key })).into_response()
}

async fn fake_get(State(store): State<FakeStore>, Path(key): Path<String>) -> impl IntoResponse {
    if key == "data-broken.jsonl" {
        return (StatusCode::BAD_GATEWAY, "upstream down").into_response();
    }
    match store.blobs.lock().await.get(&key) {
        Some(body) => body.clone().into_response(),
        None => (StatusCode::NOT_FOUND, "missing").into_response(),
    }
}

async fn spawn_fake_store() -> String {
    let fake = FakeStore::default();
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind fake store");
    let base = format!("http://{}", listener.local_addr().unwrap());
    *fake.public_base.lock().await = format!("{base}/public");

    let app = Router::new()
        .route("/upload/{pathname}", put(fake_put))
        .route("/public/{key}", get(fake_get))
        .with_state(fake);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake store crashed");
    });
    base
}

fn store_for(base: &str, token: &str) -> HttpBlobStore {
    HttpBlobStore::new(
        reqwest::Client::new(),
        &format!("{base}/upload/"),
        &format!("{base}/public"),
        token.to_string(),
    )
}

#[tokio::test]
async fn test_put_then_get_round_trips_body() {
    let base = spawn_fake_store().await;
    let store = store_for(&base, TOKEN);

    let blob = store
        .put("data.jsonl", Bytes::from_static(b"{\"text\":\"remote\"}"))
        .await
        .expect("put failed");
    assert_eq!(blob.key, "data-1.jsonl");
    assert_eq!(blob.id(), "1.jsonl");

    let body = store.get(&blob.key).await.expect("get failed");
    assert_eq!(body, Bytes::from_static(b"{\"text\":\"remote\"}"));
}

#[tokio::test]
async fn test_rejected_upload_is_backend_error() {
    let base = spawn_fake_store().await;
    let store = store_for(&base, "wrong-token");

    let err = store
        .put("data.jsonl", Bytes::from_static(b"x"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Backend(_)));
}

#[tokio::test]
async fn test_missing_blob_is_not_found() {
    let base = spawn_fake_store().await;
    let store = store_for(&base, TOKEN);

    assert!(matches!(
        store.get("data-nothing.jsonl").await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
async fn test_upstream_server_error_is_backend_error() {
    let base = spawn_fake_store().await;
    let store = store_for(&base, TOKEN);

    assert!(matches!(
        store.get("data-broken.jsonl").await,
        Err(StoreError::Backend(_))
    ));
}

#[tokio::test]
async fn test_unreachable_store_is_backend_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let store = store_for(&base, TOKEN);

    assert!(matches!(
        store.get("data-x.jsonl").await,
        Err(StoreError::Backend(_))
    ));
}
