//! HTTP routes: publish a JSONL dataset, fetch it back by id

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use shared_types::{ErrorBody, PublishedReference};
use tracing::{error, info};

use crate::store::{key_for_id, StoreError, PUBLISH_PATHNAME};
use crate::AppState;

/// Configure all routes. Publish bodies above `max_publish_bytes` get a 413.
pub fn router(max_publish_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/publish",
            post(publish).layer(DefaultBodyLimit::max(max_publish_bytes)),
        )
        .route("/api/data/{id}", get(fetch_data))
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "gateway",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/publish: store the raw JSONL body, answer with its retrieval URL
pub async fn publish(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    let size = body.len();
    match state.store.put(PUBLISH_PATHNAME, body).await {
        Ok(blob) => {
            let reference = PublishedReference(state.published_url(blob.id()));
            info!(key = %blob.key, bytes = size, store = state.store.kind(), "dataset published");
            (StatusCode::OK, Json(reference)).into_response()
        }
        Err(e) => {
            error!(error = %e, store = state.store.kind(), "Error storing data");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::storing())).into_response()
        }
    }
}

/// GET /api/data/{id}: the previously published JSONL as text/plain
pub async fn fetch_data(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(key) = key_for_id(&id) else {
        return (StatusCode::NOT_FOUND, Json(ErrorBody::not_found())).into_response();
    };

    match state.store.get(&key).await {
        Ok(data) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain")],
            data,
        )
            .into_response(),
        Err(StoreError::NotFound) => {
            (StatusCode::NOT_FOUND, Json(ErrorBody::not_found())).into_response()
        }
        Err(e) => {
            error!(error = %e, key = %key, store = state.store.kind(), "Error retrieving data");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::retrieving()),
            )
                .into_response()
        }
    }
}
