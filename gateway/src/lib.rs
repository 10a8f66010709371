//! Storage gateway for published training datasets
//!
//! Two thin endpoints over a blob store: publish a JSONL body and get back a
//! retrieval URL, or fetch a published body by id.

pub mod api;
pub mod config;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use state::AppState;

/// Full application: API routes, CORS, request tracing and, when a designer
/// build is available, static hosting of the UI.
pub fn app(config: &Config, state: Arc<AppState>) -> Router {
    let allowed_origins = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect::<Vec<_>>();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600));

    let mut router = api::router(config.max_publish_bytes);
    if let Some(dist) = &config.frontend_dist {
        let index = format!("{dist}/index.html");
        router = router.fallback_service(ServeDir::new(dist).fallback(ServeFile::new(index)));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
