use gloo_net::http::Request;
use shared_types::{ErrorBody, PublishedReference, PUBLISH_PATH};
use std::sync::OnceLock;

/// Get the gateway base URL based on current environment
/// - In development (`dx serve` on localhost): use http://localhost:3000
/// - In production: use same origin (the gateway serves the designer)
fn get_api_base() -> String {
    let location = web_sys::window().map(|w| w.location());
    let hostname = location
        .as_ref()
        .and_then(|l| l.hostname().ok())
        .unwrap_or_default();
    let port = location
        .as_ref()
        .and_then(|l| l.port().ok())
        .unwrap_or_default();

    dev_api_base(&hostname, &port).unwrap_or_default()
}

/// Gateway origin when the designer runs from a dev server on a different port
fn dev_api_base(hostname: &str, port: &str) -> Option<String> {
    let local = hostname == "localhost" || hostname == "127.0.0.1";
    (local && port != "3000").then(|| "http://localhost:3000".to_string())
}

static API_BASE_CACHE: OnceLock<String> = OnceLock::new();

/// Get the cached API base URL
pub fn api_base() -> &'static str {
    API_BASE_CACHE.get_or_init(get_api_base).as_str()
}

/// Send the JSONL view to the gateway and return the retrieval URL.
pub async fn publish_dataset(jsonl: &str) -> Result<PublishedReference, String> {
    let url = format!("{}{}", api_base(), PUBLISH_PATH);

    let response = Request::post(&url)
        .header("Content-Type", "application/json")
        .body(jsonl.to_string())
        .map_err(|e| format!("Failed to build request: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    if !response.ok() {
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| format!("HTTP error: {}", response.status()));
        return Err(message);
    }

    response
        .json::<PublishedReference>()
        .await
        .map_err(|e| format!("Failed to parse JSON: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_server_targets_local_gateway() {
        assert_eq!(
            dev_api_base("localhost", "8080").as_deref(),
            Some("http://localhost:3000")
        );
        assert_eq!(dev_api_base("127.0.0.1", "3000"), None);
        assert_eq!(dev_api_base("tuneup.example", ""), None);
    }
}
