use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, StatusCode};
use serde::Deserialize;
use tracing::{error, warn};

use super::{BlobStore, StoreError, StoredBlob};

/// Remote managed object store reached over HTTP.
///
/// Uploads go to `PUT {api_url}/{pathname}` with a bearer token; the store
/// picks the random suffix and answers with the public URL of the blob.
/// Reads are anonymous `GET {public_url}/{key}`.
#[derive(Debug, Clone)]
pub struct HttpBlobStore {
    client: reqwest::Client,
    api_url: String,
    public_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct PutBlobResponse {
    url: String,
}

impl HttpBlobStore {
    pub fn new(client: reqwest::Client, api_url: &str, public_url: &str, token: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            public_url: public_url.trim_end_matches('/').to_string(),
            token,
        }
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    fn kind(&self) -> &'static str {
        "http"
    }

    async fn put(&self, pathname: &str, body: Bytes) -> Result<StoredBlob, StoreError> {
        let upload_url = format!("{}/{}", self.api_url, pathname);
        let res = self
            .client
            .put(&upload_url)
            .bearer_auth(&self.token)
            .header(header::CONTENT_TYPE, "text/plain")
            .header("x-add-random-suffix", "1")
            .body(body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            error!(upload_url = %upload_url, status = %status, "blob upload rejected");
            return Err(StoreError::Backend(format!("upload failed with {status}")));
        }

        let put: PutBlobResponse = res.json().await?;
        let key = key_from_url(&put.url)
            .ok_or_else(|| StoreError::Backend(format!("unexpected blob url '{}'", put.url)))?;
        Ok(StoredBlob { key })
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        let blob_url = format!("{}/{}", self.public_url, key);
        let res = self.client.get(&blob_url).send().await?;

        let status = res.status();
        if status.is_client_error() {
            if status != StatusCode::NOT_FOUND {
                warn!(blob_url = %blob_url, status = %status, "blob read refused upstream");
            }
            return Err(StoreError::NotFound);
        }
        if !status.is_success() {
            return Err(StoreError::Backend(format!("read failed with {status}")));
        }

        Ok(res.bytes().await?)
    }
}

/// Last path segment of a blob URL, ignoring any query string
fn key_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_last_url_segment() {
        assert_eq!(
            key_from_url("https://store.example.com/data-1rau7Jz.jsonl").as_deref(),
            Some("data-1rau7Jz.jsonl")
        );
        assert_eq!(
            key_from_url("https://store.example.com/bucket/data-x.jsonl?v=2").as_deref(),
            Some("data-x.jsonl")
        );
        assert_eq!(key_from_url("https://store.example.com/"), None);
        assert_eq!(key_from_url("not a url"), None);
    }
}
