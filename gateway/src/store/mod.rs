//! Blob storage backends behind the publish/fetch endpoints
//!
//! A publish stores the well-known pathname `data.jsonl`. Backends suffix it
//! with a random token, so every publish lands at `data-<token>.jsonl` and the
//! public id handed to clients is `<token>.jsonl`.

use async_trait::async_trait;
use bytes::Bytes;

pub mod http;
pub mod memory;
pub mod sqlite;

pub use http::HttpBlobStore;
pub use memory::MemoryBlobStore;
pub use sqlite::SqliteBlobStore;

/// Pathname every publish is stored under (before suffixing)
pub const PUBLISH_PATHNAME: &str = "data.jsonl";

const KEY_PREFIX: &str = "data-";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("blob not found")]
    NotFound,

    #[error("blob store error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

/// Location of a blob after a successful put
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Full store key, e.g. `data-01j0c6....jsonl`
    pub key: String,
}

impl StoredBlob {
    /// Public id: the key without the `data-` prefix
    pub fn id(&self) -> &str {
        blob_id_from_key(&self.key)
    }
}

/// Backend for published datasets.
///
/// Every `put` creates a new blob; earlier publishes stay readable through
/// their own ids. Retention is up to the backend: the memory store keeps
/// blobs until restart, sqlite keeps them until the file is removed, and the
/// HTTP store follows whatever policy the remote service applies.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Short backend name for logs
    fn kind(&self) -> &'static str;

    /// Store `body` under a suffixed variant of `pathname`
    async fn put(&self, pathname: &str, body: Bytes) -> Result<StoredBlob, StoreError>;

    /// Fetch a blob by its full key
    async fn get(&self, key: &str) -> Result<Bytes, StoreError>;
}

/// `data.jsonl` -> `data-<ulid>.jsonl`
pub fn suffixed_key(pathname: &str) -> String {
    let suffix = ulid::Ulid::new().to_string().to_lowercase();
    match pathname.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{suffix}.{ext}"),
        _ => format!("{pathname}-{suffix}"),
    }
}

pub fn blob_id_from_key(key: &str) -> &str {
    key.strip_prefix(KEY_PREFIX).unwrap_or(key)
}

/// Store key for a public id, or `None` if the id could escape the key space
pub fn key_for_id(id: &str) -> Option<String> {
    if !is_valid_blob_id(id) {
        return None;
    }
    Some(format!("{KEY_PREFIX}{id}"))
}

fn is_valid_blob_id(id: &str) -> bool {
    !id.is_empty()
        && !id.contains("..")
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixed_key_keeps_stem_and_extension() {
        let key = suffixed_key(PUBLISH_PATHNAME);
        assert!(key.starts_with("data-"));
        assert!(key.ends_with(".jsonl"));
        assert_eq!(key.len(), "data-.jsonl".len() + 26);
        assert_ne!(key, suffixed_key(PUBLISH_PATHNAME));
    }

    #[test]
    fn id_and_key_are_inverse() {
        let blob = StoredBlob {
            key: "data-abc123.jsonl".to_string(),
        };
        assert_eq!(blob.id(), "abc123.jsonl");
        assert_eq!(key_for_id(blob.id()).as_deref(), Some("data-abc123.jsonl"));
    }

    #[test]
    fn rejects_ids_outside_key_space() {
        assert_eq!(key_for_id(""), None);
        assert_eq!(key_for_id("../secrets"), None);
        assert_eq!(key_for_id("a/b"), None);
        assert_eq!(key_for_id("a b"), None);
    }
}
