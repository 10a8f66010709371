use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use super::{suffixed_key, BlobStore, StoreError, StoredBlob};

/// Process-local store. Contents vanish on restart.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Bytes>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn put(&self, pathname: &str, body: Bytes) -> Result<StoredBlob, StoreError> {
        let key = suffixed_key(pathname);
        self.blobs.write().await.insert(key.clone(), body);
        Ok(StoredBlob { key })
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        self.blobs
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}
