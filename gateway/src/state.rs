use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use crate::store::{BlobStore, HttpBlobStore, MemoryBlobStore, SqliteBlobStore};

pub struct AppState {
    pub store: Arc<dyn BlobStore>,
    /// Origin published links point at, without trailing slash
    pub public_url: String,
}

impl AppState {
    pub fn new(store: Arc<dyn BlobStore>, public_url: impl Into<String>) -> Self {
        Self {
            store,
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store: Arc<dyn BlobStore> = match &config.store {
            StoreBackend::Memory => Arc::new(MemoryBlobStore::new()),
            StoreBackend::Sqlite { database_url } => {
                Arc::new(SqliteBlobStore::open(database_url).await?)
            }
            StoreBackend::Http {
                api_url,
                public_url,
                token,
            } => Arc::new(HttpBlobStore::new(
                reqwest::Client::builder()
                    .timeout(std::time::Duration::from_secs(30))
                    .build()?,
                api_url,
                public_url,
                token.clone(),
            )),
        };
        Ok(Self::new(store, config.public_url.clone()))
    }

    /// Retrieval link for a stored blob id
    pub fn published_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.public_url, shared_types::DATA_PATH_PREFIX, id)
    }
}
