use std::str::FromStr;

use async_trait::async_trait;
use bytes::Bytes;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};

use super::{suffixed_key, BlobStore, StoreError, StoredBlob};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS blobs (
    key        TEXT    PRIMARY KEY,
    body       BLOB    NOT NULL,
    created_at INTEGER NOT NULL
)";

/// Open (creating if needed) the blob database and apply the schema.
///
/// Accepts `sqlite:` URLs with relative or absolute paths. Missing parent
/// directories are created.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| anyhow::anyhow!("Invalid BLOB_DATABASE_URL {database_url}: {e}"))?
        .create_if_missing(true);

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let pool = SqlitePool::connect_with(options).await?;
    sqlx::query(SCHEMA)
        .execute(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("blob store migration failed: {e}"))?;

    Ok(pool)
}

/// SQLite-backed blob store. One row per published blob, keyed by the
/// suffixed pathname; rows are never deleted.
#[derive(Debug, Clone)]
pub struct SqliteBlobStore {
    pool: SqlitePool,
}

impl SqliteBlobStore {
    /// Wrap a pool that [`connect`] already prepared.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn open(database_url: &str) -> anyhow::Result<Self> {
        Ok(Self::new(connect(database_url).await?))
    }
}

#[async_trait]
impl BlobStore for SqliteBlobStore {
    fn kind(&self) -> &'static str {
        "sqlite"
    }

    async fn put(&self, pathname: &str, body: Bytes) -> Result<StoredBlob, StoreError> {
        let key = suffixed_key(pathname);
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        // Last write wins if two publishes ever collide on a key.
        sqlx::query("INSERT OR REPLACE INTO blobs (key, body, created_at) VALUES (?, ?, ?)")
            .bind(&key)
            .bind(body.as_ref())
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(StoredBlob { key })
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        let row: Option<(Vec<u8>,)> = sqlx::query_as("SELECT body FROM blobs WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|(body,)| Bytes::from(body))
            .ok_or(StoreError::NotFound)
    }
}
