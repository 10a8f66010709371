use std::path::PathBuf;

/// Which blob store backs publish/fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Sqlite {
        database_url: String,
    },
    Http {
        api_url: String,
        public_url: String,
        token: String,
    },
}

impl StoreBackend {
    fn from_env(value: &str) -> anyhow::Result<Self> {
        match value {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite {
                database_url: env_str("BLOB_DATABASE_URL", "sqlite:./data/blobs.db"),
            }),
            "http" => Ok(Self::Http {
                api_url: env_url("BLOB_API_URL")?,
                public_url: env_url("BLOB_PUBLIC_URL")?,
                token: env_var("BLOB_READ_WRITE_TOKEN").ok_or_else(|| {
                    anyhow::anyhow!("BLOB_READ_WRITE_TOKEN is required when BLOB_STORE=http")
                })?,
            }),
            other => Err(anyhow::anyhow!(
                "Invalid BLOB_STORE '{other}'. Expected 'sqlite', 'memory' or 'http'"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port the gateway listens on
    pub port: u16,
    /// Origin used to build published links, without trailing slash
    pub public_url: String,
    /// Blob store backend
    pub store: StoreBackend,
    /// Largest JSONL body accepted by publish
    pub max_publish_bytes: usize,
    /// Origins allowed to call the API cross-origin (designer dev server)
    pub cors_allowed_origins: Vec<String>,
    /// Built designer UI served as the router fallback, if present
    pub frontend_dist: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let port = env_parse("GATEWAY_PORT", 3000)?;
        let public_url = match env_var("PUBLIC_URL") {
            Some(raw) => parse_url("PUBLIC_URL", &raw)?,
            None => format!("http://localhost:{port}"),
        };

        Ok(Self {
            port,
            public_url,
            store: StoreBackend::from_env(&env_str("BLOB_STORE", "sqlite"))?,
            max_publish_bytes: env_parse("MAX_PUBLISH_BYTES", 4 * 1024 * 1024)?,
            cors_allowed_origins: env_csv(
                "CORS_ALLOWED_ORIGINS",
                &["http://localhost:8080", "http://127.0.0.1:8080"],
            ),
            frontend_dist: frontend_dist_from_env(),
        })
    }
}

/// Trimmed value of `key`; unset and blank values both count as absent.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn env_str(key: &str, default: &str) -> String {
    env_var(key).unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    let Some(val) = env_var(key) else {
        return Ok(default);
    };
    val.parse::<T>()
        .map_err(|e| anyhow::anyhow!("Failed to parse env var {key}={val}: {e}"))
}

fn env_csv(key: &str, default: &[&str]) -> Vec<String> {
    let Some(raw) = env_var(key) else {
        return default.iter().map(|s| (*s).to_string()).collect();
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn env_url(key: &str) -> anyhow::Result<String> {
    let raw = env_var(key).ok_or_else(|| anyhow::anyhow!("{key} is required"))?;
    parse_url(key, &raw)
}

fn parse_url(key: &str, raw: &str) -> anyhow::Result<String> {
    url::Url::parse(raw.trim()).map_err(|e| anyhow::anyhow!("Invalid URL in {key}={raw}: {e}"))?;
    Ok(raw.trim().trim_end_matches('/').to_string())
}

/// Resolve the designer dist directory.
///
/// If `FRONTEND_DIST` is set, that value is used as-is. Otherwise fall back to
/// the `dx build` output under the workspace root, when it exists.
pub fn frontend_dist_from_env() -> Option<String> {
    if let Some(path) = env_var("FRONTEND_DIST") {
        return Some(path);
    }

    let workspace_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    let dist = workspace_root.join("designer-ui/target/dx/designer-ui/release/web/public");
    dist.is_dir().then(|| dist.to_string_lossy().to_string())
}
