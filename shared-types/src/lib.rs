//! Shared types between the designer UI and the storage gateway
//!
//! These types are used by both:
//! - the axum gateway (native Rust)
//! - the Dioxus designer (WASM)
//!
//! The dataset model and its two text views live here so the browser and the
//! server agree on exactly one serialization.

pub mod controller;
pub mod parse;
pub mod record;
pub mod serialize;

pub use controller::SyncController;
pub use parse::{parse, ShapeError, ValidationError};
pub use record::{Field, Mode, ParseFieldError, ParseModeError, Record};
pub use serialize::{jsonl_line_count, to_jsonl, to_pretty_json};

use serde::{Deserialize, Serialize};

// ============================================================================
// Routes
// ============================================================================

/// Publish endpoint, relative to the gateway origin
pub const PUBLISH_PATH: &str = "/api/publish";

/// Prefix for retrieval links; the blob id follows as the last segment
pub const DATA_PATH_PREFIX: &str = "/api/data";

// ============================================================================
// Gateway Error Bodies
// ============================================================================

pub const MESSAGE_ERROR_STORING: &str = "Error storing data";
pub const MESSAGE_DATA_NOT_FOUND: &str = "Data not found";
pub const MESSAGE_ERROR_RETRIEVING: &str = "Error retrieving data";

/// JSON body returned by the gateway on any failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn storing() -> Self {
        Self::new(MESSAGE_ERROR_STORING)
    }

    pub fn not_found() -> Self {
        Self::new(MESSAGE_DATA_NOT_FOUND)
    }

    pub fn retrieving() -> Self {
        Self::new(MESSAGE_ERROR_RETRIEVING)
    }
}

// ============================================================================
// Published Reference
// ============================================================================

/// Retrieval URL handed back by a successful publish.
///
/// Held in memory only; every publish replaces the previous one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PublishedReference(pub String);

impl PublishedReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blob id, i.e. the last path segment of the URL
    pub fn id(&self) -> &str {
        self.0
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

impl std::fmt::Display for PublishedReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Download
// ============================================================================

pub const DOWNLOAD_FILE_NAME: &str = "data.jsonl";
pub const DOWNLOAD_MIME: &str = "text/plain";

/// A file the browser should save locally
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFile {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub contents: String,
}
