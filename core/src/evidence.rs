//! Evidence attachment storage.
//!
//! The engine only needs "bytes + content type in, retrievable URL out";
//! everything else about blob storage stays behind this trait. The shipped
//! implementation writes to a local directory and serves files under a
//! configured base URL.

use std::path::PathBuf;

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

pub trait EvidenceStore: Send {
    /// Store one attachment; returns a URL the stored bytes can be
    /// retrieved from.
    fn store(&self, bytes: &[u8], content_type: &str) -> EngineResult<String>;
}

/// Filesystem-backed evidence store. File names are uuids with an extension
/// derived from the content type; unknown content types are rejected.
pub struct LocalEvidenceStore {
    dir: PathBuf,
    base_url: String,
}

impl LocalEvidenceStore {
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_url: base_url.into(),
        }
    }
}

impl EvidenceStore for LocalEvidenceStore {
    fn store(&self, bytes: &[u8], content_type: &str) -> EngineResult<String> {
        let ext = extension_for(content_type).ok_or_else(|| {
            EngineError::Evidence(format!("unsupported content type: {content_type}"))
        })?;
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| EngineError::Evidence(format!("create {:?}: {e}", self.dir)))?;
        let name = format!("{}.{ext}", Uuid::new_v4());
        let path = self.dir.join(&name);
        std::fs::write(&path, bytes)
            .map_err(|e| EngineError::Evidence(format!("write {path:?}: {e}")))?;
        Ok(format!("{}/{name}", self.base_url.trim_end_matches('/')))
    }
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "video/mp4" => Some("mp4"),
        "video/webm" => Some("webm"),
        _ => None,
    }
}
