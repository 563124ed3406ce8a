//! Engine configuration.
//!
//! Loaded from a JSON file when one is given; every field has a default so
//! a bare `--db` invocation works. The store and evidence store built from
//! this are injected into the engine — there is no process-global client.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// SQLite database path, or ":memory:".
    pub database: String,
    /// How many of the most recent reports the leaderboard samples.
    pub leaderboard_scan_limit: usize,
    /// Directory evidence attachments are written to.
    pub evidence_dir: String,
    /// Base URL stored evidence is served under.
    pub evidence_base_url: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database: "raidwatch.db".to_string(),
            leaderboard_scan_limit: 500,
            evidence_dir: "evidence".to_string(),
            evidence_base_url: "/evidence".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("read config {:?}: {e}", path.as_ref()))?;
        Ok(serde_json::from_str(&raw)?)
    }
}
