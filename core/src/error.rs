use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid raider tag: '{raw}'")]
    InvalidIdentity { raw: String },

    #[error("Invalid raider slug: '{raw}'")]
    InvalidSlug { raw: String },

    #[error("Unknown report reason: '{raw}'")]
    InvalidReason { raw: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Evidence storage failed: {0}")]
    Evidence(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// Stable wire identifier for this error kind. Shells map these onto
    /// their own status codes; the strings never change once shipped.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Database(_) => "upstream_failure",
            EngineError::Serialization(_) => "serialization_error",
            EngineError::InvalidIdentity { .. } => "invalid_identity",
            EngineError::InvalidSlug { .. } => "invalid_slug",
            EngineError::InvalidReason { .. } => "invalid_reason",
            EngineError::NotFound { .. } => "not_found",
            EngineError::Validation(_) => "validation_error",
            EngineError::Evidence(_) => "evidence_failure",
            EngineError::StoreUnavailable(_) => "store_unavailable",
            EngineError::Other(_) => "internal_error",
        }
    }

    /// True when the caller sent something we refuse to act on (4xx class),
    /// false when a dependency failed us (5xx class).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidIdentity { .. }
                | EngineError::InvalidSlug { .. }
                | EngineError::InvalidReason { .. }
                | EngineError::NotFound { .. }
                | EngineError::Validation(_)
        )
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
