use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CourierError {
    #[error("config parse error in {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("failed to publish response for {id}: {reason}")]
    Publish { id: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CourierError>;
