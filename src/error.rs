// KidTube Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KidTubeError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("Incorrect PIN")]
    PinRejected,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Video not found: {0}")]
    NotFound(i64),

    #[error("{0}")]
    Other(String),
}

impl KidTubeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        KidTubeError::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, KidTubeError::Validation(_))
    }
}

impl From<anyhow::Error> for KidTubeError {
    fn from(err: anyhow::Error) -> Self {
        // Migration failures come through anyhow; keep the engine error when there is one.
        match err.downcast::<rusqlite::Error>() {
            Ok(e) => KidTubeError::Storage(e),
            Err(err) => KidTubeError::Other(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, KidTubeError>;
