use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} '{key}' not found")]
    NotFound { kind: &'static str, key: String },

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn theme_not_found(key: impl Into<String>) -> Self {
        StoreError::NotFound { kind: "theme", key: key.into() }
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        StoreError::Backend(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
