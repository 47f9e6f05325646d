use thiserror::Error;

pub type Result<T> = std::result::Result<T, SealBidError>;

#[derive(Error, Debug)]
pub enum SealBidError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Commitment hash mismatch: {0}")]
    HashMismatch(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SealBidError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn hash_mismatch(msg: impl Into<String>) -> Self {
        Self::HashMismatch(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Collapse a list of constraint violations into a single validation error.
    pub fn violations(violations: Vec<String>) -> Self {
        Self::Validation(violations.join("; "))
    }
}
