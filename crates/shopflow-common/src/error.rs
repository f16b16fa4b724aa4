//! Error types for shopflow

use thiserror::Error;

/// Result type alias for shopflow operations
pub type Result<T> = std::result::Result<T, ShopflowError>;

/// Main error type for shopflow
#[derive(Error, Debug)]
pub enum ShopflowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ShopflowError {
    /// Create a parse error for an unrecognized enum spelling.
    ///
    /// Used by the `FromStr` implementations on the closed domain
    /// enumerations; an unrecognized role or status is a contract
    /// violation upstream, not a workflow decision.
    pub fn unrecognized(kind: &str, value: &str) -> Self {
        Self::Parse(format!("unrecognized {kind}: '{value}'"))
    }
}
