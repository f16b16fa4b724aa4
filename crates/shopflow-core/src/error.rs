//! Core-specific error types

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for audit-store operations
pub type AuditResult<T> = std::result::Result<T, AuditError>;

/// Errors raised by the audit store backends
///
/// These never reach the end user: audit recording is best-effort, and
/// callers of [`crate::audit::AuditRecorder::record`] treat an `Err` as a
/// logged, non-fatal outcome.
#[derive(Error, Debug)]
pub enum AuditError {
    /// SQL query or connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Storage backend rejected or could not service the call
    #[error("Audit store unavailable: {0}")]
    Unavailable(String),

    /// A stored row no longer parses into the closed domain enumerations
    #[error("Stored audit event {id} has invalid {field}: '{value}'")]
    Decode {
        id: Uuid,
        field: &'static str,
        value: String,
    },

    /// Shared shopflow error (enum parsing, configuration)
    #[error("Shopflow error: {0}")]
    Shopflow(#[from] shopflow_common::ShopflowError),
}

impl AuditError {
    /// Create an unavailability error with backend context
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}
