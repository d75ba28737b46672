//! Error types for remote service calls.

use thiserror::Error;

/// Errors from the remote persistence/auth service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The call needs a signed-in user and there is none.
    #[error("User not authenticated")]
    Unauthenticated,

    /// The signed-in user may not touch the targeted records.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A query failed or was rejected by the backend.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A record carried unknown or read-only fields, or failed to decode.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}
