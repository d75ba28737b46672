//! Cross-cutting error types for Tempo.
//!
//! Crate-specific errors (`RemoteError`, `CacheError`, `ConfigError`) live in
//! their respective crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Tempo crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation before it was submitted.
    #[error("Validation error: {0}")]
    Validation(String),
}
