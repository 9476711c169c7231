//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Input rejected by domain rules.
    #[error("validation error: {0}")]
    Validation(String),

    /// A persistence failure on the server side.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),

    /// The submission could not reach the backend or was rejected by it.
    #[error("transport error: {0}")]
    Transport(String),
}
