//! Client-side submission of a response to the backend.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::response::ResponseId;

/// Hands a single response off to whatever stores it.
#[async_trait]
pub trait ResponseSubmitter: Send + Sync {
    /// Submits a response and returns the identifier the backend assigned.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Transport` when the backend is unreachable or
    /// rejects the request.
    async fn submit(&self, accepted: bool) -> Result<ResponseId, DomainError>;
}
