//! Response repository abstraction.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::response::{NewResponse, ResponseRecord};

/// Create-only storage for response records.
///
/// There are deliberately no read, update or delete operations.
#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Inserts a new response and returns the stored record.
    async fn create(&self, response: NewResponse) -> Result<ResponseRecord, DomainError>;
}
