//! Commands for the Response Recording context.

use serde::Deserialize;
use uuid::Uuid;

/// Command to record an answer to the proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CreateResponse {
    /// The correlation ID for tracing.
    #[serde(default = "Uuid::new_v4")]
    pub correlation_id: Uuid,
    /// Whether the proposal was accepted. Absent means accepted.
    #[serde(default = "accepted_by_default")]
    pub accepted: bool,
}

fn accepted_by_default() -> bool {
    true
}

impl CreateResponse {
    /// A command with a fresh correlation ID.
    #[must_use]
    pub fn new(accepted: bool) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            accepted,
        }
    }
}
