//! The response record: the single piece of data that outlives a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a stored response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseId(pub i32);

impl std::fmt::Display for ResponseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Server-assigned identifier.
    pub id: ResponseId,
    /// Whether the proposal was accepted.
    pub accepted: bool,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Values supplied when creating a response. Everything else is assigned by
/// the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewResponse {
    /// Whether the proposal was accepted.
    pub accepted: bool,
    /// Creation timestamp, taken from the server clock.
    pub created_at: DateTime<Utc>,
}
