//! Shared application state.

use std::sync::Arc;

use lovenote_core::clock::Clock;
use lovenote_core::repository::ResponseRepository;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of `created_at` timestamps.
    pub clock: Arc<dyn Clock>,
    /// Where responses are stored.
    pub response_repository: Arc<dyn ResponseRepository>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, response_repository: Arc<dyn ResponseRepository>) -> Self {
        Self {
            clock,
            response_repository,
        }
    }
}
