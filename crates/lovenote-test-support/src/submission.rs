//! Test submitters: mock `ResponseSubmitter` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use lovenote_core::error::DomainError;
use lovenote_core::response::ResponseId;
use lovenote_core::submission::ResponseSubmitter;

/// A submitter that records the `accepted` flag of every call and succeeds
/// with a fixed identifier.
#[derive(Debug, Default)]
pub struct RecordingSubmitter {
    calls: Mutex<Vec<bool>>,
}

impl RecordingSubmitter {
    /// Create a submitter with no recorded calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the `accepted` flag of every submission, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResponseSubmitter for RecordingSubmitter {
    async fn submit(&self, accepted: bool) -> Result<ResponseId, DomainError> {
        self.calls.lock().unwrap().push(accepted);
        Ok(ResponseId(1))
    }
}

/// A submitter that records calls like `RecordingSubmitter` but always fails
/// with a transport error.
#[derive(Debug, Default)]
pub struct FailingSubmitter {
    calls: Mutex<Vec<bool>>,
}

impl FailingSubmitter {
    /// Create a failing submitter with no recorded calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the `accepted` flag of every submission attempt.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResponseSubmitter for FailingSubmitter {
    async fn submit(&self, accepted: bool) -> Result<ResponseId, DomainError> {
        self.calls.lock().unwrap().push(accepted);
        Err(DomainError::Transport("network unreachable".into()))
    }
}

/// A submitter whose calls never return, standing in for a backend that
/// stopped answering.
#[derive(Debug, Default)]
pub struct StalledSubmitter {
    calls: Mutex<Vec<bool>>,
}

impl StalledSubmitter {
    /// Create a stalled submitter with no recorded calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the `accepted` flag of every submission attempt.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResponseSubmitter for StalledSubmitter {
    async fn submit(&self, accepted: bool) -> Result<ResponseId, DomainError> {
        self.calls.lock().unwrap().push(accepted);
        std::future::pending().await
    }
}
