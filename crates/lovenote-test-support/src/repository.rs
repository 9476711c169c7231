//! Test repositories: mock `ResponseRepository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use lovenote_core::error::DomainError;
use lovenote_core::repository::ResponseRepository;
use lovenote_core::response::{NewResponse, ResponseId, ResponseRecord};

/// A repository that records every `create` call and hands out sequential
/// identifiers starting at 1, the way a serial column would.
#[derive(Debug, Default)]
pub struct RecordingResponseRepository {
    created: Mutex<Vec<ResponseRecord>>,
}

impl RecordingResponseRepository {
    /// Create an empty recording repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all records created so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn created(&self) -> Vec<ResponseRecord> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResponseRepository for RecordingResponseRepository {
    async fn create(&self, response: NewResponse) -> Result<ResponseRecord, DomainError> {
        let mut created = self.created.lock().unwrap();
        let next_id = i32::try_from(created.len()).unwrap_or(i32::MAX - 1) + 1;
        let record = ResponseRecord {
            id: ResponseId(next_id),
            accepted: response.accepted,
            created_at: response.created_at,
        };
        created.push(record.clone());
        Ok(record)
    }
}

/// A repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingResponseRepository;

#[async_trait]
impl ResponseRepository for FailingResponseRepository {
    async fn create(&self, _response: NewResponse) -> Result<ResponseRecord, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
