//! `PostgreSQL` implementation of the `ResponseRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, error};

use lovenote_core::error::DomainError;
use lovenote_core::repository::ResponseRepository;
use lovenote_core::response::{NewResponse, ResponseId, ResponseRecord};

const INSERT_RESPONSE: &str = r"
INSERT INTO responses (accepted, created_at)
VALUES ($1, $2)
RETURNING id, accepted, created_at
";

#[derive(Debug, sqlx::FromRow)]
struct ResponseRow {
    id: i32,
    accepted: bool,
    created_at: DateTime<Utc>,
}

impl From<ResponseRow> for ResponseRecord {
    fn from(row: ResponseRow) -> Self {
        Self {
            id: ResponseId(row.id),
            accepted: row.accepted,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed response repository.
#[derive(Debug, Clone)]
pub struct PgResponseRepository {
    pool: PgPool,
}

impl PgResponseRepository {
    /// Creates a new `PgResponseRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseRepository for PgResponseRepository {
    async fn create(&self, response: NewResponse) -> Result<ResponseRecord, DomainError> {
        let row: ResponseRow = sqlx::query_as(INSERT_RESPONSE)
            .bind(response.accepted)
            .bind(response.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to insert response");
                DomainError::Infrastructure(format!("response insert failed: {e}"))
            })?;

        debug!(response_id = row.id, "response inserted");
        Ok(row.into())
    }
}
