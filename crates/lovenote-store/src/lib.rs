//! PostgreSQL persistence for Lovenote response records.

pub mod pg_response_repository;
pub mod schema;
