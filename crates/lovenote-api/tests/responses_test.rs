//! Integration tests for the responses resource.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn test_accepted_response_is_persisted(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let (status, json) = common::post_json(app, "/api/responses", r#"{"accepted": true}"#).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["accepted"], true);
    assert_eq!(json["created_at"], "2026-02-14T10:00:00Z");

    // Verify the row landed in the table.
    let id = i32::try_from(json["id"].as_i64().unwrap()).unwrap();
    let (accepted,): (bool,) = sqlx::query_as("SELECT accepted FROM responses WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(accepted);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_omitted_flag_is_stored_as_accepted(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let (status, json) = common::post_json(app, "/api/responses", "{}").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["accepted"], true);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_each_post_creates_a_new_row(pool: PgPool) {
    for _ in 0..3 {
        let app = common::build_test_app(pool.clone());
        let (status, _) = common::post_json(app, "/api/responses", "{}").await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM responses")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 3);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_malformed_body_is_rejected_without_insert(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let (status, _) = common::post_json(app, "/api/responses", r#"{"accepted": 1}"#).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM responses")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
