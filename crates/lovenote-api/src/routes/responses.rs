//! Routes for the Response Recording bounded context.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};

use lovenote_core::response::ResponseRecord;
use lovenote_responses::application::command_handlers;
use lovenote_responses::domain::commands::CreateResponse;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /api/responses`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateResponseRequest {
    /// Whether the proposal was accepted; omitted means accepted.
    #[serde(default)]
    pub accepted: Option<bool>,
}

/// POST /api/responses
#[instrument(skip(state, request), fields(accepted = ?request.accepted))]
async fn create_response(
    State(state): State<AppState>,
    Json(request): Json<CreateResponseRequest>,
) -> Result<(StatusCode, Json<ResponseRecord>), ApiError> {
    let command = CreateResponse::new(request.accepted.unwrap_or(true));

    info!(correlation_id = %command.correlation_id, "handling create_response command");

    let record = command_handlers::handle_create_response(
        &command,
        state.clock.as_ref(),
        state.response_repository.as_ref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Returns the router for the responses resource.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_response))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use lovenote_core::repository::ResponseRepository;
    use lovenote_test_support::{
        FailingResponseRepository, FixedClock, RecordingResponseRepository,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn app_with(repository: Arc<dyn ResponseRepository>) -> Router {
        let state = AppState::new(Arc::new(FixedClock::valentines()), repository);
        Router::new().nest("/api/responses", router()).with_state(state)
    }

    fn post(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/responses")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_of(response: axum::response::Response) -> Value {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_response_returns_201_with_record() {
        // Arrange
        let repository = Arc::new(RecordingResponseRepository::new());
        let app = app_with(repository.clone());

        // Act
        let response = app.oneshot(post(r#"{"accepted": true}"#)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_of(response).await;
        assert_eq!(json["id"], 1);
        assert_eq!(json["accepted"], true);
        assert_eq!(json["created_at"], "2026-02-14T10:00:00Z");
        assert_eq!(repository.created().len(), 1);
    }

    #[tokio::test]
    async fn test_create_response_defaults_to_accepted() {
        let repository = Arc::new(RecordingResponseRepository::new());
        let app = app_with(repository.clone());

        let response = app.oneshot(post("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(repository.created()[0].accepted);
    }

    #[tokio::test]
    async fn test_create_response_records_decline() {
        let repository = Arc::new(RecordingResponseRepository::new());
        let app = app_with(repository.clone());

        let response = app.oneshot(post(r#"{"accepted": false}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(!repository.created()[0].accepted);
    }

    #[tokio::test]
    async fn test_create_response_returns_422_for_wrong_type() {
        // Arrange
        let repository = Arc::new(RecordingResponseRepository::new());
        let app = app_with(repository.clone());

        // Act
        let response = app
            .oneshot(post(r#"{"accepted": "yes"}"#))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(repository.created().is_empty());
    }

    #[tokio::test]
    async fn test_create_response_returns_500_when_store_fails() {
        // Arrange
        let app = app_with(Arc::new(FailingResponseRepository));

        // Act
        let response = app.oneshot(post(r#"{"accepted": true}"#)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_of(response).await;
        assert_eq!(json["error"], "infrastructure_error");
        assert!(json["message"].as_str().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_get_is_not_allowed() {
        let app = app_with(Arc::new(RecordingResponseRepository::new()));
        let request = Request::builder()
            .method("GET")
            .uri("/api/responses")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
