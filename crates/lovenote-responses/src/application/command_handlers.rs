//! Command handlers for the Response Recording context.

use lovenote_core::clock::Clock;
use lovenote_core::error::DomainError;
use lovenote_core::repository::ResponseRepository;
use lovenote_core::response::{NewResponse, ResponseRecord};
use tracing::info;

use crate::domain::commands::CreateResponse;

/// Handles the `CreateResponse` command: stamps the response with the current
/// time and stores it.
///
/// # Errors
///
/// Returns `DomainError` if the repository fails to store the record.
pub async fn handle_create_response(
    command: &CreateResponse,
    clock: &dyn Clock,
    repo: &dyn ResponseRepository,
) -> Result<ResponseRecord, DomainError> {
    let record = repo
        .create(NewResponse {
            accepted: command.accepted,
            created_at: clock.now(),
        })
        .await?;

    info!(
        correlation_id = %command.correlation_id,
        response_id = %record.id,
        accepted = record.accepted,
        "response recorded"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use lovenote_core::response::ResponseId;
    use lovenote_test_support::{
        FailingResponseRepository, FixedClock, RecordingResponseRepository,
    };

    use super::*;

    #[tokio::test]
    async fn test_handle_create_response_stores_stamped_record() {
        // Arrange
        let clock = FixedClock::valentines();
        let repo = RecordingResponseRepository::new();
        let command = CreateResponse::new(true);

        // Act
        let record = handle_create_response(&command, &clock, &repo)
            .await
            .unwrap();

        // Assert
        assert_eq!(record.id, ResponseId(1));
        assert!(record.accepted);
        assert_eq!(record.created_at, clock.0);
        assert_eq!(repo.created(), vec![record]);
    }

    #[tokio::test]
    async fn test_handle_create_response_assigns_sequential_ids() {
        let clock = FixedClock::valentines();
        let repo = RecordingResponseRepository::new();

        let first = handle_create_response(&CreateResponse::new(true), &clock, &repo)
            .await
            .unwrap();
        let second = handle_create_response(&CreateResponse::new(false), &clock, &repo)
            .await
            .unwrap();

        assert_eq!(first.id, ResponseId(1));
        assert_eq!(second.id, ResponseId(2));
        assert!(!second.accepted);
    }

    #[tokio::test]
    async fn test_handle_create_response_propagates_repository_error() {
        // Arrange
        let clock = FixedClock::valentines();
        let repo = FailingResponseRepository;

        // Act
        let result = handle_create_response(&CreateResponse::new(true), &clock, &repo).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[test]
    fn test_create_response_defaults_to_accepted() {
        let command: CreateResponse = serde_json::from_str("{}").unwrap();

        assert!(command.accepted);
    }

    #[test]
    fn test_create_response_honours_explicit_decline() {
        let command: CreateResponse = serde_json::from_str(r#"{"accepted": false}"#).unwrap();

        assert!(!command.accepted);
    }
}
