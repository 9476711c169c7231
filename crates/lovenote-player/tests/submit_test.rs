//! End-to-end tests of `HttpResponseSubmitter` against the response API.

use std::net::SocketAddr;
use std::sync::Arc;

use lovenote_api::state::AppState;
use lovenote_core::error::DomainError;
use lovenote_core::repository::ResponseRepository;
use lovenote_core::response::ResponseId;
use lovenote_core::submission::ResponseSubmitter;
use lovenote_player::http::HttpResponseSubmitter;
use lovenote_test_support::{FailingResponseRepository, FixedClock, RecordingResponseRepository};

async fn serve(repository: Arc<dyn ResponseRepository>) -> SocketAddr {
    let state = AppState::new(Arc::new(FixedClock::valentines()), repository);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, lovenote_api::app(state)).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_submit_stores_an_accepted_response() {
    // Arrange
    let repository = Arc::new(RecordingResponseRepository::new());
    let addr = serve(repository.clone()).await;
    let submitter = HttpResponseSubmitter::new(&format!("http://{addr}")).unwrap();

    // Act
    let id = submitter.submit(true).await.unwrap();

    // Assert
    assert_eq!(id, ResponseId(1));
    let created = repository.created();
    assert_eq!(created.len(), 1);
    assert!(created[0].accepted);
}

#[tokio::test]
async fn test_server_error_is_a_transport_error() {
    // Arrange
    let addr = serve(Arc::new(FailingResponseRepository)).await;
    let submitter = HttpResponseSubmitter::new(&format!("http://{addr}/")).unwrap();

    // Act
    let result = submitter.submit(true).await;

    // Assert
    match result {
        Err(DomainError::Transport(message)) => assert!(message.contains("500")),
        other => panic!("expected transport error, got {other:?}"),
    }
}
