//! HTTP client for the response API.

use std::time::Duration;

use async_trait::async_trait;
use lovenote_core::error::DomainError;
use lovenote_core::response::{ResponseId, ResponseRecord};
use lovenote_core::submission::ResponseSubmitter;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::PlayerError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct CreateResponseBody {
    accepted: bool,
}

/// Posts responses to `{api_url}/api/responses`.
#[derive(Debug, Clone)]
pub struct HttpResponseSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpResponseSubmitter {
    /// Creates a submitter for the API at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Http` if the HTTP client cannot be built.
    pub fn new(api_url: &str) -> Result<Self, PlayerError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/responses", api_url.trim_end_matches('/')),
        })
    }

    /// The URL responses are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ResponseSubmitter for HttpResponseSubmitter {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn submit(&self, accepted: bool) -> Result<ResponseId, DomainError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&CreateResponseBody { accepted })
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Transport(format!(
                "response API returned {status}"
            )));
        }

        let record: ResponseRecord = response
            .json()
            .await
            .map_err(|e| DomainError::Transport(format!("unreadable response body: {e}")))?;

        debug!(response_id = %record.id, created_at = %record.created_at, "response stored");
        Ok(record.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_api_url() {
        let submitter = HttpResponseSubmitter::new("http://127.0.0.1:3000").unwrap();

        assert_eq!(submitter.endpoint(), "http://127.0.0.1:3000/api/responses");
    }

    #[test]
    fn test_endpoint_ignores_trailing_slash() {
        let submitter = HttpResponseSubmitter::new("https://love.example/").unwrap();

        assert_eq!(submitter.endpoint(), "https://love.example/api/responses");
    }

    #[tokio::test]
    async fn test_unreachable_api_is_a_transport_error() {
        // Arrange
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let submitter = HttpResponseSubmitter::new(&format!("http://{addr}")).unwrap();

        // Act
        let result = submitter.submit(true).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Transport(_))));
    }
}
