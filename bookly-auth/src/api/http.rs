//! HTTP implementation of the authentication API client

use async_trait::async_trait;
use bookly_core::{BooklyError, BooklyResult, Credentials, Session};
use tracing::{debug, info};

use super::{create_http_client, handle_response_error, ApiClientConfig, AuthApiClient};

/// Authentication client backed by the remote Bookly API
pub struct HttpAuthClient {
    client: reqwest::Client,
    config: ApiClientConfig,
}

impl HttpAuthClient {
    /// Create a new HTTP authentication client
    pub fn new(config: ApiClientConfig) -> BooklyResult<Self> {
        let client = create_http_client(&config)?;

        info!("Created auth API client for {}", config.base_url);

        Ok(Self { client, config })
    }

    fn sessions_url(&self) -> String {
        format!("{}/sessions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl AuthApiClient for HttpAuthClient {
    async fn create_session(&self, credentials: &Credentials) -> BooklyResult<Session> {
        let url = self.sessions_url();

        debug!("Requesting new session from {}", url);

        let response = self
            .client
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| BooklyError::Api {
                message: format!("Failed to reach authentication endpoint: {}", e),
                source: Some(Box::new(e)),
                context: bookly_core::ErrorContext::new("http_auth_client")
                    .with_operation("create_session")
                    .with_suggestion("Check network connectivity and the API base URL"),
            })?;

        if !response.status().is_success() {
            return Err(handle_response_error(response, "create_session").await);
        }

        let session: Session = response.json().await.map_err(|e| BooklyError::Api {
            message: format!("Malformed session response: {}", e),
            source: Some(Box::new(e)),
            context: bookly_core::ErrorContext::new("http_auth_client")
                .with_operation("create_session"),
        })?;

        debug!("Session created for user {}", session.user.id);

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_body() -> &'static str {
        r#"{"token":"tok123","user":{"id":"1","name":"Ana","email":"a@b.com","avatar_url":null}}"#
    }

    #[tokio::test]
    async fn test_create_session_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/sessions")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(user_body())
            .create_async()
            .await;

        let client = HttpAuthClient::new(ApiClientConfig::new(server.url())).unwrap();
        let session = client
            .create_session(&Credentials::new("a@b.com", "secret"))
            .await
            .unwrap();

        assert_eq!(session.token, "tok123");
        assert_eq!(session.user.id, "1");
        assert_eq!(session.user.name, "Ana");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_session_rejected_credentials() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/sessions")
            .with_status(401)
            .with_body(r#"{"error":"invalid credentials"}"#)
            .create_async()
            .await;

        let client = HttpAuthClient::new(ApiClientConfig::new(server.url())).unwrap();
        let result = client
            .create_session(&Credentials::new("a@b.com", "wrong"))
            .await;

        assert!(matches!(
            result,
            Err(BooklyError::Authentication { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_session_malformed_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/sessions")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = HttpAuthClient::new(ApiClientConfig::new(server.url())).unwrap();
        let result = client
            .create_session(&Credentials::new("a@b.com", "secret"))
            .await;

        assert!(matches!(result, Err(BooklyError::Api { .. })));
    }

    #[tokio::test]
    async fn test_create_session_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/sessions")
            .with_status(500)
            .create_async()
            .await;

        let client = HttpAuthClient::new(ApiClientConfig::new(server.url())).unwrap();
        let result = client
            .create_session(&Credentials::new("a@b.com", "secret"))
            .await;

        assert!(matches!(result, Err(BooklyError::Api { .. })));
    }
}
