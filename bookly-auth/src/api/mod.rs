//! Client for the remote authentication API
//!
//! The Bookly API exposes a single authentication endpoint: `POST sessions`
//! with an email/password body, answering with a token and the user profile.
//! This module defines the client trait, its HTTP implementation, and the
//! shared request plumbing.

use async_trait::async_trait;
use bookly_core::{BooklyError, BooklyResult, Credentials, Session};
use std::collections::HashMap;

pub mod http;


pub use http::HttpAuthClient;

/// Configuration for API clients
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
    /// Additional headers
    pub headers: HashMap<String, String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_seconds: 30,
            user_agent: "bookly/0.1".to_string(),
            headers: HashMap::new(),
        }
    }
}

impl ApiClientConfig {
    /// Create a configuration pointing at the given API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Build a configuration from the core API config section
    pub fn from_core(config: &bookly_core::ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout_seconds: config.timeout_seconds,
            user_agent: config.user_agent.clone(),
            headers: HashMap::new(),
        }
    }

    /// Set additional header
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// Trait for authentication API clients
#[async_trait]
pub trait AuthApiClient: Send + Sync {
    /// Exchange credentials for a session (token + user profile)
    ///
    /// No retry is attempted; any network, server, or decoding failure
    /// propagates to the caller.
    async fn create_session(&self, credentials: &Credentials) -> BooklyResult<Session>;
}

/// Helper function to create HTTP client with common configuration
pub(crate) fn create_http_client(config: &ApiClientConfig) -> BooklyResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    // Add user agent
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
            BooklyError::Api {
                message: format!("Invalid user agent: {}", e),
                source: Some(Box::new(e)),
                context: bookly_core::ErrorContext::new("http_client")
                    .with_operation("create_client"),
            }
        })?,
    );

    // Add custom headers
    for (key, value) in &config.headers {
        let header_name = reqwest::header::HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            BooklyError::Api {
                message: format!("Invalid header name '{}': {}", key, e),
                source: Some(Box::new(e)),
                context: bookly_core::ErrorContext::new("http_client")
                    .with_operation("create_client"),
            }
        })?;

        let header_value =
            reqwest::header::HeaderValue::from_str(value).map_err(|e| BooklyError::Api {
                message: format!("Invalid header value for '{}': {}", key, e),
                source: Some(Box::new(e)),
                context: bookly_core::ErrorContext::new("http_client")
                    .with_operation("create_client"),
            })?;

        headers.insert(header_name, header_value);
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| BooklyError::Api {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(Box::new(e)),
            context: bookly_core::ErrorContext::new("http_client").with_operation("create_client"),
        })?;

    Ok(client)
}

/// Helper function to handle HTTP response errors
pub(crate) async fn handle_response_error(
    response: reqwest::Response,
    context: &str,
) -> BooklyError {
    let status = response.status();
    let url = response.url().clone();

    let error_body = response.text().await.unwrap_or_default();

    let message = format!(
        "HTTP {} error for {}: {}",
        status.as_u16(),
        url,
        if error_body.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error")
        } else {
            &error_body
        }
    );

    match status.as_u16() {
        401 | 403 => BooklyError::Authentication {
            message,
            context: bookly_core::ErrorContext::new("auth_api_client")
                .with_operation(context)
                .with_suggestion("Check the email and password"),
        },
        _ => BooklyError::Api {
            message,
            source: None,
            context: bookly_core::ErrorContext::new("auth_api_client")
                .with_operation(context)
                .with_suggestion(match status.as_u16() {
                    404 => "Check the API base URL",
                    429 => "Too many requests, try again later",
                    _ => "Check network connectivity and API status",
                }),
        },
    }
}
