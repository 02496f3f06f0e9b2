//! HTTP client for the Practicum homework-status endpoint
//!
//! One authenticated GET per call with a `from_date` cursor. Transport
//! failures are mapped into [`ApiError`] so the poll loop can treat them as
//! recoverable without inspecting reqwest internals.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::models::ApiResponse;

/// Errors that can occur while fetching homework statuses
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection-level failure (refused, unreachable, DNS)
    #[error("endpoint unavailable")]
    EndpointUnavailable,

    /// The endpoint answered with a non-success HTTP status
    #[error("unexpected status code: {0}")]
    UnexpectedStatusCode(u16),

    /// Any other transport failure (timeout, TLS, protocol)
    #[error("request failed: {0}")]
    RequestFailure(#[from] reqwest::Error),

    /// The body could not be decoded as a homework-status response
    #[error("malformed response body: {0}")]
    MalformedResponse(String),
}

/// Practicum homework-status API client
pub struct PracticumClient {
    /// HTTP client with configured timeout
    client: Client,

    /// OAuth token sent on every request
    token: String,

    /// Endpoint URL to poll
    endpoint: String,
}

impl PracticumClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns `ApiError::RequestFailure` if the HTTP client cannot be built
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::with_endpoint(
            &config.token,
            &config.endpoint,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Create a client against an explicit endpoint URL
    ///
    /// Used by tests to point the client at a mock server.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::RequestFailure` if the HTTP client cannot be built
    pub fn with_endpoint(token: &str, endpoint: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            token: token.to_string(),
            endpoint: endpoint.to_string(),
        })
    }

    /// Fetch homework statuses updated since `cursor` (Unix seconds)
    ///
    /// A cursor of zero or less is replaced with the current time, matching
    /// the first-call behavior before any server timestamp has been seen.
    ///
    /// # Errors
    ///
    /// - [`ApiError::EndpointUnavailable`] on connection failure
    /// - [`ApiError::UnexpectedStatusCode`] on any non-2xx answer
    /// - [`ApiError::RequestFailure`] on other transport failures
    /// - [`ApiError::MalformedResponse`] when the body is not valid JSON
    pub async fn fetch(&self, cursor: i64) -> Result<ApiResponse, ApiError> {
        let from_date = if cursor > 0 {
            cursor
        } else {
            chrono::Utc::now().timestamp()
        };

        tracing::info!(from_date, endpoint = %self.endpoint, "polling homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ApiError::EndpointUnavailable
                } else {
                    ApiError::RequestFailure(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatusCode(status.as_u16()));
        }

        response
            .json::<ApiResponse>()
            .await
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }
}
