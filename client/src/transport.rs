//! Transport layer: the wire calls the coordinator makes.
//!
//! `AuthTransport` is the seam the coordinator is tested through;
//! `HttpTransport` is the reqwest implementation speaking to the DevPath
//! auth API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Token pair as held by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds, as reported by the server
    pub expires_in: i64,
}

/// Transport-level failures, before session semantics are applied
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The server answered with a non-success status
    #[error("rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// No answer within the deadline. The request may or may not have been
    /// processed server-side.
    #[error("request timed out")]
    Timeout,

    /// The server could not be reached at all
    #[error("connection failed: {0}")]
    Connection(String),
}

/// Wire operations against the auth API
#[async_trait]
pub trait AuthTransport: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<SessionTokens, TransportError>;

    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens, TransportError>;

    async fn logout(&self, access_token: &str) -> Result<(), TransportError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Transport against `base_url` with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, crate::SessionError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Transport with an explicit per-request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, crate::SessionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::SessionError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn classify(error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Connection(error.to_string())
        }
    }

    async fn parse_failure(response: reqwest::Response) -> TransportError {
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_default();

        TransportError::Rejected { status, message }
    }

    async fn parse_tokens(response: reqwest::Response) -> Result<SessionTokens, TransportError> {
        if !response.status().is_success() {
            return Err(Self::parse_failure(response).await);
        }

        let body = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(SessionTokens {
            access_token: body.access_token,
            refresh_token: body.refresh_token,
            expires_in: body.expires_in,
        })
    }
}

#[async_trait]
impl AuthTransport for HttpTransport {
    async fn login(&self, email: &str, password: &str) -> Result<SessionTokens, TransportError> {
        debug!("POST /api/v1/auth/login");

        let response = self
            .client
            .post(self.url("/api/v1/auth/login"))
            .json(&serde_json::json!({"email": email, "password": password}))
            .send()
            .await
            .map_err(Self::classify)?;

        Self::parse_tokens(response).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens, TransportError> {
        debug!("POST /api/v1/auth/refresh");

        let response = self
            .client
            .post(self.url("/api/v1/auth/refresh"))
            .json(&serde_json::json!({"refresh_token": refresh_token}))
            .send()
            .await
            .map_err(Self::classify)?;

        Self::parse_tokens(response).await
    }

    async fn logout(&self, access_token: &str) -> Result<(), TransportError> {
        debug!("POST /api/v1/auth/logout");

        let response = self
            .client
            .post(self.url("/api/v1/auth/logout"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(Self::classify)?;

        if !response.status().is_success() {
            return Err(Self::parse_failure(response).await);
        }

        Ok(())
    }
}
