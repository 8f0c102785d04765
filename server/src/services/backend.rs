//! Client for the external POS REST API.
//!
//! ARCHITECTURE
//! ============
//! The console never owns business data. Everything it shows comes from the
//! backend: session routes call `login`/`profile`, and the `/api/v1` proxy
//! relays any other request with the caller's bearer token attached.
//! `Backend` is a trait so route tests can run against an in-memory double.

use std::time::Duration;

use access::{Credentials, Identity, User};
use axum::body::Bytes;
use axum::http::{Method, StatusCode, header};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend rejected the credentials")]
    Unauthorized,
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("backend responded with status {0}")]
    Upstream(u16),
    #[error("unexpected backend payload: {0}")]
    Decode(String),
}

/// A request to relay to the backend unchanged apart from the bearer token.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    /// Path relative to the backend base URL, with query string.
    pub path_and_query: String,
    pub token: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Backend answer relayed back to the browser.
#[derive(Debug, Clone)]
pub struct ForwardResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Exchange credentials for a bearer token and user.
    async fn login(&self, credentials: &Credentials) -> Result<Identity, BackendError>;

    /// Resolve the user behind a bearer token.
    async fn profile(&self, token: &str) -> Result<User, BackendError>;

    /// Relay an arbitrary API request.
    async fn forward(&self, request: ForwardRequest) -> Result<ForwardResponse, BackendError>;
}

// =============================================================================
// WIRE SHAPES
// =============================================================================

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(alias = "access_token", alias = "accessToken")]
    token: String,
    user: User,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProfileResponse {
    Wrapped { user: User },
    Bare(User),
}

pub(crate) fn decode_login(body: &[u8]) -> Result<Identity, BackendError> {
    let resp: LoginResponse = serde_json::from_slice(body).map_err(|e| BackendError::Decode(e.to_string()))?;
    if resp.token.trim().is_empty() {
        return Err(BackendError::Decode("empty token".to_owned()));
    }
    Ok(Identity { token: resp.token, user: resp.user })
}

pub(crate) fn decode_profile(body: &[u8]) -> Result<User, BackendError> {
    match serde_json::from_slice(body).map_err(|e| BackendError::Decode(e.to_string()))? {
        ProfileResponse::Wrapped { user } | ProfileResponse::Bare(user) => Ok(user),
    }
}

/// Map a non-success status to an error. Bad-request answers to a login or
/// profile call mean the credential was rejected.
pub(crate) fn auth_status_error(status: StatusCode) -> Option<BackendError> {
    if status.is_success() {
        return None;
    }
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Some(BackendError::Unauthorized)
        }
        other => Some(BackendError::Upstream(other.as_u16())),
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

// =============================================================================
// HTTP IMPLEMENTATION
// =============================================================================

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a backend client with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;
        Ok(Self { client, base_url: base_url.into() })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> Result<Identity, BackendError> {
        let resp = self
            .client
            .post(self.url("auth/login"))
            .json(credentials)
            .send()
            .await
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;

        if let Some(err) = auth_status_error(resp.status()) {
            return Err(err);
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;
        decode_login(&body)
    }

    async fn profile(&self, token: &str) -> Result<User, BackendError> {
        let resp = self
            .client
            .get(self.url("auth/profile"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;

        if let Some(err) = auth_status_error(resp.status()) {
            return Err(err);
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;
        decode_profile(&body)
    }

    async fn forward(&self, request: ForwardRequest) -> Result<ForwardResponse, BackendError> {
        let mut builder = self
            .client
            .request(request.method, self.url(&request.path_and_query))
            .body(request.body);
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(content_type) = &request.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = resp
            .bytes()
            .await
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;

        Ok(ForwardResponse { status, content_type, body })
    }
}

#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;
