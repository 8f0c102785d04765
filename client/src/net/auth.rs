//! Session endpoints backing the browser's `SessionStore`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token never reaches script: `/api/session/login` sets an HttpOnly
//! cookie, `/api/session/me` resolves it, `/api/session/logout` expires it.
//! Identity bodies carry a fixed marker in the token field, so the session
//! token here only records that a cookie is held.
//! On the server (SSR) every call fails fast; the store is only initialized
//! after hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use access::{AuthBackend, Credentials, Identity, SessionError};

#[cfg(any(test, feature = "hydrate"))]
const LOGIN_ENDPOINT: &str = "/api/session/login";
#[cfg(any(test, feature = "hydrate"))]
const ME_ENDPOINT: &str = "/api/session/me";
#[cfg(any(test, feature = "hydrate"))]
const LOGOUT_ENDPOINT: &str = "/api/session/logout";

/// Map a non-OK session endpoint status to a store error.
#[cfg(any(test, feature = "hydrate"))]
fn status_error(status: u16) -> SessionError {
    match status {
        400 | 401 | 403 => SessionError::AuthenticationFailed,
        other => SessionError::NetworkFailure(format!("session endpoint responded with status {other}")),
    }
}

#[cfg(feature = "hydrate")]
fn transport_error(err: gloo_net::Error) -> SessionError {
    SessionError::NetworkFailure(err.to_string())
}

#[cfg(feature = "hydrate")]
async fn decode_identity(resp: gloo_net::http::Response) -> Result<Identity, SessionError> {
    resp.json::<Identity>()
        .await
        .map_err(|e| SessionError::NetworkFailure(format!("unexpected session payload: {e}")))
}

/// `AuthBackend` over the server's session endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApiAuthBackend;

impl AuthBackend for ApiAuthBackend {
    async fn restore(&self) -> Result<Option<Identity>, SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(ME_ENDPOINT).send().await.map_err(transport_error)?;
            if resp.status() == 401 {
                return Ok(None);
            }
            if !resp.ok() {
                return Err(status_error(resp.status()));
            }
            decode_identity(resp).await.map(Some)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(SessionError::NetworkFailure("not available on server".to_owned()))
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<Identity, SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(LOGIN_ENDPOINT)
                .json(credentials)
                .map_err(transport_error)?
                .send()
                .await
                .map_err(transport_error)?;
            if !resp.ok() {
                return Err(status_error(resp.status()));
            }
            decode_identity(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
            Err(SessionError::NetworkFailure("not available on server".to_owned()))
        }
    }

    async fn logout(&self) -> Result<(), SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(LOGOUT_ENDPOINT).send().await.map_err(transport_error)?;
            if resp.ok() { Ok(()) } else { Err(status_error(resp.status())) }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(SessionError::NetworkFailure("not available on server".to_owned()))
        }
    }
}
