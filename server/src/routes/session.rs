//! Session routes: login, current identity, logout.
//!
//! The bearer token lives in an HttpOnly cookie owned by this server and is
//! never written into a response body. Identity bodies carry
//! `SESSION_MARKER` in its place. The browser-side session store talks only
//! to these endpoints; it never sees the backend directly.

use access::{Credentials, Identity, SESSION_COOKIE, User};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::services::backend::BackendError;
use crate::state::AppState;

/// Stands in for the bearer token in identity bodies sent to the browser.
pub(crate) const SESSION_MARKER: &str = "cookie";

fn browser_identity(user: User) -> Identity {
    Identity { token: SESSION_MARKER.to_owned(), user }
}

pub(crate) fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

pub(crate) fn expired_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

pub(crate) fn backend_error_to_status(err: &BackendError) -> StatusCode {
    match err {
        BackendError::Unauthorized => StatusCode::UNAUTHORIZED,
        BackendError::Unreachable(_) | BackendError::Upstream(_) | BackendError::Decode(_) => StatusCode::BAD_GATEWAY,
    }
}

/// `POST /api/session/login`: exchange credentials, set cookie, return identity.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Json(credentials): Json<Credentials>) -> Response {
    match state.backend.login(&credentials).await {
        Ok(identity) => {
            tracing::info!(user_id = %identity.user.id, role = %identity.user.role, "login succeeded");
            let jar = jar.add(session_cookie(identity.token, state.cookie_secure));
            (jar, Json(browser_identity(identity.user))).into_response()
        }
        Err(e) => {
            let status = backend_error_to_status(&e);
            if status == StatusCode::UNAUTHORIZED {
                tracing::info!(email = %credentials.email, "login rejected");
            } else {
                tracing::error!(error = %e, "login backend call failed");
            }
            (status, e.to_string()).into_response()
        }
    }
}

/// `GET /api/session/me`: resolve the cookie's token into an identity.
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Response {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_owned()).unwrap_or_default();
    if token.trim().is_empty() {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match state.backend.profile(&token).await {
        Ok(user) => Json(browser_identity(user)).into_response(),
        Err(BackendError::Unauthorized) => {
            // Expired or revoked: drop the cookie so the edge gate stops passing it.
            let jar = jar.add(expired_session_cookie(state.cookie_secure));
            (jar, StatusCode::UNAUTHORIZED).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "profile backend call failed");
            (backend_error_to_status(&e), e.to_string()).into_response()
        }
    }
}

/// `POST /api/session/logout`: clear the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(expired_session_cookie(state.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
