//! `/api/v1` relay to the backend REST API.
//!
//! The browser cannot read the HttpOnly session cookie, so resource pages
//! call this relay and the server attaches the bearer token on their behalf.
//! Status codes and bodies come back untouched; the backend stays the
//! authority on what each role may read or write.

use access::SESSION_COOKIE;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::services::backend::{BackendError, ForwardRequest};
use crate::state::AppState;

pub(crate) fn path_and_query(path: &str, uri: &Uri) -> String {
    match uri.query() {
        Some(query) if !query.is_empty() => format!("{path}?{query}"),
        _ => path.to_owned(),
    }
}

/// The captured path is percent-decoded, so `%2e%2e` arrives as `..`. A
/// dot segment or a backslash could climb out of the backend's API prefix
/// once joined onto the base URL.
pub(crate) fn is_relay_path(path: &str) -> bool {
    !path.contains('\\') && path.split('/').all(|segment| segment != "." && segment != "..")
}

/// `ANY /api/v1/{*path}`
pub async fn proxy(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(path): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !is_relay_path(&path) {
        tracing::warn!(path = %path, "rejected relay path with dot segments");
        return (StatusCode::BAD_REQUEST, "invalid api path").into_response();
    }

    let token = jar.get(SESSION_COOKIE).map(Cookie::value).filter(|t| !t.trim().is_empty()).map(str::to_owned);
    let content_type = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()).map(str::to_owned);

    let request = ForwardRequest { method, path_and_query: path_and_query(&path, &uri), token, content_type, body };
    let target = request.path_and_query.clone();

    match state.backend.forward(request).await {
        Ok(resp) => {
            tracing::debug!(path = %target, status = resp.status.as_u16(), "proxied backend request");
            let mut out = (resp.status, resp.body).into_response();
            if let Some(value) = resp.content_type.and_then(|ct| HeaderValue::from_str(&ct).ok()) {
                out.headers_mut().insert(header::CONTENT_TYPE, value);
            }
            out
        }
        Err(BackendError::Unreachable(e)) => {
            tracing::error!(path = %target, error = %e, "backend unreachable");
            (StatusCode::BAD_GATEWAY, "backend unreachable").into_response()
        }
        Err(e) => {
            tracing::error!(path = %target, error = %e, "proxy failed");
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
