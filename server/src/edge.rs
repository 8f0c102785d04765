//! Edge gate middleware.
//!
//! SYSTEM CONTEXT
//! ==============
//! Layered over every route so an anonymous request for a protected page is
//! bounced to the public root before the SSR shell renders. Only cookie
//! presence is checked; the layout gate in the client and the backend API do
//! the role checks.

use access::{EdgeDecision, SESSION_COOKIE, evaluate_edge};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::state::AppState;

pub async fn edge_gate(State(state): State<AppState>, jar: CookieJar, req: Request, next: Next) -> Response {
    let token = jar.get(SESSION_COOKIE).map(Cookie::value);
    match evaluate_edge(&state.routes, req.uri().path(), token) {
        EdgeDecision::Allow => next.run(req).await,
        EdgeDecision::Redirect(target) => {
            tracing::debug!(path = %req.uri().path(), %target, "edge gate redirect");
            Redirect::temporary(&target).into_response()
        }
    }
}

#[cfg(test)]
#[path = "edge_test.rs"]
mod tests;
