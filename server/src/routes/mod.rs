//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the session endpoints and the backend relay, stitches
//! them with Leptos SSR rendering under a single Axum router, and wraps the
//! whole thing in the edge gate so protected pages never render for an
//! anonymous request.

pub mod proxy;
pub mod session;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{any, get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::edge::edge_gate;
use crate::state::AppState;

/// Session and relay routes used by the hydrated client.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/session/login", post(session::login))
        .route("/api/session/me", get(session::me))
        .route("/api/session/logout", post(session::logout))
        .route("/api/v1/{*path}", any(proxy::proxy))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Apply the edge gate and request tracing to a fully merged router.
///
/// Layers only wrap routes that already exist, so this runs last.
pub fn gated(router: Router, state: AppState) -> Router {
    router
        .layer(middleware::from_fn_with_state(state, edge_gate))
        .layer(TraceLayer::new_for_http())
}

/// API routes + Leptos SSR + static assets, behind the edge gate.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // WASM, CSS and JS bundles from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    let router = api_routes(state.clone())
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")));
    Ok(gated(router, state))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
