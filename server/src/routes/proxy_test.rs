use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, Uri, header};
use tower::ServiceExt;

use super::*;
use crate::routes::api_routes;
use crate::state::test_helpers::{MockBackend, VALID_TOKEN, test_app_state};

#[test]
fn path_and_query_keeps_query_string() {
    let uri: Uri = "/api/v1/branches?page=2&q=north".parse().unwrap();
    assert_eq!(path_and_query("branches", &uri), "branches?page=2&q=north");
}

#[test]
fn path_and_query_without_query() {
    let uri: Uri = "/api/v1/taxes/3".parse().unwrap();
    assert_eq!(path_and_query("taxes/3", &uri), "taxes/3");
}

#[test]
fn relay_path_rejects_dot_segments_and_backslashes() {
    assert!(is_relay_path("branches"));
    assert!(is_relay_path("tables/12/status"));
    assert!(is_relay_path("files/report..csv"));
    assert!(!is_relay_path(".."));
    assert!(!is_relay_path("../admin"));
    assert!(!is_relay_path("users/../../auth/login"));
    assert!(!is_relay_path("./users"));
    assert!(!is_relay_path("users\\..\\admin"));
}

#[tokio::test]
async fn proxy_rejects_encoded_traversal_without_forwarding() {
    let backend = Arc::new(MockBackend::default());
    let app = api_routes(test_app_state(backend.clone()));

    for uri in ["/api/v1/%2e%2e/internal", "/api/v1/users/%2E%2E/%2e%2e/auth/login", "/api/v1/a/../b"] {
        let req = Request::builder()
            .uri(uri)
            .header(header::COOKIE, format!("session_token={VALID_TOKEN}"))
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
    assert!(backend.forwarded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn proxy_attaches_bearer_token_from_cookie() {
    let backend = Arc::new(MockBackend::default());
    let app = api_routes(test_app_state(backend.clone()));

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/categories?active=1")
        .header(header::COOKIE, format!("session_token={VALID_TOKEN}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Drinks"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"[]");

    let forwarded = backend.forwarded.lock().unwrap();
    assert_eq!(forwarded.len(), 1);
    let sent = &forwarded[0];
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.path_and_query, "categories?active=1");
    assert_eq!(sent.token.as_deref(), Some(VALID_TOKEN));
    assert_eq!(sent.content_type.as_deref(), Some("application/json"));
    assert_eq!(&sent.body[..], br#"{"name":"Drinks"}"#);
}

#[tokio::test]
async fn proxy_relays_backend_status_untouched() {
    let backend = Arc::new(MockBackend::default());
    let app = api_routes(test_app_state(backend.clone()));

    let req = Request::builder().uri("/api/v1/users").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(backend.forwarded.lock().unwrap()[0].token.is_none());
}

#[tokio::test]
async fn proxy_reports_unreachable_backend_as_bad_gateway() {
    let backend = Arc::new(MockBackend { unreachable: true, ..MockBackend::default() });
    let app = api_routes(test_app_state(backend));

    let req = Request::builder().uri("/api/v1/branches").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}
