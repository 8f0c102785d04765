use super::*;
use access::Role;

#[test]
fn decode_login_accepts_token_field() {
    let body = br#"{"token":"abc","user":{"id":"1","name":"Ann","email":"ann@example.com","role":"admin"}}"#;
    let identity = decode_login(body).unwrap();
    assert_eq!(identity.token, "abc");
    assert_eq!(identity.user.role, Role::Admin);
}

#[test]
fn decode_login_accepts_access_token_alias() {
    let body = br#"{"access_token":"xyz","user":{"id":9,"name":"Bo","email":"bo@example.com","role":"WAITER"}}"#;
    let identity = decode_login(body).unwrap();
    assert_eq!(identity.token, "xyz");
    assert_eq!(identity.user.id, "9");
    assert_eq!(identity.user.role, Role::Waiter);
}

#[test]
fn decode_login_rejects_empty_token() {
    let body = br#"{"token":"  ","user":{"id":"1","name":"Ann","email":"ann@example.com","role":"admin"}}"#;
    assert!(matches!(decode_login(body), Err(BackendError::Decode(_))));
}

#[test]
fn decode_login_rejects_unknown_role() {
    let body = br#"{"token":"abc","user":{"id":"1","name":"Ann","email":"ann@example.com","role":"owner"}}"#;
    assert!(matches!(decode_login(body), Err(BackendError::Decode(_))));
}

#[test]
fn decode_profile_accepts_bare_and_wrapped_user() {
    let bare = br#"{"id":"1","name":"Ann","email":"ann@example.com","role":"cashier"}"#;
    let wrapped = br#"{"user":{"id":"1","name":"Ann","email":"ann@example.com","role":"cashier"}}"#;
    assert_eq!(decode_profile(bare).unwrap(), decode_profile(wrapped).unwrap());
}

#[test]
fn auth_status_error_maps_rejections_to_unauthorized() {
    for status in [StatusCode::BAD_REQUEST, StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
        assert!(matches!(auth_status_error(status), Some(BackendError::Unauthorized)));
    }
}

#[test]
fn auth_status_error_maps_server_errors_to_upstream() {
    assert!(matches!(auth_status_error(StatusCode::BAD_GATEWAY), Some(BackendError::Upstream(502))));
    assert!(auth_status_error(StatusCode::OK).is_none());
}

#[test]
fn join_url_normalizes_slashes() {
    assert_eq!(join_url("http://api/", "/branches?page=2"), "http://api/branches?page=2");
    assert_eq!(join_url("http://api", "auth/login"), "http://api/auth/login");
}
