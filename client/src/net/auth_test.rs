use super::*;

#[test]
fn session_endpoints_live_under_api_session() {
    for endpoint in [LOGIN_ENDPOINT, ME_ENDPOINT, LOGOUT_ENDPOINT] {
        assert!(endpoint.starts_with("/api/session/"), "{endpoint}");
    }
}

#[test]
fn rejection_statuses_are_authentication_failures() {
    for status in [400, 401, 403] {
        assert_eq!(status_error(status), SessionError::AuthenticationFailed);
    }
}

#[test]
fn gateway_statuses_are_network_failures() {
    let err = status_error(502);
    assert!(err.is_network());
    assert_eq!(err, SessionError::NetworkFailure("session endpoint responded with status 502".to_owned()));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn server_side_restore_fails_fast() {
    let result = futures::executor::block_on(ApiAuthBackend.restore());
    assert!(matches!(result, Err(SessionError::NetworkFailure(_))));
}
