//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers and middleware via the `State`
//! extractor. Everything in it is immutable after startup, so clones are
//! cheap `Arc` bumps.

use std::sync::Arc;

use access::RouteTable;

use crate::config::ServerConfig;
use crate::services::backend::Backend;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub backend: Arc<dyn Backend>,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(config: &ServerConfig, backend: Arc<dyn Backend>) -> Self {
        Self { routes: Arc::new(config.routes.clone()), backend, cookie_secure: config.cookie_secure }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;

    use access::{Credentials, Identity, Role, User};
    use axum::body::Bytes;
    use axum::http::StatusCode;

    use super::*;
    use crate::services::backend::{BackendError, ForwardRequest, ForwardResponse};

    pub const VALID_PASSWORD: &str = "secret";
    pub const VALID_TOKEN: &str = "tok-admin";

    pub fn admin_user() -> User {
        User {
            id: "u-1".to_owned(),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            role: Role::Admin,
        }
    }

    /// In-memory backend: one valid password, one valid token, and a log of
    /// forwarded requests.
    #[derive(Default)]
    pub struct MockBackend {
        pub unreachable: bool,
        pub forwarded: Mutex<Vec<ForwardRequest>>,
    }

    #[async_trait::async_trait]
    impl Backend for MockBackend {
        async fn login(&self, credentials: &Credentials) -> Result<Identity, BackendError> {
            if self.unreachable {
                return Err(BackendError::Unreachable("connection refused".to_owned()));
            }
            if credentials.password == VALID_PASSWORD {
                Ok(Identity { token: VALID_TOKEN.to_owned(), user: admin_user() })
            } else {
                Err(BackendError::Unauthorized)
            }
        }

        async fn profile(&self, token: &str) -> Result<User, BackendError> {
            if self.unreachable {
                return Err(BackendError::Unreachable("connection refused".to_owned()));
            }
            if token == VALID_TOKEN { Ok(admin_user()) } else { Err(BackendError::Unauthorized) }
        }

        async fn forward(&self, request: ForwardRequest) -> Result<ForwardResponse, BackendError> {
            if self.unreachable {
                return Err(BackendError::Unreachable("connection refused".to_owned()));
            }
            let status = if request.token.as_deref() == Some(VALID_TOKEN) { StatusCode::OK } else { StatusCode::UNAUTHORIZED };
            self.forwarded.lock().expect("forward log should lock").push(request);
            Ok(ForwardResponse {
                status,
                content_type: Some("application/json".to_owned()),
                body: Bytes::from_static(b"[]"),
            })
        }
    }

    #[must_use]
    pub fn test_app_state(backend: Arc<MockBackend>) -> AppState {
        AppState { routes: Arc::new(RouteTable::default()), backend, cookie_secure: false }
    }
}
