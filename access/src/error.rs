//! Error types for session resolution, role checks, and route-table setup.

use std::time::Duration;

use crate::role::Role;

/// Failure while resolving or establishing a session.
///
/// Resolution failures never reach the UI as errors: the store settles into
/// the unauthenticated state instead. Only an explicit `login` returns one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Bad credentials, or an expired/absent token.
    #[error("authentication failed")]
    AuthenticationFailed,
    /// The auth collaborator could not be reached or answered unexpectedly.
    #[error("network failure: {0}")]
    NetworkFailure(String),
    /// The call did not finish within the configured bound.
    #[error("session request timed out after {0:?}")]
    Timeout(Duration),
}

impl SessionError {
    /// Whether the failure is transport-level rather than a credential rejection.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::NetworkFailure(_) | Self::Timeout(_))
    }
}

/// Role-level access failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("role '{actual}' may not view the {required} area")]
    AuthorizationMismatch { required: Role, actual: Role },
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Route-table construction failures. Each variant names a configuration
/// that would leave a path without a single owner or produce a redirect loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    #[error("path '{0}' must start with '/'")]
    NotAbsolute(String),
    #[error("role '{0}' has more than one area")]
    DuplicateRole(Role),
    #[error("role '{0}' has no area")]
    MissingRole(Role),
    #[error("areas '{first}' and '{second}' overlap")]
    OverlappingAreas { first: String, second: String },
    #[error("fallback '{fallback}' lies outside the {role} area")]
    FallbackOutsideArea { role: Role, fallback: String },
    #[error("area '{0}' is not covered by any protected prefix")]
    UnprotectedArea(String),
    #[error("public root '{0}' must not be protected")]
    ProtectedPublicRoot(String),
}
