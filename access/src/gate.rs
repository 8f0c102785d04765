//! Layout gate: the role check run inside each role's page tree.
//!
//! DESIGN
//! ======
//! The gate is a pure function of the session and the route table, so it
//! can be re-evaluated on every render. Navigation is kept out of it: the UI
//! runs `RedirectLatch::take` from an effect after render, and the latch
//! guarantees one navigation per target per mount.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use crate::error::AccessError;
use crate::role::Role;
use crate::routes::RouteTable;
use crate::session::Session;

/// Where a mounted layout stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateState {
    /// Session still resolving. Show a placeholder, never navigate.
    Pending,
    /// Resolved with nobody signed in.
    Unauthorized { redirect: String },
    /// Signed in, but the layout belongs to another role.
    WrongRole { required: Role, actual: Role, redirect: String },
    /// Render the page tree.
    Authorized,
}

impl GateState {
    /// Navigation target for terminal rejection states.
    #[must_use]
    pub fn redirect(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { redirect } | Self::WrongRole { redirect, .. } => Some(redirect),
            Self::Pending | Self::Authorized => None,
        }
    }

    #[must_use]
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }

    /// Role mismatch as an error value, for logging.
    #[must_use]
    pub fn mismatch(&self) -> Option<AccessError> {
        match self {
            Self::WrongRole { required, actual, .. } => {
                Some(AccessError::AuthorizationMismatch { required: *required, actual: *actual })
            }
            _ => None,
        }
    }
}

/// Gate configured for one role area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutGate {
    required: Role,
}

impl LayoutGate {
    #[must_use]
    pub fn new(required: Role) -> Self {
        Self { required }
    }

    #[must_use]
    pub fn required(&self) -> Role {
        self.required
    }

    /// Classify `session` against this gate.
    ///
    /// A user whose role is in the wrong area goes to their own role's
    /// fallback, never to this layout's.
    #[must_use]
    pub fn evaluate(&self, session: &Session, table: &RouteTable) -> GateState {
        if session.is_loading() {
            return GateState::Pending;
        }

        let unauthorized = || GateState::Unauthorized { redirect: table.public_root().to_owned() };

        if !session.is_authenticated() {
            return unauthorized();
        }
        let Some(actual) = session.current_role() else {
            return unauthorized();
        };
        if actual == self.required {
            return GateState::Authorized;
        }

        match table.fallback_for(actual) {
            Some(fallback) => GateState::WrongRole { required: self.required, actual, redirect: fallback.to_owned() },
            None => unauthorized(),
        }
    }
}

/// Landing check for public entry points (the login page, bare
/// `/dashboard`): an authenticated session is sent to its role's area.
#[must_use]
pub fn home_redirect(session: &Session, table: &RouteTable) -> Option<String> {
    if session.is_loading() || !session.is_authenticated() {
        return None;
    }
    session
        .current_role()
        .and_then(|role| table.fallback_for(role))
        .map(str::to_owned)
}

/// Remembers the last navigation issued by one mounted gate so repeated
/// evaluations of the same state navigate once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedirectLatch {
    last: Option<String>,
}

impl RedirectLatch {
    /// Return the target to navigate to, or `None` if there is nothing to do
    /// or this target was already issued.
    pub fn take(&mut self, state: &GateState) -> Option<String> {
        self.take_target(state.redirect())
    }

    /// Same as [`take`](Self::take) for a bare optional target.
    pub fn take_target(&mut self, target: Option<&str>) -> Option<String> {
        let target = target?;
        if self.last.as_deref() == Some(target) {
            return None;
        }
        self.last = Some(target.to_owned());
        Some(target.to_owned())
    }
}
