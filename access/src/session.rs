//! Session store: the single owner of the browser's authentication state.
//!
//! ARCHITECTURE
//! ============
//! The store is generic over three seams so the same lifecycle code runs in
//! the browser and in tests:
//! - `AuthBackend` talks to whatever holds the credential (the console
//!   server's `/api/session/*` endpoints in the browser).
//! - `Timer` bounds every backend call; a timeout counts as a failure.
//! - `SessionCell` holds the `Session` value. The browser wraps a reactive
//!   signal so gates re-render on change; plain callers use a `Mutex`.
//!
//! Only `initialize`, `login` and `logout` write to the cell. Gates read it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::future::Future;
use std::pin::pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use futures::future::{Either, select};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::role::Role;

/// Signed-in staff member as reported by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "crate::wire::deserialize_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Result of a successful restore or login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub token: String,
    pub user: User,
}

/// Login form payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// SESSION VALUE
// =============================================================================

/// Current authentication state.
///
/// A fresh session is loading: no gate may act on it until the first
/// resolution attempt completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self { token: None, user: None, loading: true }
    }
}

impl Session {
    /// A resolved, authenticated session.
    #[must_use]
    pub fn signed_in(identity: Identity) -> Self {
        Self { token: Some(identity.token), user: Some(identity.user), loading: false }
    }

    /// A resolved session with nobody signed in.
    #[must_use]
    pub fn signed_out() -> Self {
        Self { token: None, user: None, loading: false }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn current_role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn establish(&mut self, identity: Identity) {
        self.token = Some(identity.token);
        self.user = Some(identity.user);
        self.loading = false;
    }

    /// Resolution finished without a credential. A login that landed while
    /// resolution was in flight is kept.
    fn settle(&mut self) {
        self.loading = false;
    }

    fn clear(&mut self) {
        self.token = None;
        self.user = None;
        self.loading = false;
    }
}

// =============================================================================
// SEAMS
// =============================================================================

/// Storage for the single `Session` value.
pub trait SessionCell {
    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R;
    fn write(&self, f: impl FnOnce(&mut Session));
}

impl SessionCell for Mutex<Session> {
    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        let guard = self.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write(&self, f: impl FnOnce(&mut Session)) {
        let mut guard = self.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}

/// External collaborator that resolves and exchanges credentials.
pub trait AuthBackend {
    /// Resolve a persisted credential. `Ok(None)` means nobody is signed in.
    fn restore(&self) -> impl Future<Output = Result<Option<Identity>, SessionError>>;

    /// Exchange credentials for an identity and persist the credential.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<Identity, SessionError>>;

    /// Drop the persisted credential.
    fn logout(&self) -> impl Future<Output = Result<(), SessionError>>;
}

/// Sleep primitive used to bound backend calls.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

// =============================================================================
// STORE
// =============================================================================

/// Owns the session lifecycle. One instance per browser tab, shared through
/// context with every gate and page that needs it.
pub struct SessionStore<B, T, C = Mutex<Session>> {
    backend: B,
    timer: T,
    cell: C,
    timeout: Duration,
    initialized: AtomicBool,
    /// Bumped by every `login` and `logout`. A restore that started under an
    /// older generation must not overwrite what they wrote.
    generation: AtomicU64,
}

impl<B, T, C> SessionStore<B, T, C>
where
    B: AuthBackend,
    T: Timer,
    C: SessionCell,
{
    pub fn new(backend: B, timer: T, cell: C, timeout: Duration) -> Self {
        Self {
            backend,
            timer,
            cell,
            timeout,
            initialized: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    /// The cell holding the session value.
    pub fn cell(&self) -> &C {
        &self.cell
    }

    /// Resolve any persisted credential. Runs at most once per store; the
    /// loading flag is cleared however resolution ends. A `login` or
    /// `logout` that completes while resolution is in flight wins.
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::AcqRel) {
            tracing::debug!("session store already initialized");
            return;
        }

        let started = self.generation.load(Ordering::Acquire);
        match self.bounded(self.backend.restore()).await {
            Ok(Some(_)) if self.generation.load(Ordering::Acquire) != started => {
                tracing::debug!("session changed during resolution; keeping it");
                self.cell.write(Session::settle);
            }
            Ok(Some(identity)) => {
                tracing::info!(user_id = %identity.user.id, role = %identity.user.role, "session restored");
                self.cell.write(|s| s.establish(identity));
            }
            Ok(None) => {
                tracing::debug!("no persisted credential");
                self.cell.write(Session::settle);
            }
            Err(e) => {
                tracing::warn!(error = %e, "session resolution failed; continuing signed out");
                self.cell.write(Session::settle);
            }
        }
    }

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AuthenticationFailed`] for rejected
    /// credentials and a network or timeout error when the backend cannot
    /// answer. The session is left untouched on error.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, SessionError> {
        let identity = self
            .bounded(self.backend.login(credentials))
            .await
            .inspect_err(|e| tracing::warn!(email = %credentials.email, error = %e, "login failed"))?;

        tracing::info!(user_id = %identity.user.id, role = %identity.user.role, "login succeeded");
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.cell.write(|s| s.establish(identity));
        Ok(self.snapshot())
    }

    /// Sign out. Local state is cleared before the backend is asked to drop
    /// the persisted credential, so no gate sees a stale identity.
    pub async fn logout(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.cell.write(Session::clear);
        if let Err(e) = self.bounded(self.backend.logout()).await {
            tracing::warn!(error = %e, "backend logout failed; credential may persist until it expires");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.cell.read(Session::is_authenticated)
    }

    pub fn is_loading(&self) -> bool {
        self.cell.read(Session::is_loading)
    }

    pub fn current_user(&self) -> Option<User> {
        self.cell.read(|s| s.current_user().cloned())
    }

    pub fn current_role(&self) -> Option<Role> {
        self.cell.read(Session::current_role)
    }

    pub fn snapshot(&self) -> Session {
        self.cell.read(Session::clone)
    }

    async fn bounded<O>(&self, work: impl Future<Output = Result<O, SessionError>>) -> Result<O, SessionError> {
        let work = pin!(work);
        let deadline = pin!(self.timer.sleep(self.timeout));
        match select(work, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(SessionError::Timeout(self.timeout)),
        }
    }
}
