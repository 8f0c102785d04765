//! Browser-side session store wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionStore` per tab, provided through context next to the
//! `RwSignal<Session>` it writes. Gates and pages subscribe to the signal;
//! only the store's `initialize`/`login`/`logout` write it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::time::Duration;

use access::{RouteTable, Session, SessionCell, SessionStore, Timer};
use leptos::prelude::*;

use crate::net::auth::ApiAuthBackend;

/// Upper bound on session resolution and login round-trips.
pub const SESSION_RESOLVE_TIMEOUT: Duration = Duration::from_secs(8);

/// `SessionCell` over a Leptos signal, so store writes re-run every gate.
#[derive(Clone, Copy)]
pub struct ReactiveSession(pub RwSignal<Session>);

impl SessionCell for ReactiveSession {
    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        self.0.with_untracked(f)
    }

    fn write(&self, f: impl FnOnce(&mut Session)) {
        self.0.update(f);
    }
}

/// Deadline source for the store. Never fires during SSR, where the store
/// is not initialized.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        #[cfg(feature = "hydrate")]
        gloo_timers::future::sleep(duration).await;
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = duration;
            std::future::pending::<()>().await;
        }
    }
}

pub type ClientSessionStore = SessionStore<ApiAuthBackend, BrowserTimer, ReactiveSession>;

/// Create the tab's session store and put it, its signal and the route
/// table into context.
pub fn provide_session(routes: RouteTable) -> Arc<ClientSessionStore> {
    let session = RwSignal::new(Session::default());
    let store = Arc::new(SessionStore::new(
        ApiAuthBackend,
        BrowserTimer,
        ReactiveSession(session),
        SESSION_RESOLVE_TIMEOUT,
    ));
    provide_context(session);
    provide_context(store.clone());
    provide_context(Arc::new(routes));
    store
}

pub fn use_session() -> RwSignal<Session> {
    expect_context::<RwSignal<Session>>()
}

pub fn use_session_store() -> Arc<ClientSessionStore> {
    expect_context::<Arc<ClientSessionStore>>()
}

pub fn use_routes() -> Arc<RouteTable> {
    expect_context::<Arc<RouteTable>>()
}
