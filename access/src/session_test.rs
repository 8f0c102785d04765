use super::*;
use futures::channel::oneshot;
use futures::executor::block_on;
use std::sync::atomic::AtomicUsize;

// =============================================================================
// HELPERS
// =============================================================================

fn cashier() -> Identity {
    Identity {
        token: "tok-cashier".to_owned(),
        user: User {
            id: "u-7".to_owned(),
            name: "Carla".to_owned(),
            email: "carla@example.com".to_owned(),
            role: Role::Cashier,
        },
    }
}

fn waiter() -> Identity {
    Identity {
        token: "tok-waiter".to_owned(),
        user: User {
            id: "u-3".to_owned(),
            name: "Wes".to_owned(),
            email: "wes@example.com".to_owned(),
            role: Role::Waiter,
        },
    }
}

fn credentials(password: &str) -> Credentials {
    Credentials { email: "carla@example.com".to_owned(), password: password.to_owned() }
}

#[derive(Clone)]
enum Restore {
    Stored(Identity),
    Nothing,
    Fail(SessionError),
    Hang,
}

struct MockBackend {
    restore: Restore,
    network_down: bool,
    logout_fails: bool,
    restore_calls: AtomicUsize,
    logout_calls: AtomicUsize,
    /// When set, `restore` waits for this signal before answering.
    release: Mutex<Option<oneshot::Receiver<()>>>,
}

impl MockBackend {
    fn new(restore: Restore) -> Self {
        Self {
            restore,
            network_down: false,
            logout_fails: false,
            restore_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            release: Mutex::new(None),
        }
    }
}

impl AuthBackend for MockBackend {
    async fn restore(&self) -> Result<Option<Identity>, SessionError> {
        self.restore_calls.fetch_add(1, Ordering::SeqCst);
        let release = self.release.lock().unwrap().take();
        if let Some(release) = release {
            let _ = release.await;
        }
        match self.restore.clone() {
            Restore::Stored(identity) => Ok(Some(identity)),
            Restore::Nothing => Ok(None),
            Restore::Fail(e) => Err(e),
            Restore::Hang => std::future::pending().await,
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<Identity, SessionError> {
        if self.network_down {
            return Err(SessionError::NetworkFailure("connection refused".to_owned()));
        }
        if credentials.password == "secret" { Ok(cashier()) } else { Err(SessionError::AuthenticationFailed) }
    }

    async fn logout(&self) -> Result<(), SessionError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if self.logout_fails { Err(SessionError::NetworkFailure("offline".to_owned())) } else { Ok(()) }
    }
}

/// Never fires; backend calls always win.
struct NeverTimer;

impl Timer for NeverTimer {
    fn sleep(&self, _duration: Duration) -> impl Future<Output = ()> {
        std::future::pending()
    }
}

/// Fires immediately; only already-ready backend calls win.
struct ExpiredTimer;

impl Timer for ExpiredTimer {
    fn sleep(&self, _duration: Duration) -> impl Future<Output = ()> {
        std::future::ready(())
    }
}

fn store(backend: MockBackend) -> SessionStore<MockBackend, NeverTimer> {
    SessionStore::new(backend, NeverTimer, Mutex::new(Session::default()), Duration::from_secs(8))
}

// =============================================================================
// SESSION VALUE
// =============================================================================

#[test]
fn fresh_session_is_loading_and_signed_out() {
    let session = Session::default();
    assert!(session.is_loading());
    assert!(!session.is_authenticated());
    assert!(session.current_user().is_none());
    assert!(session.current_role().is_none());
}

#[test]
fn authenticated_requires_user_and_token() {
    let mut session = Session::signed_in(cashier());
    assert!(session.is_authenticated());
    session.token = None;
    assert!(!session.is_authenticated());
    session.token = Some(String::new());
    assert!(!session.is_authenticated());
}

#[test]
fn settle_keeps_identity_established_meanwhile() {
    let mut session = Session::default();
    session.establish(cashier());
    session.settle();
    assert!(session.is_authenticated());
    assert!(!session.is_loading());
}

#[test]
fn credentials_debug_redacts_password() {
    let rendered = format!("{:?}", credentials("hunter2"));
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("carla@example.com"));
}

#[test]
fn user_accepts_numeric_id() {
    let user: User =
        serde_json::from_str(r#"{"id":42,"name":"Ann","email":"ann@example.com","role":"ADMIN"}"#).unwrap();
    assert_eq!(user.id, "42");
    assert_eq!(user.role, Role::Admin);
}

// =============================================================================
// initialize
// =============================================================================

#[test]
fn new_store_reports_loading() {
    let store = store(MockBackend::new(Restore::Nothing));
    assert!(store.is_loading());
    assert!(!store.is_authenticated());
}

#[test]
fn initialize_restores_stored_identity() {
    let store = store(MockBackend::new(Restore::Stored(cashier())));
    block_on(store.initialize());
    assert!(!store.is_loading());
    assert!(store.is_authenticated());
    assert_eq!(store.current_role(), Some(Role::Cashier));
    assert_eq!(store.current_user().map(|u| u.name), Some("Carla".to_owned()));
    assert_eq!(store.snapshot().token(), Some("tok-cashier"));
}

#[test]
fn initialize_without_credential_settles_signed_out() {
    let store = store(MockBackend::new(Restore::Nothing));
    block_on(store.initialize());
    assert!(!store.is_loading());
    assert!(!store.is_authenticated());
}

#[test]
fn initialize_network_failure_settles_signed_out() {
    let store = store(MockBackend::new(Restore::Fail(SessionError::NetworkFailure("dns".to_owned()))));
    block_on(store.initialize());
    assert!(!store.is_loading());
    assert!(!store.is_authenticated());
}

#[test]
fn initialize_expired_token_settles_signed_out() {
    let store = store(MockBackend::new(Restore::Fail(SessionError::AuthenticationFailed)));
    block_on(store.initialize());
    assert_eq!(store.snapshot(), Session::signed_out());
}

#[test]
fn initialize_timeout_settles_signed_out() {
    let store = SessionStore::new(
        MockBackend::new(Restore::Hang),
        ExpiredTimer,
        Mutex::new(Session::default()),
        Duration::from_millis(10),
    );
    block_on(store.initialize());
    assert!(!store.is_loading());
    assert!(!store.is_authenticated());
}

#[test]
fn initialize_runs_backend_once() {
    let store = store(MockBackend::new(Restore::Stored(cashier())));
    block_on(store.initialize());
    block_on(store.initialize());
    assert_eq!(store.backend.restore_calls.load(Ordering::SeqCst), 1);
    assert!(store.is_authenticated());
}

#[test]
fn login_during_resolution_is_not_overwritten_by_late_restore() {
    let (release, gate) = oneshot::channel();
    let backend = MockBackend::new(Restore::Stored(waiter()));
    *backend.release.lock().unwrap() = Some(gate);
    let store = store(backend);
    let store = &store;

    block_on(async {
        let sign_in = async move {
            store.login(&credentials("secret")).await.unwrap();
            release.send(()).unwrap();
        };
        futures::join!(store.initialize(), sign_in);
    });

    assert_eq!(store.current_role(), Some(Role::Cashier));
    assert_eq!(store.snapshot().token(), Some("tok-cashier"));
    assert!(!store.is_loading());
}

#[test]
fn logout_during_resolution_stays_signed_out() {
    let (release, gate) = oneshot::channel();
    let backend = MockBackend::new(Restore::Stored(cashier()));
    *backend.release.lock().unwrap() = Some(gate);
    let store = store(backend);
    let store = &store;

    block_on(async {
        let sign_out = async move {
            store.logout().await;
            release.send(()).unwrap();
        };
        futures::join!(store.initialize(), sign_out);
    });

    assert!(!store.is_authenticated());
    assert!(!store.is_loading());
    assert!(store.current_user().is_none());
}

// =============================================================================
// login
// =============================================================================

#[test]
fn login_with_valid_credentials_populates_session() {
    let store = store(MockBackend::new(Restore::Nothing));
    block_on(store.initialize());

    let session = block_on(store.login(&credentials("secret"))).unwrap();
    assert!(session.is_authenticated());
    assert_eq!(session.current_role(), Some(Role::Cashier));
    assert_eq!(session.token(), Some("tok-cashier"));
    assert_eq!(store.snapshot(), session);
}

#[test]
fn login_with_invalid_credentials_leaves_session_untouched() {
    let store = store(MockBackend::new(Restore::Nothing));
    block_on(store.initialize());
    let before = store.snapshot();

    let err = block_on(store.login(&credentials("wrong"))).unwrap_err();
    assert_eq!(err, SessionError::AuthenticationFailed);
    assert!(!err.is_network());
    assert_eq!(store.snapshot(), before);
    assert!(store.snapshot().token().is_none());
}

#[test]
fn login_network_failure_is_reported_as_network() {
    let mut backend = MockBackend::new(Restore::Nothing);
    backend.network_down = true;
    let store = store(backend);
    block_on(store.initialize());

    let err = block_on(store.login(&credentials("secret"))).unwrap_err();
    assert!(err.is_network());
    assert!(!store.is_authenticated());
}

#[test]
fn login_before_initialize_clears_loading() {
    let store = store(MockBackend::new(Restore::Nothing));
    block_on(store.login(&credentials("secret"))).unwrap();
    assert!(!store.is_loading());
    assert!(store.is_authenticated());
}

// =============================================================================
// logout
// =============================================================================

#[test]
fn logout_clears_identity_and_persisted_credential() {
    let store = store(MockBackend::new(Restore::Stored(cashier())));
    block_on(store.initialize());

    block_on(store.logout());
    assert_eq!(store.snapshot(), Session::signed_out());
    assert_eq!(store.backend.logout_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn logout_clears_locally_even_when_backend_fails() {
    let mut backend = MockBackend::new(Restore::Stored(cashier()));
    backend.logout_fails = true;
    let store = store(backend);
    block_on(store.initialize());

    block_on(store.logout());
    assert!(!store.is_authenticated());
    assert!(store.current_user().is_none());
}
