//! Role-based access gating shared by the POS console `server` and `client`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Requests for protected pages pass two checks. The edge gate (`edge`) runs
//! in the server before anything is rendered and only looks for the session
//! cookie. The layout gate (`gate`) runs inside each role's page tree once the
//! session store (`session`) has resolved the signed-in user, and compares
//! roles. Both read the same `RouteTable`, so the two layers can never
//! disagree about which paths belong to which role.
//!
//! Neither check is an authorization boundary: the backend API enforces role
//! permissions on every request it serves.

pub mod edge;
pub mod error;
pub mod gate;
pub mod role;
pub mod routes;
pub mod session;
pub mod wire;

pub use edge::{EdgeDecision, evaluate_edge};
pub use error::{AccessError, RouteTableError, SessionError};
pub use gate::{GateState, LayoutGate, RedirectLatch, home_redirect};
pub use role::Role;
pub use routes::{RoleArea, RouteTable};
pub use session::{AuthBackend, Credentials, Identity, Session, SessionCell, SessionStore, Timer, User};

/// Name of the cookie carrying the bearer token.
pub const SESSION_COOKIE: &str = "session_token";
