//! Networking modules for the session endpoints and the backend relay.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` talks to the server's cookie-owning session routes, `api` wraps
//! `/api/v1` REST calls, and `types` defines the backend resource schema.

pub mod api;
pub mod auth;
pub mod types;
