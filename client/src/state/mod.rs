//! Client application state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store is the only shared state. Pages fetch their own data
//! and keep it in local signals.

pub mod session;
