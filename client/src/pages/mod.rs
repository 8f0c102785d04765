//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Pages under a role area only mount once the layout gate
//! has authorized the session.

pub mod dashboard;
pub mod home;
pub mod login;
pub mod profile;
pub mod resources;
pub mod settings;
