//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the role-gated chrome (layout gate, navigation shell)
//! and the shared list and notice primitives that pages compose.

pub mod nav_shell;
pub mod notice;
pub mod resource_table;
pub mod role_layout;
