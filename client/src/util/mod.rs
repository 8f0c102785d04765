//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep navigation side effects out of page and component
//! rendering.

pub mod gate;
