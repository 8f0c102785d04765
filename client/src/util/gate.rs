//! Gate redirect helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components compute a gate decision reactively and hand the
//! navigation to these effects. Effects run after render, and each keeps its
//! own `RedirectLatch`, so a mounted gate navigates at most once per target
//! however often the session signal changes.

use access::{GateState, RedirectLatch};
use leptos::prelude::*;
use leptos_router::NavigateOptions;

/// Navigation options for gate redirects: replace the rejected history entry
/// so the back button does not bounce through it.
pub fn redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Navigate whenever `state` settles on a rejection.
pub fn install_gate_redirect<F>(state: Memo<GateState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let mut latch = RedirectLatch::default();
    Effect::new(move || {
        let current = state.get();
        if let Some(err) = current.mismatch() {
            log_mismatch(&err);
        }
        if let Some(target) = latch.take(&current) {
            navigate(&target, redirect_options());
        }
    });
}

/// Navigate to whatever target `target` yields, once per target.
pub fn install_target_redirect<F>(target: Memo<Option<String>>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let mut latch = RedirectLatch::default();
    Effect::new(move || {
        if let Some(path) = latch.take_target(target.get().as_deref()) {
            navigate(&path, redirect_options());
        }
    });
}

#[cfg(feature = "hydrate")]
fn log_mismatch(err: &access::AccessError) {
    log::info!("{err}; redirecting to own area");
}

#[cfg(not(feature = "hydrate"))]
fn log_mismatch(_err: &access::AccessError) {}

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;
