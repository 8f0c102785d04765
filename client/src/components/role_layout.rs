//! Layout gate component wrapping each role's page tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once per role area by the router. It derives a `GateState` from
//! the session signal and the route table, renders the navigation shell only
//! when `Authorized`, and leaves navigation to an effect so nothing redirects
//! during render or while the session is still resolving.

use access::{GateState, LayoutGate, Role};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::nav_shell::NavShell;
use crate::state::session::{use_routes, use_session};
use crate::util::gate::install_gate_redirect;

/// Placeholder copy for non-authorized states.
pub(crate) fn placeholder_message(state: &GateState) -> &'static str {
    match state {
        GateState::Pending => "Checking your session...",
        GateState::Unauthorized { .. } => "Sign in to continue. Redirecting...",
        GateState::WrongRole { .. } => "Taking you to your dashboard...",
        GateState::Authorized => "",
    }
}

#[component]
pub fn RoleLayout(role: Role) -> impl IntoView {
    let session = use_session();
    let routes = use_routes();
    let gate = LayoutGate::new(role);
    let state = Memo::new(move |_| session.with(|s| gate.evaluate(s, &routes)));

    install_gate_redirect(state, use_navigate());

    view! {
        <Show
            when=move || state.with(GateState::is_authorized)
            fallback=move || {
                view! {
                    <div class="gate-placeholder" aria-busy="true">
                        {move || state.with(placeholder_message)}
                    </div>
                }
            }
        >
            <NavShell role=role/>
        </Show>
    }
}

#[cfg(test)]
#[path = "role_layout_test.rs"]
mod role_layout_test;
