//! Bare `/dashboard` landing and the not-found screen.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use access::{RouteTable, Session, home_redirect};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::session::{use_routes, use_session};
use crate::util::gate::install_target_redirect;

/// Where `/dashboard` sends a resolved session: its role's area, or the
/// public root when nobody is signed in. `None` while still loading.
pub(crate) fn dashboard_home_target(session: &Session, table: &RouteTable) -> Option<String> {
    if session.is_loading() {
        return None;
    }
    Some(home_redirect(session, table).unwrap_or_else(|| table.public_root().to_owned()))
}

#[component]
pub fn DashboardHome() -> impl IntoView {
    let session = use_session();
    let routes = use_routes();
    let target = Memo::new(move |_| session.with(|s| dashboard_home_target(s, &routes)));
    install_target_redirect(target, use_navigate());

    view! { <div class="gate-placeholder" aria-busy="true">"Loading your dashboard..."</div> }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"Page not found"</h1>
            <A href="/">"Back to sign in"</A>
        </div>
    }
}
