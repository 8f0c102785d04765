//! Navigation shell for an authorized role area.

use access::Role;
use leptos::prelude::*;
use leptos_router::components::{A, Outlet};

use crate::state::session::{use_routes, use_session, use_session_store};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: String,
}

/// Page slugs under a role's area, in menu order. The empty slug is the
/// area's dashboard.
pub fn nav_slugs(role: Role) -> &'static [(&'static str, &'static str)] {
    match role {
        Role::Admin => &[
            ("Dashboard", ""),
            ("Branches", "branches"),
            ("Categories", "categories"),
            ("Taxes", "taxes"),
            ("Payment Methods", "payment-methods"),
            ("Tables", "tables"),
            ("Users", "users"),
            ("User Branches", "user-branches"),
            ("Settings", "settings"),
            ("Profile", "profile"),
        ],
        Role::Cashier => &[
            ("Dashboard", ""),
            ("Payment Methods", "payment-methods"),
            ("Taxes", "taxes"),
            ("Profile", "profile"),
        ],
        Role::Waiter => &[("Dashboard", ""), ("Tables", "tables"), ("Profile", "profile")],
    }
}

/// Menu entries for `role`, rooted at its area prefix.
pub fn nav_items(role: Role, prefix: &str) -> Vec<NavItem> {
    let prefix = prefix.trim_end_matches('/');
    nav_slugs(role)
        .iter()
        .map(|&(label, slug)| NavItem {
            label,
            href: if slug.is_empty() { prefix.to_owned() } else { format!("{prefix}/{slug}") },
        })
        .collect()
}

#[component]
pub fn NavShell(role: Role) -> impl IntoView {
    let session = use_session();
    let store = use_session_store();
    let prefix = use_routes().area(role).map(|area| area.prefix.clone()).unwrap_or_default();
    let items = nav_items(role, &prefix);
    let signing_out = RwSignal::new(false);

    let user_name = move || session.with(|s| s.current_user().map(|u| u.name.clone()).unwrap_or_default());

    let on_logout = move |_| {
        if signing_out.get_untracked() {
            return;
        }
        signing_out.set(true);
        // Clearing the session flips the layout gate to Unauthorized, which
        // performs the redirect.
        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            leptos::task::spawn_local(async move { store.logout().await });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = &store;
    };

    view! {
        <div class="shell">
            <aside class="shell__nav">
                <div class="shell__brand">"POS Console"</div>
                <div class="shell__role">{role.label()}</div>
                <ul class="shell__links">
                    {items
                        .into_iter()
                        .map(|item| {
                            view! {
                                <li class="shell__link">
                                    <A href=item.href>{item.label}</A>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <div class="shell__user">{user_name}</div>
                <button class="shell__logout" on:click=on_logout disabled=move || signing_out.get()>
                    "Log out"
                </button>
            </aside>
            <main class="shell__content">
                <Outlet/>
            </main>
        </div>
    }
}

#[cfg(test)]
#[path = "nav_shell_test.rs"]
mod nav_shell_test;
