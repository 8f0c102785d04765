//! Role dashboards.
//!
//! SYSTEM CONTEXT
//! ==============
//! Index route of every role area. Admins get the backend's aggregate
//! statistics; cashiers and waiters get a greeting and shortcuts into the
//! screens their role can open.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use access::Role;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::nav_shell::nav_items;
use crate::components::notice::{Notice, NoticeBanner};
use crate::net::types::DashboardStats;
use crate::state::session::{use_routes, use_session};

pub(crate) fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Label/value pairs shown as stat cards.
pub(crate) fn stat_cards(stats: &DashboardStats) -> Vec<(&'static str, String)> {
    vec![
        ("Sales", format_amount(stats.total_sales)),
        ("Orders today", stats.orders_today.to_string()),
        ("Active tables", stats.active_tables.to_string()),
        ("Branches", stats.total_branches.to_string()),
        ("Users", stats.total_users.to_string()),
    ]
}

pub(crate) fn greeting(name: &str, role: Role) -> String {
    if name.is_empty() { format!("Welcome, {}", role.label()) } else { format!("Welcome, {name}") }
}

#[component]
pub fn DashboardPage(role: Role) -> impl IntoView {
    let session = use_session();
    let name = move || session.with(|s| s.current_user().map(|u| u.name.clone()).unwrap_or_default());

    view! {
        <section class="page dashboard">
            <h2>{move || greeting(&name(), role)}</h2>
            {match role {
                Role::Admin => view! { <AdminStats/> }.into_any(),
                Role::Cashier | Role::Waiter => view! { <Shortcuts role=role/> }.into_any(),
            }}
        </section>
    }
}

#[component]
fn AdminStats() -> impl IntoView {
    let stats = RwSignal::new(None::<DashboardStats>);
    let notice = RwSignal::new(None::<Notice>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_dashboard_stats().await {
            Ok(loaded) => stats.set(Some(loaded)),
            Err(e) => notice.set(Some(Notice::error(format!("Could not load statistics: {e}")))),
        }
    });

    view! {
        <NoticeBanner notice=notice/>
        <div class="stat-grid">
            {move || {
                stats
                    .get()
                    .map(|s| {
                        stat_cards(&s)
                            .into_iter()
                            .map(|(label, value)| {
                                view! {
                                    <div class="stat-card">
                                        <span class="stat-card__label">{label}</span>
                                        <span class="stat-card__value">{value}</span>
                                    </div>
                                }
                            })
                            .collect_view()
                    })
            }}
        </div>
    }
}

#[component]
fn Shortcuts(role: Role) -> impl IntoView {
    let prefix = use_routes().area(role).map(|area| area.prefix.clone()).unwrap_or_default();
    let links = nav_items(role, &prefix).into_iter().skip(1).collect::<Vec<_>>();

    view! {
        <ul class="shortcut-list">
            {links
                .into_iter()
                .map(|item| {
                    view! {
                        <li>
                            <A href=item.href>{item.label}</A>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}
