//! Root application component with routing and context providers.
//!
//! ROUTES
//! ======
//! `/` login, `/dashboard` landing redirect, and one `ParentRoute` per role
//! area wrapped by `RoleLayout`. Role areas are fixed by `default_areas`
//! and match the server's table whatever `EDGE_PROTECTED_PREFIXES` says:
//! that setting only widens the edge gate's protected prefixes, and a
//! table whose prefixes leave an area uncovered is refused at startup.
//! The client table keeps the default prefixes, which the layout gate
//! never consults.

use access::{Role, RouteTable};
use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{ParentRoute, Route, Router, Routes};
use leptos_router::{StaticSegment, path};

use crate::components::role_layout::RoleLayout;
use crate::pages::dashboard::DashboardPage;
use crate::pages::home::{DashboardHome, NotFound};
use crate::pages::login::LoginPage;
use crate::pages::profile::ProfilePage;
use crate::pages::resources::{
    BranchesPage, CategoriesPage, PaymentMethodsPage, TablesPage, TaxesPage, UserBranchesPage, UsersPage,
};
use crate::pages::settings::SettingsPage;
use crate::state::session::provide_session;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Creates the tab's session store and starts resolving the session once
/// hydrated. Every gate below reads the same store through context.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let store = provide_session(RouteTable::default());
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move { store.initialize().await });
    #[cfg(not(feature = "hydrate"))]
    let _ = store;

    view! {
        <Stylesheet id="leptos" href="/pkg/pos-console.css"/>
        <Title text="POS Console"/>

        <Router>
            <Routes fallback=|| view! { <NotFound/> }>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route path=path!("/dashboard") view=DashboardHome/>
                <ParentRoute path=path!("/dashboard/admin") view=|| view! { <RoleLayout role=Role::Admin/> }>
                    <Route path=StaticSegment("") view=|| view! { <DashboardPage role=Role::Admin/> }/>
                    <Route path=StaticSegment("branches") view=BranchesPage/>
                    <Route path=StaticSegment("categories") view=CategoriesPage/>
                    <Route path=StaticSegment("taxes") view=TaxesPage/>
                    <Route path=StaticSegment("payment-methods") view=PaymentMethodsPage/>
                    <Route path=StaticSegment("tables") view=TablesPage/>
                    <Route path=StaticSegment("users") view=UsersPage/>
                    <Route path=StaticSegment("user-branches") view=UserBranchesPage/>
                    <Route path=StaticSegment("settings") view=SettingsPage/>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                </ParentRoute>
                <ParentRoute path=path!("/dashboard/cashier") view=|| view! { <RoleLayout role=Role::Cashier/> }>
                    <Route path=StaticSegment("") view=|| view! { <DashboardPage role=Role::Cashier/> }/>
                    <Route path=StaticSegment("payment-methods") view=PaymentMethodsPage/>
                    <Route path=StaticSegment("taxes") view=TaxesPage/>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                </ParentRoute>
                <ParentRoute path=path!("/dashboard/waiter") view=|| view! { <RoleLayout role=Role::Waiter/> }>
                    <Route path=StaticSegment("") view=|| view! { <DashboardPage role=Role::Waiter/> }/>
                    <Route path=StaticSegment("tables") view=TablesPage/>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
