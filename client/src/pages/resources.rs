//! Resource list pages.
//!
//! ARCHITECTURE
//! ============
//! `ListState<R>` owns one collection's rows and notice signals and knows how
//! to load, delete and create rows through the typed REST wrappers. Each
//! page component picks its resource type and the actions its viewers get:
//! admins may delete and create, other roles only read (waiters also toggle
//! table occupancy). The backend still decides what each call may do.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use access::Role;
use leptos::prelude::*;

use crate::components::notice::{Notice, NoticeBanner};
use crate::components::resource_table::{ResourceTable, RowAction, TableRow};
use crate::net::types::{
    ApiResource, Branch, Category, PaymentMethod, PhysicalTable, Tax, UserAccount, UserBranch,
};
use crate::state::session::use_session;

pub(crate) fn table_rows<R: ApiResource>(rows: &[R]) -> Vec<TableRow> {
    rows.iter().map(|r| TableRow { id: r.id().to_owned(), cells: r.cells() }).collect()
}

pub(crate) fn validate_new_name(raw: &str) -> Result<String, &'static str> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("Enter a name first.");
    }
    if name.chars().count() > 80 {
        return Err("Names are limited to 80 characters.");
    }
    Ok(name.to_owned())
}

/// Signals backing one list page.
pub struct ListState<R: ApiResource> {
    pub rows: RwSignal<Vec<R>>,
    pub loading: RwSignal<bool>,
    pub notice: RwSignal<Option<Notice>>,
}

impl<R: ApiResource> Clone for ListState<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ApiResource> Copy for ListState<R> {}

impl<R: ApiResource> ListState<R> {
    pub fn new() -> Self {
        Self { rows: RwSignal::new(Vec::new()), loading: RwSignal::new(true), notice: RwSignal::new(None) }
    }

    /// Fetch the collection in the background.
    pub fn load(self) {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::list::<R>().await {
                Ok(rows) => self.rows.set(rows),
                Err(e) => self.notice.set(Some(Notice::error(format!("Could not load {}: {e}", R::TITLE)))),
            }
            self.loading.set(false);
        });
    }

    pub fn table_rows(self) -> Signal<Vec<TableRow>> {
        Signal::derive(move || self.rows.with(|rows| table_rows(rows)))
    }

    pub fn delete_action(self) -> RowAction {
        RowAction {
            label: "Delete",
            run: Callback::new(move |id: String| {
                #[cfg(feature = "hydrate")]
                leptos::task::spawn_local(async move {
                    match crate::net::api::delete_resource::<R>(&id).await {
                        Ok(()) => {
                            self.rows.update(|rows| rows.retain(|r| r.id() != id));
                            self.notice.set(Some(Notice::info("Deleted.")));
                        }
                        Err(e) => self.notice.set(Some(Notice::error(format!("Delete failed: {e}")))),
                    }
                });
                #[cfg(not(feature = "hydrate"))]
                let _ = id;
            }),
        }
    }

    /// POST a name-only row and append the backend's answer.
    pub fn create(self, name: String) {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_named::<R>(&name).await {
                Ok(row) => {
                    self.rows.update(|rows| rows.push(row));
                    self.notice.set(Some(Notice::info(format!("Added {name}."))));
                }
                Err(e) => self.notice.set(Some(Notice::error(format!("Create failed: {e}")))),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = name;
    }
}

impl<R: ApiResource> Default for ListState<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn is_admin() -> bool {
    use_session().with_untracked(|s| s.current_role() == Some(Role::Admin))
}

fn list_page<R: ApiResource>(state: ListState<R>, actions: Vec<RowAction>, create: bool) -> impl IntoView {
    state.load();
    view! {
        <section class="page resource-page">
            <h2>{R::TITLE}</h2>
            <NoticeBanner notice=state.notice/>
            {create.then(|| create_form(state))}
            <ResourceTable columns=R::COLUMNS rows=state.table_rows() loading=state.loading actions=actions/>
        </section>
    }
}

/// Name-only create form.
fn create_form<R: ApiResource>(state: ListState<R>) -> impl IntoView {
    let name = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match validate_new_name(&name.get_untracked()) {
            Ok(value) => {
                state.create(value);
                name.set(String::new());
            }
            Err(message) => state.notice.set(Some(Notice::error(message))),
        }
    };

    view! {
        <form class="create-form" on:submit=on_submit>
            <input
                class="create-form__input"
                type="text"
                placeholder="Name"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            <button type="submit">"Add"</button>
        </form>
    }
}

fn simple_page<R: ApiResource>(create: bool) -> impl IntoView {
    let state = ListState::<R>::new();
    let admin = is_admin();
    let actions = if admin { vec![state.delete_action()] } else { Vec::new() };
    list_page(state, actions, admin && create)
}

#[component]
pub fn BranchesPage() -> impl IntoView {
    simple_page::<Branch>(false)
}

#[component]
pub fn CategoriesPage() -> impl IntoView {
    simple_page::<Category>(true)
}

#[component]
pub fn TaxesPage() -> impl IntoView {
    simple_page::<Tax>(false)
}

#[component]
pub fn PaymentMethodsPage() -> impl IntoView {
    simple_page::<PaymentMethod>(true)
}

#[component]
pub fn UsersPage() -> impl IntoView {
    simple_page::<UserAccount>(false)
}

#[component]
pub fn UserBranchesPage() -> impl IntoView {
    simple_page::<UserBranch>(false)
}

/// Tables add an occupancy toggle for every role that can see them.
#[component]
pub fn TablesPage() -> impl IntoView {
    let state = ListState::<PhysicalTable>::new();

    let toggle = RowAction {
        label: "Toggle status",
        run: Callback::new(move |id: String| {
            let Some(next) = state.rows.with_untracked(|rows| rows.iter().find(|t| t.id == id).map(|t| t.status.toggled()))
            else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                match crate::net::api::update_table_status(&id, next).await {
                    Ok(()) => state.rows.update(|rows| {
                        if let Some(table) = rows.iter_mut().find(|t| t.id == id) {
                            table.status = next;
                        }
                    }),
                    Err(e) => state.notice.set(Some(Notice::error(format!("Update failed: {e}")))),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = next;
        }),
    };

    let mut actions = vec![toggle];
    if is_admin() {
        actions.push(state.delete_action());
    }
    list_page(state, actions, false)
}
