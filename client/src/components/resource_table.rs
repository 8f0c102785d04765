//! Generic table for backend resource collections.
//!
//! DESIGN
//! ======
//! Pages hand over pre-rendered cell strings and per-row actions; the table
//! knows nothing about the resource type, so one component serves every
//! collection.

use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<String>,
}

/// A button rendered on every row; `run` receives the row id.
#[derive(Clone)]
pub struct RowAction {
    pub label: &'static str,
    pub run: Callback<String>,
}

#[component]
pub fn ResourceTable(
    columns: &'static [&'static str],
    #[prop(into)] rows: Signal<Vec<TableRow>>,
    loading: RwSignal<bool>,
    #[prop(optional)] actions: Vec<RowAction>,
) -> impl IntoView {
    let has_actions = !actions.is_empty();
    let width = columns.len() + usize::from(has_actions);

    view! {
        <table class="resource-table">
            <thead>
                <tr>
                    {columns.iter().map(|c| view! { <th>{*c}</th> }).collect_view()}
                    {has_actions.then(|| view! { <th></th> })}
                </tr>
            </thead>
            <tbody>
                {move || {
                    if loading.get() {
                        return view! {
                            <tr>
                                <td colspan=width.to_string() class="resource-table__empty">"Loading..."</td>
                            </tr>
                        }
                            .into_any();
                    }
                    if rows.with(Vec::is_empty) {
                        return view! {
                            <tr>
                                <td colspan=width.to_string() class="resource-table__empty">"Nothing here yet."</td>
                            </tr>
                        }
                            .into_any();
                    }
                    let actions = actions.clone();
                    view! {
                        <For
                            each=move || rows.get()
                            key=|row| row.id.clone()
                            children=move |row: TableRow| {
                                let id = row.id.clone();
                                view! {
                                    <tr>
                                        {row.cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                                        {(!actions.is_empty())
                                            .then(|| {
                                                view! {
                                                    <td class="resource-table__actions">
                                                        {actions
                                                            .iter()
                                                            .map(|action| {
                                                                let run = action.run;
                                                                let id = id.clone();
                                                                view! {
                                                                    <button on:click=move |_| run.run(id.clone())>
                                                                        {action.label}
                                                                    </button>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </td>
                                                }
                                            })}
                                    </tr>
                                }
                            }
                        />
                    }
                        .into_any()
                }}
            </tbody>
        </table>
    }
}
