//! # client
//!
//! Leptos frontend for the POS console: login, role-gated layouts, dashboards
//! and resource screens. Server-rendered by the `server` crate and hydrated in
//! the browser, where the session store resolves the signed-in user.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
