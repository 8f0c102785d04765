//! Login page at the public root.
//!
//! SYSTEM CONTEXT
//! ==============
//! Submits credentials through the session store. A signed-in visitor,
//! whether restored on load or just logged in, is sent to their role's area
//! by the same landing redirect, so this page never decides where to go.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use access::{Credentials, SessionError, home_redirect};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::{use_routes, use_session, use_session_store};
use crate::util::gate::install_target_redirect;

pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

pub(crate) fn login_error_message(err: &SessionError) -> String {
    match err {
        SessionError::AuthenticationFailed => "Invalid email or password.".to_owned(),
        SessionError::Timeout(_) => "The server took too long to respond. Try again.".to_owned(),
        SessionError::NetworkFailure(_) => "Could not reach the server. Check your connection and try again.".to_owned(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let routes = use_routes();
    let store = use_session_store();

    let landing = Memo::new(move |_| session.with(|s| home_redirect(s, &routes)));
    install_target_redirect(landing, use_navigate());

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = match validate_login_input(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        busy.set(true);
        error.set(None);

        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = store.login(&credentials).await {
                    error.set(Some(login_error_message(&e)));
                    password.set(String::new());
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (&store, credentials);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"POS Console"</h1>
                <p class="login-card__subtitle">"Sign in to your account"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        autocomplete="username"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}
