//! Profile screen shared by every role.
//!
//! Shows the session's user immediately and upgrades to the backend's full
//! profile once it loads.

use leptos::prelude::*;

use crate::components::notice::{Notice, NoticeBanner};
use crate::net::types::{UserProfile, format_date};
use crate::state::session::use_session;

fn profile_from_session(user: &access::User) -> UserProfile {
    UserProfile {
        id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
        phone: None,
        created_at: None,
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session();
    let profile = RwSignal::new(session.with_untracked(|s| s.current_user().map(profile_from_session)));
    let notice = RwSignal::new(None::<Notice>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_profile().await {
            Ok(loaded) => profile.set(Some(loaded)),
            Err(e) => notice.set(Some(Notice::error(format!("Could not load full profile: {e}")))),
        }
    });

    view! {
        <section class="page profile-page">
            <h2>"Profile"</h2>
            <NoticeBanner notice=notice/>
            {move || {
                profile
                    .get()
                    .map(|p| {
                        view! {
                            <dl class="profile">
                                <dt>"Name"</dt>
                                <dd>{p.name}</dd>
                                <dt>"Email"</dt>
                                <dd>{p.email}</dd>
                                <dt>"Role"</dt>
                                <dd>{p.role.label()}</dd>
                                <dt>"Phone"</dt>
                                <dd>{p.phone.unwrap_or_default()}</dd>
                                <dt>"Member since"</dt>
                                <dd>{format_date(p.created_at.as_deref())}</dd>
                            </dl>
                        }
                    })
            }}
        </section>
    }
}
