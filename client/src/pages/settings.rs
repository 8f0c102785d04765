//! Business settings editor (admin only).

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use leptos::prelude::*;

use crate::components::notice::{Notice, NoticeBanner};
use crate::net::types::BusinessSettings;

/// Trim the form values and check them before a PUT.
pub(crate) fn validate_settings(draft: &BusinessSettings) -> Result<BusinessSettings, &'static str> {
    let business_name = draft.business_name.trim().to_owned();
    if business_name.is_empty() {
        return Err("Business name is required.");
    }
    let currency = draft.currency.trim().to_ascii_uppercase();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err("Currency must be a three-letter code such as USD.");
    }
    let receipt_footer = draft
        .receipt_footer
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_owned);
    Ok(BusinessSettings { business_name, currency, tax_included: draft.tax_included, receipt_footer, updated_at: None })
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let draft = RwSignal::new(BusinessSettings::default());
    let loading = RwSignal::new(true);
    let saving = RwSignal::new(false);
    let notice = RwSignal::new(None::<Notice>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_settings().await {
            Ok(settings) => draft.set(settings),
            Err(e) => notice.set(Some(Notice::error(format!("Could not load settings: {e}")))),
        }
        loading.set(false);
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let settings = match validate_settings(&draft.get_untracked()) {
            Ok(settings) => settings,
            Err(message) => {
                notice.set(Some(Notice::error(message)));
                return;
            }
        };
        saving.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_settings(&settings).await {
                Ok(stored) => {
                    draft.set(stored);
                    notice.set(Some(Notice::info("Settings saved.")));
                }
                Err(e) => notice.set(Some(Notice::error(format!("Save failed: {e}")))),
            }
            saving.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = settings;
    };

    view! {
        <section class="page settings-page">
            <h2>"Business Settings"</h2>
            <NoticeBanner notice=notice/>
            <form class="settings-form" on:submit=on_submit>
                <label>
                    "Business name"
                    <input
                        type="text"
                        prop:value=move || draft.with(|d| d.business_name.clone())
                        on:input=move |ev| draft.update(|d| d.business_name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Currency"
                    <input
                        type="text"
                        maxlength="3"
                        prop:value=move || draft.with(|d| d.currency.clone())
                        on:input=move |ev| draft.update(|d| d.currency = event_target_value(&ev))
                    />
                </label>
                <label class="settings-form__check">
                    <input
                        type="checkbox"
                        prop:checked=move || draft.with(|d| d.tax_included)
                        on:change=move |ev| draft.update(|d| d.tax_included = event_target_checked(&ev))
                    />
                    "Prices include tax"
                </label>
                <label>
                    "Receipt footer"
                    <textarea
                        prop:value=move || draft.with(|d| d.receipt_footer.clone().unwrap_or_default())
                        on:input=move |ev| draft.update(|d| d.receipt_footer = Some(event_target_value(&ev)))
                    ></textarea>
                </label>
                <button type="submit" disabled=move || loading.get() || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
            </form>
        </section>
    }
}
