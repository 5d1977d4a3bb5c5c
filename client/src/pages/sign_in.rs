//! Sign-in page: email + password form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered inside `AuthLayout`, whose public-transport hook turns rejected
//! calls into toasts. On success the session is stored and the user lands on
//! the path recorded in `?from=` (or the dashboard).

#[cfg(test)]
#[path = "sign_in_test.rs"]
mod sign_in_test;

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_query_map;
use session::SignInFormError;
use session::auth::validate_sign_in;
use session::navigation::FROM_PARAM;

use crate::net::api::use_transports;
use crate::state::auth::use_auth_store;
use crate::util::navigation::use_navigator;

fn password_input_type(visible: bool) -> &'static str {
    if visible { "text" } else { "password" }
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let store = use_auth_store();
    let navigator = use_navigator();
    let transports = use_transports();
    let query = use_query_map();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let errors = RwSignal::new(SignInFormError::default());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let body = match validate_sign_in(&email.get_untracked(), &password.get_untracked()) {
            Ok(body) => body,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };
        errors.set(SignInFormError::default());
        busy.set(true);
        let from = query.with_untracked(|q| q.get(FROM_PARAM));

        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            let api = transports.auth.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = session::auth::sign_in(&api, &store, &navigator, &body, from.as_deref()).await {
                    leptos::logging::warn!("sign-in failed: {e}");
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (body, from, &store, &transports, navigator);
        }
    };

    view! {
        <Title text="Sign In"/>
        <div class="sign-in">
            <h1 class="sign-in__title">"Admin Console"</h1>
            <form class="sign-in__form" on:submit=on_submit novalidate=true>
                <label class="sign-in__label" for="sign-in-email">"E-mail"</label>
                <input
                    id="sign-in-email"
                    class="sign-in__input"
                    type="email"
                    autocomplete="username"
                    placeholder="youremail@email.com"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <Show when=move || errors.get().email.is_some()>
                    <p class="sign-in__error">{move || errors.get().email.unwrap_or_default()}</p>
                </Show>

                <label class="sign-in__label" for="sign-in-password">"Password"</label>
                <div class="sign-in__password">
                    <input
                        id="sign-in-password"
                        class="sign-in__input"
                        type=move || password_input_type(show_password.get())
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button
                        class="sign-in__reveal"
                        type="button"
                        aria-label=move || if show_password.get() { "Hide password" } else { "Show password" }
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || if show_password.get() { "Hide" } else { "Show" }}
                    </button>
                </div>
                <Show when=move || errors.get().password.is_some()>
                    <p class="sign-in__error">{move || errors.get().password.unwrap_or_default()}</p>
                </Show>

                <button class="sign-in__submit" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
        </div>
    }
}
