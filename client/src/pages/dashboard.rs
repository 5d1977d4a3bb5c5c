//! Dashboard page: the authenticated landing route.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_meta::Title;
use session::navigation::paths;
use session::{NavigationRequest, Navigator, SessionService, User};

use crate::state::auth::use_auth_store;
use crate::util::navigation::use_navigator;

fn welcome_message(user: Option<&User>) -> String {
    match user {
        Some(user) => format!("Welcome back, {}.", user.display_name()),
        None => "Welcome back.".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = use_auth_store();
    let navigator = use_navigator();

    let session = store.clone();
    let welcome = move || welcome_message(session.inner().get().user());
    let session = store.clone();
    let details = move || {
        session.inner().get().user().map(|user| {
            view! {
                <dl class="dashboard__details">
                    <dt>"E-mail"</dt>
                    <dd>{user.email.clone()}</dd>
                    <dt>"Role"</dt>
                    <dd>{user.role.clone()}</dd>
                </dl>
            }
        })
    };

    let on_logout = move |_| {
        store.logout();
        navigator.navigate(NavigationRequest::replace(paths::SIGN_IN));
    };

    view! {
        <Title text="Dashboard"/>
        <section class="dashboard">
            <h1 class="dashboard__title">"Dashboard"</h1>
            <p class="dashboard__welcome">{welcome}</p>
            {details}
            <button class="dashboard__logout" type="button" on:click=on_logout>
                "Sign out"
            </button>
        </section>
    }
}
