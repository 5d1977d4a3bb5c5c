//! Layout for the sign-in screen.
//!
//! Installs the public transport's error hook while mounted. Failed calls
//! raise a toast; nothing here logs out.

use leptos::prelude::*;
use leptos_router::components::Outlet;
use session::{InterceptorHandle, install_public_hooks};

use crate::net::api::use_transports;
use crate::state::notifications::use_notifier;

#[component]
pub fn AuthLayout() -> impl IntoView {
    let notifier = use_notifier();
    let transports = use_transports();

    let hook = StoredValue::new(Some(install_public_hooks(&transports.public, notifier)));
    on_cleanup(move || {
        if let Some(Some(handle)) = hook.try_update_value(Option::<InterceptorHandle>::take) {
            handle.eject();
        }
    });

    view! {
        <div class="auth-layout">
            <section class="auth-layout__content">
                <Outlet/>
            </section>
            <aside class="auth-layout__art"></aside>
        </div>
    }
}
