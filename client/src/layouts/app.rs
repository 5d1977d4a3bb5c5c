//! Layout for authenticated pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the protected transport's hooks for as long as it is mounted. Hooks
//! are re-installed whenever the access token changes, with the previous set
//! ejected first, and ejected for good on unmount. Nested routes render only
//! once the hooks are live; without a token the session is cleared, the user
//! is sent to sign-in and the outlet stays closed.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_router::components::Outlet;
use session::{
    Navigator, Notifier, ProtectedHooks, SessionService, Transport, enforce_session_on_mount, install_protected_hooks,
};

use crate::net::api::use_transports;
use crate::state::auth::use_auth_store;
use crate::state::notifications::use_notifier;
use crate::util::navigation::use_navigator;

type HookSlot = StoredValue<Option<ProtectedHooks>>;

fn eject_hooks(slot: HookSlot) {
    if let Some(previous) = slot.try_update_value(Option::take).flatten() {
        previous.eject();
    }
}

/// Ejects the current hook set and, when the mount check passes, installs a
/// fresh one. Returns whether the outlet may render.
fn sync_protected_hooks<S, N, T>(slot: HookSlot, transport: &Transport, session: &S, navigator: N, notifier: T) -> bool
where
    S: SessionService + Clone + Send + Sync + 'static,
    N: Navigator + Send + Sync + 'static,
    T: Notifier + Send + Sync + 'static,
{
    eject_hooks(slot);
    if !enforce_session_on_mount(session, &navigator) {
        return false;
    }
    let installed = install_protected_hooks(transport, session.clone(), navigator, notifier);
    leptos::logging::log!("protected hooks installed: {:?}", installed.ids());
    slot.set_value(Some(installed));
    true
}

#[component]
pub fn AppLayout() -> impl IntoView {
    let store = use_auth_store();
    let navigator = use_navigator();
    let notifier = use_notifier();
    let transports = use_transports();

    let hooks: HookSlot = StoredValue::new(None);
    let hooks_ready = RwSignal::new(false);

    let session = store.clone();
    Effect::new(move || {
        if !session.inner().is_restored() {
            return;
        }
        // Re-run on every token change.
        let _ = session.inner().access_token_tracked();
        let ready = sync_protected_hooks(hooks, &transports.protected, &session, navigator, notifier);
        hooks_ready.set(ready);
    });

    on_cleanup(move || eject_hooks(hooks));

    view! {
        <div class="app-layout">
            <header class="app-layout__header">
                <a class="app-layout__brand" href="/dashboard">"Admin Console"</a>
                <UserBadge/>
            </header>
            <main class="app-layout__main">
                <Show when=move || hooks_ready.get()>
                    <Outlet/>
                </Show>
            </main>
        </div>
    }
}

#[component]
fn UserBadge() -> impl IntoView {
    let store = use_auth_store();
    let label = move || store.inner().get().user().map(|u| format!("{} ({})", u.display_name(), u.role));
    view! { <span class="app-layout__user">{label}</span> }
}
