//! Route guard wrapping protected pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Re-evaluates on every session or location change. Unauthenticated visitors
//! are sent to sign-in with the requested path in `?from=`; users whose role is
//! not allowed are sent to the dashboard. Nothing is decided before the
//! persisted session has been restored.

#[cfg(test)]
#[path = "protected_route_test.rs"]
mod protected_route_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use session::guard::evaluate;
use session::{GuardDecision, Navigator, RouteAccess};

use crate::state::auth::use_auth_store;
use crate::util::navigation::use_navigator;

/// Path plus query string, as recorded in `?from=`.
fn requested_path(pathname: &str, search: &str) -> String {
    let query = search.trim_start_matches('?');
    if query.is_empty() {
        pathname.to_owned()
    } else {
        format!("{pathname}?{query}")
    }
}

#[component]
pub fn ProtectedRoute(
    /// Roles admitted to the children; omitted means any signed-in user.
    #[prop(optional)]
    allowed_roles: Option<Vec<String>>,
    children: ChildrenFn,
) -> impl IntoView {
    let store = use_auth_store();
    let navigator = use_navigator();
    let location = use_location();
    let (pathname, search) = (location.pathname, location.search);

    let access = match allowed_roles {
        Some(roles) => RouteAccess::for_roles(roles),
        None => RouteAccess::protected(),
    };

    let decision = Memo::new(move |_| {
        let session = store.inner();
        if !session.is_restored() {
            return None;
        }
        let requested = requested_path(&pathname.get(), &search.get());
        Some(evaluate(&access, &session.get(), &requested))
    });

    Effect::new(move || {
        if let Some(GuardDecision::Redirect(request)) = decision.get() {
            leptos::logging::log!("route guard redirect to {}", request.path);
            navigator.navigate(request);
        }
    });

    view! {
        <Show when=move || matches!(decision.get(), Some(GuardDecision::Render))>
            {children()}
        </Show>
    }
}
