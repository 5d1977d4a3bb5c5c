//! Router-backed [`Navigator`] for hooks, guards and pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Transport hooks run outside any component and must be `Send + Sync`, while
//! the router's navigate function is neither. Requests are therefore parked in
//! a signal and a [`NavigationDriver`] mounted inside the `<Router>` hands them
//! to `use_navigate`.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::{NavigationRequest, Navigator};

/// Navigation sink shared through context. Only the latest unhandled request
/// is kept.
#[derive(Clone, Copy, Debug)]
pub struct SignalNavigator {
    pending: RwSignal<Option<NavigationRequest>>,
}

impl SignalNavigator {
    pub fn new() -> Self {
        Self { pending: RwSignal::new(None) }
    }

    fn take_pending(&self) -> Option<NavigationRequest> {
        self.pending.try_update_untracked(Option::take).flatten()
    }
}

impl Default for SignalNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for SignalNavigator {
    fn navigate(&self, request: NavigationRequest) {
        self.pending.set(Some(request));
    }
}

pub fn provide_navigator() -> SignalNavigator {
    let navigator = SignalNavigator::new();
    provide_context(navigator);
    navigator
}

pub fn use_navigator() -> SignalNavigator {
    expect_context::<SignalNavigator>()
}

pub(crate) fn navigate_options(request: &NavigationRequest) -> NavigateOptions {
    NavigateOptions { replace: request.replace, ..NavigateOptions::default() }
}

/// Applies parked navigation requests through the router.
#[component]
pub fn NavigationDriver() -> impl IntoView {
    let navigator = use_navigator();
    let navigate = use_navigate();
    Effect::new(move || {
        navigator.pending.track();
        if let Some(request) = navigator.take_pending() {
            navigate(&request.path, navigate_options(&request));
        }
    });
}
