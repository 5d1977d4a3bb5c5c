//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by layouts, route guards and pages to read the session reactively and
//! to log in or out. Transitions go through the session crate's
//! [`SessionService`] rules; every applied transition is written to
//! `localStorage`.
//!
//! DESIGN
//! ======
//! The server renders with an empty session and `restored == false`. The
//! persisted snapshot is loaded by an effect after hydration, so the first
//! client render matches the server markup and guards wait for `restored`
//! before deciding anything.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use session::{JsonPersistence, PersistedSession, Session, SessionService};

use crate::util::storage::BrowserStorage;

/// [`SessionService`] over a reactive signal.
#[derive(Clone, Copy, Debug)]
pub struct SignalSession {
    state: RwSignal<Session>,
    restored: RwSignal<bool>,
}

impl SignalSession {
    pub fn new() -> Self {
        Self { state: RwSignal::new(Session::empty()), restored: RwSignal::new(false) }
    }

    /// Tracked read of the whole session.
    pub fn get(&self) -> Session {
        self.state.get()
    }

    /// Tracked read of the access token.
    pub fn access_token_tracked(&self) -> Option<String> {
        self.state.with(|s| s.access_token().map(str::to_owned))
    }

    /// Whether the persisted snapshot has been loaded (tracked).
    pub fn is_restored(&self) -> bool {
        self.restored.get()
    }

    fn mark_restored(&self) {
        self.restored.set(true);
    }
}

impl Default for SignalSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionService for SignalSession {
    fn snapshot(&self) -> Session {
        self.state.get_untracked()
    }

    /// Unchanged states are not written, so effects that log out on an empty
    /// session do not retrigger themselves.
    fn replace(&self, next: Session) {
        if self.state.with_untracked(|current| *current != next) {
            self.state.set(next);
        }
    }
}

/// Session service provided to the app: reactive and persisted.
pub type AuthStore = PersistedSession<SignalSession, JsonPersistence<BrowserStorage>>;

/// Create the store, provide it as context and schedule the post-hydration
/// restore from `localStorage`.
pub fn provide_auth_store() -> AuthStore {
    let store = PersistedSession::new(SignalSession::new(), JsonPersistence::new(BrowserStorage));
    provide_context(store.clone());

    let restoring = store.clone();
    Effect::new(move || {
        restoring.reload();
        restoring.inner().mark_restored();
    });
    store
}

pub fn use_auth_store() -> AuthStore {
    expect_context::<AuthStore>()
}
