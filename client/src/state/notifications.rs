//! Transient toast notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! Transport hooks report failed calls through [`SignalNotifier`]; the
//! `Toaster` component renders the list and each toast dismisses itself after
//! [`TOAST_TTL_MS`].

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use leptos::prelude::*;
use session::{Notification, Notifier};

pub const TOAST_TTL_MS: u32 = 5_000;
/// Older toasts are dropped beyond this many.
pub const MAX_TOASTS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Append a toast and return its id.
    pub fn push(&mut self, notification: Notification) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, notification });
        if self.toasts.len() > MAX_TOASTS {
            let overflow = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SignalNotifier {
    state: RwSignal<ToastState>,
}

impl SignalNotifier {
    pub fn new() -> Self {
        Self { state: RwSignal::new(ToastState::default()) }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.state.with(|s| s.toasts.clone())
    }

    pub fn dismiss(&self, id: u64) {
        self.state.update(|s| s.dismiss(id));
    }
}

impl Default for SignalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for SignalNotifier {
    fn notify(&self, notification: Notification) {
        let mut id = 0;
        self.state.update(|s| id = s.push(notification));

        #[cfg(feature = "hydrate")]
        {
            let notifier = *self;
            gloo_timers::callback::Timeout::new(TOAST_TTL_MS, move || notifier.dismiss(id)).forget();
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    }
}

pub fn provide_notifier() -> SignalNotifier {
    let notifier = SignalNotifier::new();
    provide_context(notifier);
    notifier
}

pub fn use_notifier() -> SignalNotifier {
    expect_context::<SignalNotifier>()
}
