//! Session-aware interceptor pairs for the public and protected transports.
//!
//! SYSTEM CONTEXT
//! ==============
//! Layouts install these when they mount and drop the returned handles when
//! they unmount (or before re-installing after the access token changes), so
//! exactly one hook set is live per transport at a time.

#[cfg(test)]
#[path = "hooks_test.rs"]
mod hooks_test;

use crate::navigation::{NavigationRequest, Navigator, paths};
use crate::notify::{Notification, Notifier};
use crate::store::SessionService;
use crate::transport::{AUTHORIZATION, HttpError, InterceptorHandle, Transport};

/// Request + response registrations on the protected transport.
#[must_use = "dropping the hooks unregisters them immediately"]
#[derive(Debug)]
pub struct ProtectedHooks {
    request: InterceptorHandle,
    response: InterceptorHandle,
}

impl ProtectedHooks {
    #[must_use]
    pub fn ids(&self) -> (u64, u64) {
        (self.request.id(), self.response.id())
    }

    /// Unregister both hooks.
    pub fn eject(self) {
        self.request.eject();
        self.response.eject();
    }
}

/// Attach the bearer token to every protected request and react to failed
/// responses: 401 logs out and replaces the location with sign-in, any other
/// status >= 400 raises an error notification.
pub fn install_protected_hooks<S, N, T>(transport: &Transport, session: S, navigator: N, notifier: T) -> ProtectedHooks
where
    S: SessionService + Clone + Send + Sync + 'static,
    N: Navigator + Send + Sync + 'static,
    T: Notifier + Send + Sync + 'static,
{
    let request = {
        let session = session.clone();
        transport.interceptors().on_request(move |request| {
            // Read at send time so a refreshed token is picked up.
            if let Some(token) = session.access_token() {
                request.set_header(AUTHORIZATION, format!("Bearer {token}"));
            }
        })
    };

    let response = transport.interceptors().on_error(move |error| match error.status() {
        Some(401) => {
            log::warn!("protected request unauthorized; ending session");
            session.logout();
            navigator.navigate(NavigationRequest::replace(paths::SIGN_IN));
        }
        Some(_) => notify_error(&notifier, error),
        None => {}
    });

    ProtectedHooks { request, response }
}

/// Error notifications for unauthenticated calls. Never logs out: there is no
/// session to invalidate yet.
pub fn install_public_hooks<T>(transport: &Transport, notifier: T) -> InterceptorHandle
where
    T: Notifier + Send + Sync + 'static,
{
    transport.interceptors().on_error(move |error| notify_error(&notifier, error))
}

/// Mount check for protected layouts. Without an access token the session is
/// cleared and the location replaced with sign-in; returns whether protected
/// content may render.
#[must_use]
pub fn enforce_session_on_mount<S, N>(session: &S, navigator: &N) -> bool
where
    S: SessionService + ?Sized,
    N: Navigator + ?Sized,
{
    if session.access_token().is_some() {
        return true;
    }
    session.logout();
    navigator.navigate(NavigationRequest::replace(paths::SIGN_IN));
    false
}

fn notify_error<T: Notifier + ?Sized>(notifier: &T, error: &HttpError) {
    if error.status().is_some_and(|status| status >= 400) {
        notifier.notify(Notification::error(error.message().unwrap_or_default()));
    }
}
