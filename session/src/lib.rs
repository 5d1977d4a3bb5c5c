//! Authenticated-session core for the admin console.
//!
//! This crate is UI-framework agnostic so the Leptos `client` can consume it
//! directly while every rule stays testable natively: the session store and
//! its persistence decorator, the public/protected HTTP transports with their
//! interceptor registries, the route guard, and the sign-in flow.

pub mod auth;
pub mod config;
pub mod guard;
pub mod hooks;
pub mod navigation;
pub mod notify;
pub mod persist;
pub mod store;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{AuthApi, AuthenticateResponse, ConfiguredAuthApi, SignInBody, SignInFormError};
pub use config::{AuthMode, Config, ConfigError};
pub use guard::{GuardDecision, RouteAccess};
pub use hooks::{ProtectedHooks, enforce_session_on_mount, install_protected_hooks, install_public_hooks};
pub use navigation::{NavigationRequest, Navigator};
pub use notify::{Notification, Notifier};
pub use persist::{JsonPersistence, KeyValueStorage, PersistedSession, SessionPersistence};
pub use store::{MemorySession, Session, SessionService};
pub use transport::{HttpError, InterceptorHandle, Transport};
pub use types::{BackendTokens, User, UserPatch};
