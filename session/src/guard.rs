//! Route access rules evaluated on every navigation into a guarded subtree.
//!
//! DESIGN
//! ======
//! The decision is a pure function of the route's requirement, the current
//! session snapshot and the requested path; rendering or redirecting is left
//! to the caller so the rules stay testable without a router.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::navigation::{NavigationRequest, paths, sign_in_redirect};
use crate::store::Session;

/// Static access requirement of a route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RouteAccess {
    #[default]
    Public,
    /// Requires a session; `allowed_roles: None` admits any role.
    Protected { allowed_roles: Option<Vec<String>> },
}

impl RouteAccess {
    #[must_use]
    pub fn protected() -> Self {
        Self::Protected { allowed_roles: None }
    }

    pub fn for_roles<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self::Protected { allowed_roles: Some(roles.into_iter().map(Into::into).collect()) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(NavigationRequest),
}

/// Whether `role` passes an optional allowed-role set. `None` means no
/// restriction.
#[must_use]
pub fn role_permitted(allowed: Option<&[String]>, role: &str) -> bool {
    allowed.map_or(true, |roles| roles.iter().any(|r| r == role))
}

/// Decide whether `requested` may render for `session`.
#[must_use]
pub fn evaluate(access: &RouteAccess, session: &Session, requested: &str) -> GuardDecision {
    let RouteAccess::Protected { allowed_roles } = access else {
        return GuardDecision::Render;
    };
    let Some(user) = session.user() else {
        return GuardDecision::Redirect(sign_in_redirect(requested));
    };
    if role_permitted(allowed_roles.as_deref(), &user.role) {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(NavigationRequest::replace(paths::DASHBOARD))
    }
}
