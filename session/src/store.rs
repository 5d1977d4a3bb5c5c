//! Session state and the service interface all readers and writers use.
//!
//! DESIGN
//! ======
//! `Session` holds the user and the token pair as a single optional value, so
//! a user without tokens (or tokens without a user) cannot be represented.
//! Transitions are pure methods that return the next state; a
//! [`SessionService`] only decides where that state lives. Mutations are
//! whole-state replacements, so readers never observe a half-applied login.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::types::{BackendTokens, User, UserPatch};

/// The user and tokens of a logged-in session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Authenticated {
    pub user: User,
    pub tokens: BackendTokens,
}

/// Snapshot of the current session: either empty or fully authenticated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord", into = "SessionRecord")]
pub struct Session {
    auth: Option<Authenticated>,
}

impl Session {
    /// An unauthenticated session.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The state produced by a login with `user` and `tokens`.
    #[must_use]
    pub fn logged_in(user: User, tokens: BackendTokens) -> Self {
        Self { auth: Some(Authenticated { user, tokens }) }
    }

    /// The session with `patch` merged into the user, or `None` when there is
    /// no user to update.
    #[must_use]
    pub fn with_user_patch(&self, patch: UserPatch) -> Option<Self> {
        let mut auth = self.auth.clone()?;
        auth.user.apply(patch);
        Some(Self { auth: Some(auth) })
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.auth.as_ref().map(|auth| &auth.user)
    }

    #[must_use]
    pub fn tokens(&self) -> Option<&BackendTokens> {
        self.auth.as_ref().map(|auth| &auth.tokens)
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.tokens().map(|tokens| tokens.access_token.as_str())
    }

    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.user().map(|user| user.role.as_str())
    }
}

/// Serialized shape of a [`Session`]: `{ "user": ..., "backendTokens": ... }`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    backend_tokens: Option<BackendTokens>,
}

/// A stored record carried a user without tokens or tokens without a user.
#[derive(Debug, thiserror::Error)]
#[error("session record must hold both user and tokens or neither")]
pub struct InconsistentSession;

impl TryFrom<SessionRecord> for Session {
    type Error = InconsistentSession;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        match (record.user, record.backend_tokens) {
            (Some(user), Some(tokens)) => Ok(Self::logged_in(user, tokens)),
            (None, None) => Ok(Self::empty()),
            _ => Err(InconsistentSession),
        }
    }
}

impl From<Session> for SessionRecord {
    fn from(session: Session) -> Self {
        match session.auth {
            Some(Authenticated { user, tokens }) => Self { user: Some(user), backend_tokens: Some(tokens) },
            None => Self { user: None, backend_tokens: None },
        }
    }
}

/// Injectable session service shared by interceptors, guards and pages.
///
/// Implementors provide storage (`snapshot` + `replace`); the mutators are
/// expressed through the pure transitions on [`Session`].
pub trait SessionService {
    /// Current state, cloned so callers never hold a borrow across awaits.
    fn snapshot(&self) -> Session;

    /// Swap in `next` as the whole session state.
    fn replace(&self, next: Session);

    fn login(&self, user: User, tokens: BackendTokens) {
        self.replace(Session::logged_in(user, tokens));
    }

    fn logout(&self) {
        self.replace(Session::empty());
    }

    /// Merge `patch` into the current user. Returns `false` (and leaves the
    /// state untouched) when nobody is logged in.
    fn update_user(&self, patch: UserPatch) -> bool {
        match self.snapshot().with_user_patch(patch) {
            Some(next) => {
                self.replace(next);
                true
            }
            None => false,
        }
    }

    fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }

    fn access_token(&self) -> Option<String> {
        self.snapshot().access_token().map(str::to_owned)
    }
}

/// In-process session, shared by cloning.
#[derive(Clone, Debug, Default)]
pub struct MemorySession {
    state: Arc<Mutex<Session>>,
}

impl MemorySession {
    #[must_use]
    pub fn new(initial: Session) -> Self {
        Self { state: Arc::new(Mutex::new(initial)) }
    }
}

impl SessionService for MemorySession {
    fn snapshot(&self) -> Session {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn replace(&self, next: Session) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}
