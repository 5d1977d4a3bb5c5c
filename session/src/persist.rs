//! Durable session snapshots and the persisting service decorator.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build stores the session in `localStorage` under [`STORE_KEY`]
//! so a reload restores it without signing in again. Storage access sits
//! behind [`KeyValueStorage`]; the snapshot is wrapped in a versioned envelope
//! `{ "state": { "user", "backendTokens" }, "version": 0 }`.
//!
//! ERROR HANDLING
//! ==============
//! `login`/`logout` cannot fail, so write failures are logged and dropped.
//! Unreadable snapshots are discarded and the session starts empty.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::store::{Session, SessionService};

/// Storage key holding the persisted session.
pub const STORE_KEY: &str = "authStore";

/// Envelope version written by this build.
pub const STORE_VERSION: u32 = 0;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage operation failed: {0}")]
    Storage(String),
    #[error("malformed session snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported session snapshot version {0}")]
    UnsupportedVersion(u32),
}

/// String key-value storage with `localStorage` semantics.
pub trait KeyValueStorage {
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// # Errors
    ///
    /// Returns an error when the backing store rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistError>;

    /// # Errors
    ///
    /// Returns an error when the backing store rejects the removal.
    fn remove_item(&self, key: &str) -> Result<(), PersistError>;
}

/// Process-local storage used by tests and the server-side render pass.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStorage {
    /// Number of `set_item`/`remove_item` calls so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.items.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), PersistError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.items.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
        Ok(())
    }
}

/// Where a [`PersistedSession`] reads and writes snapshots.
pub trait SessionPersistence {
    /// Load the last saved snapshot, `None` if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns an error when storage fails or the snapshot cannot be decoded.
    fn load(&self) -> Result<Option<Session>, PersistError>;

    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be encoded or stored.
    fn save(&self, session: &Session) -> Result<(), PersistError>;
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

/// JSON snapshots in a [`KeyValueStorage`] under a fixed key.
#[derive(Clone, Debug)]
pub struct JsonPersistence<K> {
    storage: K,
    key: String,
}

impl<K: KeyValueStorage> JsonPersistence<K> {
    /// Persistence under the default [`STORE_KEY`].
    pub fn new(storage: K) -> Self {
        Self::with_key(storage, STORE_KEY)
    }

    pub fn with_key(storage: K, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }
}

impl<K: KeyValueStorage> SessionPersistence for JsonPersistence<K> {
    fn load(&self) -> Result<Option<Session>, PersistError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(None);
        };
        let envelope: Envelope<Session> = serde_json::from_str(&raw)?;
        if envelope.version != STORE_VERSION {
            return Err(PersistError::UnsupportedVersion(envelope.version));
        }
        Ok(Some(envelope.state))
    }

    fn save(&self, session: &Session) -> Result<(), PersistError> {
        let raw = serde_json::to_string(&Envelope { state: session, version: STORE_VERSION })?;
        self.storage.set_item(&self.key, &raw)
    }
}

/// Decorator that writes a snapshot after every applied transition of `S`.
#[derive(Clone, Debug)]
pub struct PersistedSession<S, P> {
    inner: S,
    persistence: P,
}

impl<S: SessionService, P: SessionPersistence> PersistedSession<S, P> {
    /// Wrap `inner` without touching storage.
    pub fn new(inner: S, persistence: P) -> Self {
        Self { inner, persistence }
    }

    /// Wrap `inner` after loading the last persisted snapshot into it.
    pub fn restore(inner: S, persistence: P) -> Self {
        let session = Self::new(inner, persistence);
        session.reload();
        session
    }

    /// Load the last persisted snapshot into the inner service without
    /// writing it back. Leaves the state alone when nothing usable is stored.
    pub fn reload(&self) {
        match self.persistence.load() {
            Ok(Some(session)) => {
                log::debug!("restored session (authenticated: {})", session.is_authenticated());
                self.inner.replace(session);
            }
            Ok(None) => {}
            Err(e) => log::warn!("discarding persisted session: {e}"),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.inner.snapshot()) {
            log::warn!("session persistence failed: {e}");
        }
    }
}

impl<S: SessionService, P: SessionPersistence> SessionService for PersistedSession<S, P> {
    fn snapshot(&self) -> Session {
        self.inner.snapshot()
    }

    fn replace(&self, next: Session) {
        self.inner.replace(next);
        self.persist();
    }
}
