//! Browser `localStorage` adapter for the session snapshot.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes the hydrate-only web-sys glue behind the session crate's
//! [`KeyValueStorage`] trait. During server rendering there is no browser
//! storage: reads find nothing and writes report [`PersistError::Unavailable`].

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::KeyValueStorage;
use session::persist::PersistError;

/// Handle to `window.localStorage`, looked up on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, PersistError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(PersistError::Unavailable)
}

#[cfg(feature = "hydrate")]
fn js_error(value: &wasm_bindgen::JsValue) -> PersistError {
    PersistError::Storage(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.set_item(key, value).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(PersistError::Unavailable)
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), PersistError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.remove_item(key).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(PersistError::Unavailable)
        }
    }
}
