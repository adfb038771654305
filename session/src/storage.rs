//! Durable key/value storage for tokens and the persisted session blob.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser apps persist into `localStorage`; the CLI persists into a JSON
//! file; tests use [`MemoryStorage`]. Every operation is best-effort: a write
//! that fails is dropped, and removing an absent key is a no-op.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Raw access token slot.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Raw refresh token slot.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Persisted `{user, isAuthenticated}` blob.
pub const SESSION_KEY: &str = "auth-storage";

/// String key/value store with idempotent writes and removals.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Load a JSON value stored under `key`. Missing or malformed values yield `None`.
pub fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring malformed `{key}` entry: {e}");
            None
        }
    }
}

/// Save a JSON value under `key`.
pub fn save_json<T: Serialize>(storage: &dyn KeyValueStorage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => storage.set(key, &raw),
        Err(e) => log::warn!("failed to encode `{key}` entry: {e}"),
    }
}

// =============================================================================
// IN-MEMORY
// =============================================================================

/// Process-local storage used by tests and non-browser embedders.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from `(key, value)` pairs.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self { entries: Mutex::new(map) }
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// `window.localStorage`, looked up on every call.
///
/// When no window or storage is available (private mode, SSR, workers) reads
/// return `None` and writes are dropped.
#[cfg(feature = "browser")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

#[cfg(feature = "browser")]
impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "browser")]
impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage write failed for `{key}`");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;
