//! REST wiring for the dashboard.
//!
//! Client-side (csr): `fetch` via `gloo-net` and `localStorage` persistence.
//! Native builds (tests, tooling): an offline transport that fails every
//! request and in-memory storage, since these endpoints are only meaningful in
//! the browser.
//!
//! ERROR HANDLING
//! ==============
//! Pages show [`login_error_message`] text instead of raw error strings so a
//! bad password, an unreachable server and a backend outage read differently.

use std::sync::Arc;

use session::{ApiConfig, ApiError, HttpClient, KeyValueStorage, SessionStore, StoredTokens, Transport};

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

/// Build the dashboard's session store: bearer tokens come from the same
/// storage the store persists them to.
pub fn build_session_store(config: ApiConfig) -> SessionStore {
    let (transport, storage) = platform_io();
    let tokens = Arc::new(StoredTokens::new(storage.clone()));
    SessionStore::new(HttpClient::new(config, transport, tokens), storage)
}

#[cfg(feature = "csr")]
fn platform_io() -> (Arc<dyn Transport>, Arc<dyn KeyValueStorage>) {
    (Arc::new(session::transport::BrowserTransport), Arc::new(session::storage::BrowserStorage))
}

#[cfg(not(feature = "csr"))]
fn platform_io() -> (Arc<dyn Transport>, Arc<dyn KeyValueStorage>) {
    (Arc::new(session::OfflineTransport), Arc::new(session::MemoryStorage::new()))
}

/// User-facing text for a failed sign-in.
pub fn login_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status: 400 | 401, .. } => "Invalid email or password.".to_owned(),
        ApiError::Status { status: 429, .. } => "Too many attempts. Try again in a minute.".to_owned(),
        ApiError::Status { status, .. } if *status >= 500 => "The server is having trouble. Try again later.".to_owned(),
        ApiError::Status { .. } => err
            .message()
            .map_or_else(|| "Sign-in failed.".to_owned(), str::to_owned),
        ApiError::Transport(_) => "Cannot reach the server. Check your connection.".to_owned(),
        ApiError::Decode(_) | ApiError::Encode(_) => "Unexpected response from the server.".to_owned(),
    }
}
