//! Bearer-token capability consumed by the HTTP client.
//!
//! The dashboard and CLI read the token persisted by the session store; the
//! LIFF mini-app asks the LINE SDK. Both sit behind [`TokenSource`] so the
//! client can be exercised with a fake.

use std::sync::Arc;

use crate::storage::{ACCESS_TOKEN_KEY, KeyValueStorage};

/// Where the outbound hook gets its bearer token from.
///
/// Implementations must not fail: "no token" is a normal state.
pub trait TokenSource: Send + Sync {
    /// Whether an identity session exists at all.
    fn is_logged_in(&self) -> bool {
        self.access_token().is_some()
    }

    /// Current access token, if one is available.
    fn access_token(&self) -> Option<String>;
}

/// Reads the access token slot written by the session store.
#[derive(Clone)]
pub struct StoredTokens {
    storage: Arc<dyn KeyValueStorage>,
}

impl StoredTokens {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }
}

impl TokenSource for StoredTokens {
    fn access_token(&self) -> Option<String> {
        self.storage
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }
}

/// Always unauthenticated.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTokens;

impl TokenSource for NoTokens {
    fn is_logged_in(&self) -> bool {
        false
    }

    fn access_token(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tokens_test;
