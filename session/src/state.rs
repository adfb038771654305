//! Session value, transitions and the persistence effects they imply.
//!
//! DESIGN
//! ======
//! [`reduce`] is pure: it maps the current session and one [`Transition`] to
//! the next session. [`effects_for`] derives the storage writes for the same
//! transition, and [`apply_effects`] performs them. Keeping the two steps
//! apart lets tests check state changes and persistence independently.
//!
//! `is_authenticated` is a stored flag rather than `user.is_some()`, because
//! replacing the user must not change it. Every transition upholds
//! `is_authenticated ⇒ user.is_some()`, and [`restore`] re-checks that on
//! load.

use serde::{Deserialize, Serialize};
use wire::{Role, SessionGrant, User};

use crate::storage::{self, ACCESS_TOKEN_KEY, KeyValueStorage, REFRESH_TOKEN_KEY, SESSION_KEY};

/// Who the current user is and whether they are authenticated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_authenticated: bool,
}

impl Session {
    /// Role of the authenticated user; `None` when unauthenticated.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        if !self.is_authenticated {
            return None;
        }
        self.user.as_ref().map(|u| u.role)
    }
}

/// Durable subset of a session. Tokens are stored in their own slots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl From<&Session> for PersistedSession {
    fn from(session: &Session) -> Self {
        Self { user: session.user.clone(), is_authenticated: session.is_authenticated }
    }
}

/// One atomic change to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Login or linking produced a full grant.
    Established(SessionGrant),
    /// `/auth/me` confirmed the current token.
    Verified(User),
    /// Out-of-band profile edit; tokens and flag are untouched.
    UserReplaced(User),
    /// `/auth/me` failed; fail closed.
    Unverified,
    /// Logout.
    Cleared,
    /// Loaded from durable storage at startup.
    Restored(Session),
}

/// Apply one transition.
#[must_use]
pub fn reduce(session: &Session, transition: &Transition) -> Session {
    match transition {
        Transition::Established(grant) => Session {
            user: Some(grant.user.clone()),
            access_token: Some(grant.access_token.clone()),
            refresh_token: Some(grant.refresh_token.clone()),
            is_authenticated: true,
        },
        Transition::Verified(user) => Session { user: Some(user.clone()), is_authenticated: true, ..session.clone() },
        Transition::UserReplaced(user) => Session { user: Some(user.clone()), ..session.clone() },
        Transition::Unverified => Session { user: None, is_authenticated: false, ..session.clone() },
        Transition::Cleared => Session::default(),
        Transition::Restored(restored) => {
            let mut next = restored.clone();
            next.is_authenticated = next.is_authenticated && next.user.is_some();
            next
        }
    }
}

// =============================================================================
// PERSISTENCE EFFECTS
// =============================================================================

/// A single durable-storage side effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageEffect {
    Set { key: &'static str, value: String },
    Remove(&'static str),
}

/// Storage effects implied by `transition`, given the session it produced.
///
/// Every transition except [`Transition::Restored`] rewrites the snapshot blob;
/// only grants write tokens and only logout removes them.
#[must_use]
pub fn effects_for(transition: &Transition, next: &Session) -> Vec<StorageEffect> {
    let mut effects = Vec::new();
    match transition {
        Transition::Restored(_) => return effects,
        Transition::Established(grant) => {
            effects.push(StorageEffect::Set { key: ACCESS_TOKEN_KEY, value: grant.access_token.clone() });
            effects.push(StorageEffect::Set { key: REFRESH_TOKEN_KEY, value: grant.refresh_token.clone() });
        }
        Transition::Cleared => {
            effects.push(StorageEffect::Remove(ACCESS_TOKEN_KEY));
            effects.push(StorageEffect::Remove(REFRESH_TOKEN_KEY));
        }
        Transition::Verified(_) | Transition::UserReplaced(_) | Transition::Unverified => {}
    }

    match serde_json::to_string(&PersistedSession::from(next)) {
        Ok(value) => effects.push(StorageEffect::Set { key: SESSION_KEY, value }),
        Err(e) => log::warn!("failed to encode session snapshot: {e}"),
    }
    effects
}

/// Perform storage effects in order.
pub fn apply_effects(storage: &dyn KeyValueStorage, effects: &[StorageEffect]) {
    for effect in effects {
        match effect {
            StorageEffect::Set { key, value } => storage.set(key, value),
            StorageEffect::Remove(key) => storage.remove(key),
        }
    }
}

/// Read the persisted snapshot and token slots.
///
/// A missing or corrupt snapshot restores as unauthenticated; tokens are read
/// regardless so the next `/auth/me` check can still use them.
#[must_use]
pub fn restore(storage: &dyn KeyValueStorage) -> Session {
    let persisted: PersistedSession = storage::load_json(storage, SESSION_KEY).unwrap_or_default();
    let is_authenticated = persisted.is_authenticated && persisted.user.is_some();
    Session {
        user: persisted.user,
        access_token: storage.get(ACCESS_TOKEN_KEY),
        refresh_token: storage.get(REFRESH_TOKEN_KEY),
        is_authenticated,
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;
