//! Session store: the single source of truth for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected page reads the store; only the store's own operations
//! write it. Linking flows hand their grant to [`SessionStore::establish`]
//! instead of touching state directly. The Leptos apps mirror the store into
//! an `RwSignal` through [`SessionStore::subscribe`].
//!
//! ERROR HANDLING
//! ==============
//! - `login` failures are returned to the caller and change nothing.
//! - `logout` notification failures are logged and swallowed; local cleanup
//!   always runs.
//! - `check_auth` failures downgrade to unauthenticated, unless the
//!   credentials changed while the check was in flight; then the answer is
//!   stale and dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use wire::{LoginRequest, SessionGrant, User, paths};

use crate::error::ApiError;
use crate::http::HttpClient;
use crate::state::{self, Session, Transition};
use crate::storage::KeyValueStorage;

type Observer = Box<dyn Fn(&Session) + Send + Sync>;

/// Shared, cloneable handle to the session.
///
/// Each transition is applied under one write lock, persisted, and only then
/// published to observers, so nobody sees a half-updated session.
#[derive(Clone)]
pub struct SessionStore {
    http: HttpClient,
    storage: Arc<dyn KeyValueStorage>,
    state: Arc<RwLock<Session>>,
    /// Bumped, under the state write lock, whenever the credentials change.
    generation: Arc<AtomicU64>,
    observers: Arc<Mutex<Vec<Observer>>>,
}

impl SessionStore {
    /// Create an empty (unauthenticated) store. Call [`Self::restore`] to load
    /// the persisted snapshot.
    #[must_use]
    pub fn new(http: HttpClient, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            http,
            storage,
            state: Arc::new(RwLock::new(Session::default())),
            generation: Arc::new(AtomicU64::new(0)),
            observers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The client this store sends its requests through.
    #[must_use]
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register a callback invoked with the new session after every transition.
    ///
    /// Callbacks must not call `subscribe` themselves.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(observer));
    }

    /// Load the persisted snapshot and token slots.
    ///
    /// The result is not trusted on its own; follow with [`Self::check_auth`].
    pub fn restore(&self) -> Session {
        let restored = state::restore(self.storage.as_ref());
        self.apply(Transition::Restored(restored))
    }

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Returns the request error unchanged; the session is untouched on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let body = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let grant: SessionGrant = self.http.post(paths::LOGIN, &body).await?;
        let user = grant.user.clone();
        self.apply(Transition::Established(grant));
        log::info!("logged in as {} ({})", user.id, user.role);
        Ok(user)
    }

    /// Adopt a grant obtained elsewhere (account linking, LINE auth).
    pub fn establish(&self, grant: SessionGrant) -> Session {
        self.apply(Transition::Established(grant))
    }

    /// Notify the backend, then clear the session whatever the outcome.
    pub async fn logout(&self) {
        if let Err(e) = self.http.post_empty(paths::LOGOUT).await {
            log::warn!("logout notification failed: {e}");
        }
        self.apply(Transition::Cleared);
    }

    /// Replace the user record after an out-of-band profile edit.
    pub fn set_user(&self, user: User) -> Session {
        self.apply(Transition::UserReplaced(user))
    }

    /// Re-validate the current token with `GET /auth/me`.
    ///
    /// Returns whether the session is authenticated afterwards. Any failure
    /// resets the user and flag. An answer that arrives after a login, logout
    /// or link replaced the credentials is discarded.
    pub async fn check_auth(&self) -> bool {
        let generation = self.generation.load(Ordering::Acquire);
        let transition = match self.http.get::<User>(paths::ME).await {
            Ok(user) => Transition::Verified(user),
            Err(e) => {
                log::info!("session check failed: {e}");
                Transition::Unverified
            }
        };
        match self.commit(transition, Some(generation)) {
            Ok(next) => next.is_authenticated,
            Err(current) => {
                log::debug!("discarding session check started before the credentials changed");
                current.is_authenticated
            }
        }
    }

    fn apply(&self, transition: Transition) -> Session {
        match self.commit(transition, None) {
            Ok(next) | Err(next) => next,
        }
    }

    /// Reduce, persist and publish `transition`.
    ///
    /// With `expected` set, nothing happens unless the credentials are still
    /// those of that generation; the current session comes back as `Err`.
    fn commit(&self, transition: Transition, expected: Option<u64>) -> Result<Session, Session> {
        let next = {
            let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if expected.is_some_and(|g| g != self.generation.load(Ordering::Acquire)) {
                return Err(guard.clone());
            }
            if replaces_credentials(&transition) {
                self.generation.fetch_add(1, Ordering::AcqRel);
            }
            let next = state::reduce(&guard, &transition);
            guard.clone_from(&next);
            next
        };

        state::apply_effects(self.storage.as_ref(), &state::effects_for(&transition, &next));

        let observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        for observer in observers.iter() {
            observer(&next);
        }
        Ok(next)
    }
}

fn replaces_credentials(transition: &Transition) -> bool {
    matches!(
        transition,
        Transition::Established(_) | Transition::Cleared | Transition::Restored(_)
    )
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
