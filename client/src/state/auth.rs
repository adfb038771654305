//! Auth-session context for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard and user-aware components to coordinate login
//! redirects and identity-dependent rendering. Components read the
//! `RwSignal<Session>`; they change it only by calling store operations.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use session::{Session, SessionStore};
use wire::User;

/// Load the persisted session, mirror every store transition into a signal,
/// and provide both the store and the signal as context.
pub fn provide_session(store: SessionStore) -> RwSignal<Session> {
    let session = mirror_session(&store);
    provide_context(store);
    provide_context(session);
    session
}

/// Restore `store` and return a signal that tracks it.
pub fn mirror_session(store: &SessionStore) -> RwSignal<Session> {
    let session = RwSignal::new(store.restore());
    store.subscribe(move |next| {
        let _ = session.try_set(next.clone());
    });
    session
}

/// The authenticated user, if any.
pub fn current_user(session: &Session) -> Option<&User> {
    if session.is_authenticated { session.user.as_ref() } else { None }
}

/// Name shown in the navigation bar; falls back to the email address.
pub fn display_name(user: &User) -> &str {
    let name = user.name.trim();
    if name.is_empty() { &user.email } else { name }
}
