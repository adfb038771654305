use std::sync::Arc;

use super::*;
use session::storage::{ACCESS_TOKEN_KEY, SESSION_KEY};
use session::{ApiConfig, HttpClient, MemoryStorage, NoTokens, OfflineTransport};
use wire::{Role, SessionGrant};

fn user(name: &str) -> User {
    User {
        id: "u1".to_owned(),
        email: "a@b.com".to_owned(),
        name: name.to_owned(),
        role: Role::Manager,
        team_id: None,
        profile_photo: None,
    }
}

fn store_with(storage: Arc<MemoryStorage>) -> SessionStore {
    let http = HttpClient::new(ApiConfig::default(), Arc::new(OfflineTransport), Arc::new(NoTokens));
    SessionStore::new(http, storage)
}

#[test]
fn current_user_requires_authenticated_flag() {
    let mut session = Session { user: Some(user("Alice")), is_authenticated: true, ..Session::default() };
    assert_eq!(current_user(&session).map(|u| u.name.as_str()), Some("Alice"));
    session.is_authenticated = false;
    assert!(current_user(&session).is_none());
}

#[test]
fn display_name_falls_back_to_email() {
    assert_eq!(display_name(&user("  Alice ")), "Alice");
    assert_eq!(display_name(&user("   ")), "a@b.com");
}

#[test]
fn mirror_session_starts_from_persisted_snapshot() {
    let storage = Arc::new(MemoryStorage::with_entries([
        (SESSION_KEY, r#"{"user":{"id":"u1","email":"a@b.com","name":"A","role":"admin"},"isAuthenticated":true}"#),
        (ACCESS_TOKEN_KEY, "T1"),
    ]));
    let store = store_with(storage);
    let session = mirror_session(&store);
    assert!(session.get_untracked().is_authenticated);
    assert_eq!(session.get_untracked().access_token.as_deref(), Some("T1"));
}

#[test]
fn mirror_session_follows_store_transitions() {
    let store = store_with(Arc::new(MemoryStorage::new()));
    let session = mirror_session(&store);
    assert!(!session.get_untracked().is_authenticated);

    store.establish(SessionGrant {
        user: user("Alice"),
        access_token: "T".to_owned(),
        refresh_token: "R".to_owned(),
    });
    assert!(session.get_untracked().is_authenticated);
    assert_eq!(session.get_untracked().access_token.as_deref(), Some("T"));
}
