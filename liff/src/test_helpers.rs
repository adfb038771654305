//! Fakes shared by the crate's unit tests.
//!
//! The scripted transport comes from `session`; the LIFF SDK fake lives here.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub use session::test_helpers::FakeTransport;
use session::{ApiConfig, HttpClient, MemoryStorage, NoTokens, SessionStore};
use wire::{LineProfile, Role, User};

use crate::sdk::{LiffSdk, SdkError};

/// Scripted LIFF SDK.
pub struct FakeSdk {
    pub init_result: Result<(), SdkError>,
    pub logged_in: AtomicBool,
    pub token: Option<String>,
    pub profile: Option<LineProfile>,
    pub in_client: bool,
    pub sent: Mutex<Vec<String>>,
    pub logins: AtomicUsize,
    pub closed: AtomicBool,
}

impl FakeSdk {
    pub fn logged_in(token: &str) -> Self {
        Self {
            init_result: Ok(()),
            logged_in: AtomicBool::new(true),
            token: Some(token.to_owned()),
            profile: Some(profile("U1", "Dee")),
            in_client: true,
            sent: Mutex::new(Vec::new()),
            logins: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    pub fn logged_out() -> Self {
        Self { logged_in: AtomicBool::new(false), token: None, ..Self::logged_in("") }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl LiffSdk for FakeSdk {
    async fn init(&self, _liff_id: &str) -> Result<(), SdkError> {
        self.init_result.clone()
    }

    fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::SeqCst)
    }

    fn login(&self) {
        self.logins.fetch_add(1, Ordering::SeqCst);
    }

    fn logout(&self) {
        self.logged_in.store(false, Ordering::SeqCst);
    }

    async fn profile(&self) -> Option<LineProfile> {
        self.profile.clone()
    }

    fn access_token(&self) -> Option<String> {
        if self.is_logged_in() { self.token.clone() } else { None }
    }

    fn is_in_client(&self) -> bool {
        self.in_client
    }

    fn os(&self) -> Option<String> {
        Some("ios".to_owned())
    }

    async fn send_text(&self, text: &str) -> Result<(), SdkError> {
        self.sent.lock().unwrap().push(text.to_owned());
        Ok(())
    }

    fn close_window(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

pub fn profile(user_id: &str, name: &str) -> LineProfile {
    LineProfile { user_id: user_id.to_owned(), display_name: name.to_owned(), picture_url: None, status_message: None }
}

pub fn user(id: &str) -> User {
    User {
        id: id.to_owned(),
        email: format!("{id}@example.com"),
        name: format!("Worker {id}"),
        role: Role::FieldWorker,
        team_id: None,
        profile_photo: None,
    }
}

pub fn client(transport: Arc<FakeTransport>) -> HttpClient {
    HttpClient::new(ApiConfig::default(), transport, Arc::new(NoTokens))
}

/// Store whose own client never reaches the network.
pub fn offline_store(storage: Arc<MemoryStorage>) -> SessionStore {
    let http = HttpClient::new(ApiConfig::default(), Arc::new(session::OfflineTransport), Arc::new(NoTokens));
    SessionStore::new(http, storage)
}
