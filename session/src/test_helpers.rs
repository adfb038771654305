//! Fakes shared by this crate's unit tests and, through the `test-helpers`
//! feature, by downstream crates.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use wire::{Role, User};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::storage::MemoryStorage;
use crate::tokens::{StoredTokens, TokenSource};
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Transport that replays scripted responses in order and records requests.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push(Ok(ApiResponse::new(status, body.to_string())));
    }

    pub fn push_status(&self, status: u16) {
        self.push(Ok(ApiResponse::new(status, "")));
    }

    pub fn push_err(&self, err: ApiError) {
        self.push(Err(err));
    }

    pub fn push(&self, resp: Result<ApiResponse, ApiError>) {
        self.responses.lock().unwrap().push_back(resp);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests().pop().expect("no request recorded")
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_owned())))
    }
}

/// Token source with a fixed answer.
pub struct FixedTokens(pub Option<String>);

impl TokenSource for FixedTokens {
    fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

pub fn user(id: &str, role: Role) -> User {
    User {
        id: id.to_owned(),
        email: format!("{id}@example.com"),
        name: format!("User {id}"),
        role,
        team_id: None,
        profile_photo: None,
    }
}

pub fn grant_json(id: &str, role: Role, access: &str, refresh: &str) -> serde_json::Value {
    serde_json::json!({
        "user": user(id, role),
        "accessToken": access,
        "refreshToken": refresh,
    })
}

/// Client reading tokens from `storage`, as the dashboard wires it.
pub fn stored_client(transport: Arc<FakeTransport>, storage: Arc<MemoryStorage>) -> HttpClient {
    HttpClient::new(ApiConfig::default(), transport, Arc::new(StoredTokens::new(storage)))
}
