//! # session
//!
//! Framework-agnostic session core shared by the FieldOps dashboard, the LIFF
//! mini-app and the CLI.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages talk to [`store::SessionStore`] (and the LIFF linking service), both
//! of which send every backend call through [`http::HttpClient`]. The client
//! reads a [`tokens::TokenSource`] to attach bearer credentials and hands the
//! request to a [`transport::Transport`]: `gloo-net` in the browser, `reqwest`
//! in the CLI, scripted fakes in tests.
//!
//! DESIGN
//! ======
//! Session changes are modelled as [`state::Transition`] values reduced by a
//! pure function; persistence is derived from the transition as a separate
//! list of storage effects. [`guard`] holds the route table and the
//! redirect rules so they can be tested without a router.

pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod state;
pub mod storage;
pub mod store;
pub mod tokens;
pub mod transport;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::ApiConfig;
pub use error::ApiError;
pub use guard::GuardDecision;
pub use http::HttpClient;
pub use state::{Session, Transition};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::SessionStore;
pub use tokens::{NoTokens, StoredTokens, TokenSource};
pub use transport::{ApiRequest, ApiResponse, Method, OfflineTransport, Transport};
