//! Subcommand implementations.
//!
//! Each command returns the JSON value `main` prints, so the flows can be
//! exercised against a scripted transport.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::sync::Arc;

use liff::linking::{LineAuthOutcome, LinkingService};
use serde_json::{Value, json};
use session::{ApiConfig, HttpClient, KeyValueStorage, NoTokens, SessionStore, StoredTokens, Transport};

use crate::CliError;

pub struct Commands {
    store: SessionStore,
    linking: LinkingService,
}

impl Commands {
    /// Wire the session store over `storage` and restore the saved session.
    pub fn new(config: ApiConfig, transport: Arc<dyn Transport>, storage: Arc<dyn KeyValueStorage>) -> Self {
        let store_http = HttpClient::new(config.clone(), transport.clone(), Arc::new(StoredTokens::new(storage.clone())));
        let store = SessionStore::new(store_http, storage);
        store.restore();
        let linking = LinkingService::new(HttpClient::new(config, transport, Arc::new(NoTokens)));
        Self { store, linking }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Value, CliError> {
        let user = self.store.login(email.trim(), password).await?;
        Ok(serde_json::to_value(user)?)
    }

    /// Verify the saved session with the backend.
    pub async fn whoami(&self) -> Result<Value, CliError> {
        if !self.store.check_auth().await {
            return Err(CliError::NotSignedIn);
        }
        let session = self.store.snapshot();
        Ok(serde_json::to_value(session.user)?)
    }

    pub async fn logout(&self) -> Value {
        self.store.logout().await;
        json!({ "signedOut": true })
    }

    pub async fn link_status(&self, line_user_id: &str) -> Result<Value, CliError> {
        let status = self.linking.check_link_status(line_user_id).await?;
        Ok(serde_json::to_value(status)?)
    }

    /// Sign in as the account linked to a LIFF token; adopts the grant when linked.
    pub async fn line_auth(&self, liff_token: &str) -> Result<Value, CliError> {
        match self.linking.authenticate_with_line(liff_token).await? {
            LineAuthOutcome::Linked(grant) => {
                let user = grant.user.clone();
                self.store.establish(grant);
                tracing::info!(user_id = %user.id, "session established from LINE identity");
                Ok(json!({ "linked": true, "user": user }))
            }
            LineAuthOutcome::Unlinked { line_profile } => Ok(json!({ "linked": false, "lineProfile": line_profile })),
        }
    }
}
