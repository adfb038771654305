//! Side effects behind each link-flow step.
//!
//! Every method performs one SDK/backend round trip and reports it as a
//! [`FlowEvent`]; the page folds the event into its `LinkFlow` signal. Grants
//! are handed to the session store here, never to the flow.

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;

use std::sync::Arc;

use leptos::logging::warn;
use session::SessionStore;
use wire::{SessionGrant, User};

use crate::linking::{LINE_SESSION_EXPIRED, LineAuthOutcome, LinkOutcome, LinkingService, link_error_message};
use crate::sdk::LiffSdk;
use crate::state::flow::{FlowEvent, LinkMethod};

const NOT_CONFIGURED: &str = "This LINE app is not configured.";

#[derive(Clone)]
pub struct LinkDriver {
    sdk: Arc<dyn LiffSdk>,
    linking: LinkingService,
    store: SessionStore,
}

impl LinkDriver {
    #[must_use]
    pub fn new(sdk: Arc<dyn LiffSdk>, linking: LinkingService, store: SessionStore) -> Self {
        Self { sdk, linking, store }
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub fn sdk(&self) -> &Arc<dyn LiffSdk> {
        &self.sdk
    }

    /// Initialise LIFF for `liff_id` and report whether LINE login is needed.
    pub async fn initialize(&self, liff_id: Option<&str>) -> FlowEvent {
        let Some(liff_id) = super::api::configured_liff_id(liff_id) else {
            return FlowEvent::InitFailed(NOT_CONFIGURED.to_owned());
        };
        match self.sdk.init(liff_id).await {
            Ok(()) => FlowEvent::SdkReady { logged_in: self.sdk.is_logged_in() },
            Err(e) => {
                warn!("LIFF init failed: {e}");
                FlowEvent::InitFailed(e.to_string())
            }
        }
    }

    /// Try to sign in as the account already linked to this LINE user.
    pub async fn authenticate(&self) -> FlowEvent {
        let Some(token) = self.sdk.access_token() else {
            return FlowEvent::AuthFailed(LINE_SESSION_EXPIRED.to_owned());
        };
        match self.linking.authenticate_with_line(&token).await {
            Ok(LineAuthOutcome::Linked(grant)) => {
                self.adopt(&grant);
                FlowEvent::AuthResolved(LineAuthOutcome::Linked(grant))
            }
            Ok(LineAuthOutcome::Unlinked { line_profile }) => {
                let line_profile = match line_profile {
                    Some(profile) => Some(profile),
                    None => self.sdk.profile().await,
                };
                FlowEvent::AuthResolved(LineAuthOutcome::Unlinked { line_profile })
            }
            Err(e) => FlowEvent::AuthFailed(link_error_message(&e)),
        }
    }

    /// Submit a link request with `method`.
    pub async fn link(&self, method: &LinkMethod) -> FlowEvent {
        let Some(token) = self.sdk.access_token() else {
            return FlowEvent::LinkFailed(LINE_SESSION_EXPIRED.to_owned());
        };
        let result = match method {
            LinkMethod::Phone(phone) => self.linking.link_via_phone(&token, phone).await,
            LinkMethod::Token(link_token) => self.linking.link_via_token(&token, link_token).await,
        };
        match result {
            Ok(LinkOutcome::Linked(grant)) => {
                self.adopt(&grant);
                self.announce(&grant.user).await;
                FlowEvent::LinkResolved(LinkOutcome::Linked(grant))
            }
            Ok(rejected) => FlowEvent::LinkResolved(rejected),
            Err(e) => FlowEvent::LinkFailed(link_error_message(&e)),
        }
    }

    pub fn login(&self) {
        self.sdk.login();
    }

    pub fn close(&self) {
        self.sdk.close_window();
    }

    fn adopt(&self, grant: &SessionGrant) {
        self.store.establish(grant.clone());
    }

    /// Confirm the link in the chat when running inside LINE.
    async fn announce(&self, user: &User) {
        if !self.sdk.is_in_client() {
            return;
        }
        if let Err(e) = self.sdk.send_text(&linked_message(user)).await {
            warn!("link confirmation not sent: {e}");
        }
    }
}

fn linked_message(user: &User) -> String {
    format!("Linked to FieldOps as {} ({})", user.name, user.role.label())
}
