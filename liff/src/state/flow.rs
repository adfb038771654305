//! Link-flow state machine for the mini-app page.
//!
//! DESIGN
//! ======
//! `LinkFlow::next` is pure: the page (or a test) performs the SDK and
//! backend calls, turns each result into a [`FlowEvent`], and folds it in.
//! Events that make no sense in the current state leave it unchanged, so a
//! late response cannot drag the page backwards.

#[cfg(test)]
#[path = "flow_test.rs"]
mod flow_test;

use wire::{LineProfile, User};

use crate::linking::{LineAuthOutcome, LinkOutcome};

/// How the user proves which internal account is theirs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkMethod {
    Phone(String),
    /// One-time invitation token, usually from the `?token=` query parameter.
    Token(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LinkFlow {
    #[default]
    Initializing,
    /// LIFF is ready but the user has not signed in to LINE.
    NeedsLogin,
    Authenticating,
    Unlinked { profile: Option<LineProfile>, error: Option<String> },
    Linking { method: LinkMethod, profile: Option<LineProfile> },
    Linked { user: User },
    Failed { message: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowEvent {
    SdkReady { logged_in: bool },
    InitFailed(String),
    AuthResolved(LineAuthOutcome),
    AuthFailed(String),
    LinkSubmitted(LinkMethod),
    LinkResolved(LinkOutcome),
    LinkFailed(String),
}

impl LinkFlow {
    #[must_use]
    pub fn next(self, event: FlowEvent) -> Self {
        match (self, event) {
            (Self::Initializing, FlowEvent::SdkReady { logged_in: true }) => Self::Authenticating,
            (Self::Initializing, FlowEvent::SdkReady { logged_in: false }) => Self::NeedsLogin,
            (Self::Initializing, FlowEvent::InitFailed(message)) => Self::Failed { message },

            (Self::Authenticating, FlowEvent::AuthResolved(LineAuthOutcome::Linked(grant))) => {
                Self::Linked { user: grant.user }
            }
            (Self::Authenticating, FlowEvent::AuthResolved(LineAuthOutcome::Unlinked { line_profile })) => {
                Self::Unlinked { profile: line_profile, error: None }
            }
            (Self::Authenticating, FlowEvent::AuthFailed(message)) => Self::Failed { message },

            (Self::Unlinked { profile, .. }, FlowEvent::LinkSubmitted(method)) => Self::Linking { method, profile },
            (Self::Linking { .. }, FlowEvent::LinkResolved(LinkOutcome::Linked(grant))) => {
                Self::Linked { user: grant.user }
            }
            (Self::Linking { profile, .. }, FlowEvent::LinkResolved(LinkOutcome::Rejected { message, .. })) => {
                Self::Unlinked { profile, error: Some(message) }
            }
            (Self::Linking { profile, .. }, FlowEvent::LinkFailed(message)) => {
                Self::Unlinked { profile, error: Some(message) }
            }

            (state, _) => state,
        }
    }

    /// Whether a link form may be submitted right now.
    #[must_use]
    pub fn accepts_link(&self) -> bool {
        matches!(self, Self::Unlinked { .. })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Initializing | Self::Authenticating | Self::Linking { .. })
    }
}

/// The one-time link token from a query string such as `?token=abc&x=1`.
#[must_use]
pub fn link_token_from_query(query: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "token")
        .map(|(_, value)| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Default method offered by the page: the invitation token when one came
/// with the URL, otherwise phone entry.
#[must_use]
pub fn default_method(query_token: Option<String>) -> LinkMethod {
    query_token.map_or_else(|| LinkMethod::Phone(String::new()), LinkMethod::Token)
}
