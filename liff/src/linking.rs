//! Account linking between a LINE identity and an internal user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The mini-app exchanges the LIFF access token for either "not linked yet"
//! or a full session grant. This service only talks to the backend; feeding a
//! grant into the session store is the caller's job.
//!
//! ERROR HANDLING
//! ==============
//! Business refusals (already linked, phone not found, expired link token)
//! come back as [`LinkOutcome::Rejected`] carrying the backend message, whether
//! the backend says so with `success: false` or with a 4xx body. A 401 means
//! the LIFF token itself was refused, so it stays an [`ApiError`] along with
//! transport failures and 5xx.

#[cfg(test)]
#[path = "linking_test.rs"]
mod linking_test;

use serde::Serialize;
use session::{ApiError, HttpClient, Method};
use wire::{
    LineAuthRequest, LineAuthResponse, LineProfile, LinkPhoneRequest, LinkResponse, LinkStatus, LinkTokenRequest,
    SessionGrant, normalize_phone, paths,
};

const DEFAULT_REJECTION: &str = "The account could not be linked.";
pub(crate) const LINE_SESSION_EXPIRED: &str = "Your LINE session has expired. Close and reopen the app.";

/// Result of a link attempt the backend answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked(SessionGrant),
    Rejected { status: u16, message: String },
}

/// Result of trying to sign in with the LINE identity alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineAuthOutcome {
    /// No internal account yet; the profile is for the link prompt.
    Unlinked { line_profile: Option<LineProfile> },
    Linked(SessionGrant),
}

/// Stateless linking calls routed through the shared [`HttpClient`].
#[derive(Clone)]
pub struct LinkingService {
    http: HttpClient,
}

impl LinkingService {
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// `POST /line/link-phone`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Encode`] for a malformed phone number (nothing is sent),
    /// otherwise transport, 401, 5xx and decode failures.
    pub async fn link_via_phone(&self, liff_token: &str, phone: &str) -> Result<LinkOutcome, ApiError> {
        let phone = normalize_phone(phone).map_err(|e| ApiError::Encode(e.to_string()))?;
        let body = LinkPhoneRequest { liff_token: liff_token.to_owned(), phone };
        self.submit_link(paths::LINK_PHONE, &body).await
    }

    /// `POST /line/link-token` with a one-time invitation token.
    ///
    /// # Errors
    ///
    /// Transport, 401, 5xx and decode failures.
    pub async fn link_via_token(&self, liff_token: &str, link_token: &str) -> Result<LinkOutcome, ApiError> {
        let body = LinkTokenRequest { liff_token: liff_token.to_owned(), link_token: link_token.trim().to_owned() };
        self.submit_link(paths::LINK_TOKEN, &body).await
    }

    /// `GET /line/link-status/:lineUserId`. Read-only.
    ///
    /// # Errors
    ///
    /// [`ApiError::Encode`] for a blank id, otherwise any request failure.
    pub async fn check_link_status(&self, line_user_id: &str) -> Result<LinkStatus, ApiError> {
        let path = paths::link_status(line_user_id).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.http.get(&path).await
    }

    /// `POST /line/auth`.
    ///
    /// # Errors
    ///
    /// Any request failure, or [`ApiError::Decode`] when a linked answer is
    /// missing part of the grant.
    pub async fn authenticate_with_line(&self, liff_token: &str) -> Result<LineAuthOutcome, ApiError> {
        let body = LineAuthRequest { liff_token: liff_token.to_owned() };
        let resp: LineAuthResponse = self.http.post(paths::LINE_AUTH, &body).await?;
        if !resp.linked {
            return Ok(LineAuthOutcome::Unlinked { line_profile: resp.line_profile });
        }
        match (resp.user, resp.access_token, resp.refresh_token) {
            (Some(user), Some(access_token), Some(refresh_token)) => {
                Ok(LineAuthOutcome::Linked(SessionGrant { user, access_token, refresh_token }))
            }
            _ => Err(ApiError::Decode("linked LINE auth response is missing the session grant".to_owned())),
        }
    }

    async fn submit_link<B: Serialize>(&self, path: &str, body: &B) -> Result<LinkOutcome, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let resp = match self.http.execute(Method::Post, path, Some(body)).await {
            Ok(resp) => resp,
            Err(ApiError::Status { status, body }) if (400..500).contains(&status) && status != 401 => {
                return Ok(LinkOutcome::Rejected { status, message: rejection_message(body.message) });
            }
            Err(e) => return Err(e),
        };

        let parsed: LinkResponse = serde_json::from_str(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))?;
        if !parsed.success {
            return Ok(LinkOutcome::Rejected { status: resp.status, message: rejection_message(parsed.message) });
        }
        parsed
            .into_grant()
            .map(LinkOutcome::Linked)
            .ok_or_else(|| ApiError::Decode("successful link response is missing the session grant".to_owned()))
    }
}

fn rejection_message(message: Option<String>) -> String {
    message
        .map(|m| m.trim().to_owned())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_REJECTION.to_owned())
}

/// User-facing text for a linking call that failed outright.
pub fn link_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Transport(_) => "Cannot reach the server. Check your connection.".to_owned(),
        ApiError::Status { status: 401, .. } => LINE_SESSION_EXPIRED.to_owned(),
        ApiError::Status { status, .. } if *status >= 500 => "The server is having trouble. Try again later.".to_owned(),
        ApiError::Encode(msg) => msg.clone(),
        ApiError::Status { .. } | ApiError::Decode(_) => err
            .message()
            .map_or_else(|| "Unexpected response from the server.".to_owned(), str::to_owned),
    }
}
