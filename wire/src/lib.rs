//! Shared JSON schema for the FieldOps REST API.
//!
//! This crate owns the wire representation used by the dashboard, the LIFF
//! mini-app and the CLI. Field names follow the backend's camelCase JSON;
//! role values use snake_case.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// ERRORS
// =============================================================================

/// Error returned by request-shape validation helpers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// The phone number contains characters other than digits and separators.
    #[error("phone number contains invalid characters")]
    PhoneInvalidChars,
    /// The phone number has too few or too many digits.
    #[error("phone number must have {min}-{max} digits, got {got}")]
    PhoneLength { min: usize, max: usize, got: usize },
    /// A path parameter was empty.
    #[error("missing path parameter `{0}`")]
    EmptyPathParam(&'static str),
}

// =============================================================================
// ROLES & USERS
// =============================================================================

/// Closed set of account roles known to the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    TeamLeader,
    FieldWorker,
}

impl Role {
    /// Every role, most privileged first.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::TeamLeader, Role::FieldWorker];

    /// Wire value (e.g. `"team_leader"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::TeamLeader => "team_leader",
            Self::FieldWorker => "field_worker",
        }
    }

    /// Human-readable label for badges and menus.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::TeamLeader => "Team Leader",
            Self::FieldWorker => "Field Worker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An internal account as returned by `/auth/me` and the login endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

// =============================================================================
// AUTH
// =============================================================================

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A user plus the token pair that authorizes them.
///
/// Returned by `POST /auth/login` and carried inside successful link and
/// LINE-auth responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionGrant {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Error payload the backend attaches to non-2xx responses.
///
/// Every field is optional: some endpoints send `{message}` only, the linking
/// endpoints add `success: false`, and a few include a machine `code`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

// =============================================================================
// LINE LINKING
// =============================================================================

/// Body of `POST /line/link-phone`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPhoneRequest {
    pub liff_token: String,
    pub phone: String,
}

/// Body of `POST /line/link-token`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTokenRequest {
    pub liff_token: String,
    pub link_token: String,
}

/// Response of both link endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl LinkResponse {
    /// Extract the session grant when the link succeeded and every part is present.
    #[must_use]
    pub fn into_grant(self) -> Option<SessionGrant> {
        if !self.success {
            return None;
        }
        Some(SessionGrant { user: self.user?, access_token: self.access_token?, refresh_token: self.refresh_token? })
    }
}

/// Read-only projection of the internal account a LINE identity is linked to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedAccount {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub linked_at: String,
}

/// Response of `GET /line/link-status/:lineUserId`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStatus {
    pub linked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<LinkedAccount>,
}

/// LINE profile as reported by the LIFF SDK and echoed by `/line/auth`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineProfile {
    pub user_id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

/// Body of `POST /line/auth`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAuthRequest {
    pub liff_token: String,
}

/// Response of `POST /line/auth`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAuthResponse {
    pub linked: bool,
    #[serde(default)]
    pub line_profile: Option<LineProfile>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

// =============================================================================
// ENDPOINTS
// =============================================================================

/// Endpoint paths relative to the API base URL.
pub mod paths {
    use super::WireError;

    pub const LOGIN: &str = "/auth/login";
    pub const LOGOUT: &str = "/auth/logout";
    pub const ME: &str = "/auth/me";
    pub const LINK_PHONE: &str = "/line/link-phone";
    pub const LINK_TOKEN: &str = "/line/link-token";
    pub const LINE_AUTH: &str = "/line/auth";

    /// `GET /line/link-status/:lineUserId`.
    ///
    /// # Errors
    ///
    /// Returns an error when `line_user_id` is blank.
    pub fn link_status(line_user_id: &str) -> Result<String, WireError> {
        let id = line_user_id.trim();
        if id.is_empty() {
            return Err(WireError::EmptyPathParam("lineUserId"));
        }
        Ok(format!("/line/link-status/{id}"))
    }
}

// =============================================================================
// PHONE NUMBERS
// =============================================================================

pub const PHONE_MIN_DIGITS: usize = 9;
pub const PHONE_MAX_DIGITS: usize = 15;

/// Normalize user-typed phone input for `POST /line/link-phone`.
///
/// Spaces, dashes, dots and parentheses are dropped; a single leading `+`
/// survives. The remaining digit count must fall in
/// [`PHONE_MIN_DIGITS`]..=[`PHONE_MAX_DIGITS`].
///
/// # Errors
///
/// Returns [`WireError`] for foreign characters or an out-of-range length.
pub fn normalize_phone(raw: &str) -> Result<String, WireError> {
    let trimmed = raw.trim();
    let (plus, rest) = match trimmed.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let mut digits = String::with_capacity(rest.len());
    for ch in rest.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return Err(WireError::PhoneInvalidChars),
        }
    }

    let got = digits.len();
    if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&got) {
        return Err(WireError::PhoneLength { min: PHONE_MIN_DIGITS, max: PHONE_MAX_DIGITS, got });
    }
    if plus {
        digits.insert(0, '+');
    }
    Ok(digits)
}
