//! Wire-level request/response types and the transport seam.
//!
//! DESIGN
//! ======
//! [`Transport`] is deliberately dumb: it sends exactly what it is given and
//! reports the status and raw body. Header injection and status inspection
//! live in [`crate::http::HttpClient`] so every transport gets the same policy.
//! Futures are `?Send` because `gloo-net` futures hold JS values.

use crate::error::ApiError;

/// HTTP method subset used by the backend API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully prepared request.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute or origin-relative URL.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body: None }
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status plus raw body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends prepared requests. Implementations report network failures as
/// [`ApiError::Transport`] and never interpret status codes.
#[async_trait::async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Transport for builds without a network stack (native builds of the WASM
/// apps); every request fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineTransport;

#[async_trait::async_trait(?Send)]
impl Transport for OfflineTransport {
    async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, ApiError> {
        Err(ApiError::Transport("no network transport in this build".to_owned()))
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// `fetch`-backed transport via `gloo-net`.
#[cfg(feature = "browser")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTransport;

#[cfg(feature = "browser")]
#[async_trait::async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        use gloo_net::http::Request;

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Patch => Request::patch(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let resp = match &request.body {
            Some(body) => builder
                .json(body)
                .map_err(|e| ApiError::Encode(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;
