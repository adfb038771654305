//! Single egress point for backend calls.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store, the linking service and the CLI all route requests
//! through [`HttpClient`], so bearer injection and unauthorized detection are
//! applied uniformly.
//!
//! ERROR HANDLING
//! ==============
//! The outbound hook never fails: a missing token sends the request
//! unauthenticated. The inbound hook turns non-2xx responses into
//! [`ApiError::Status`] with the parsed backend body, logs and counts 401s,
//! and hands the error back unchanged. There is no retry or refresh here.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use wire::ErrorBody;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::tokens::TokenSource;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

/// Configured request sender with outbound/inbound hooks.
#[derive(Clone)]
pub struct HttpClient {
    config: ApiConfig,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenSource>,
    unauthorized: Arc<AtomicU64>,
}

impl HttpClient {
    #[must_use]
    pub fn new(config: ApiConfig, transport: Arc<dyn Transport>, tokens: Arc<dyn TokenSource>) -> Self {
        Self { config, transport, tokens, unauthorized: Arc::new(AtomicU64::new(0)) }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Number of 401 responses observed by this client (and its clones).
    #[must_use]
    pub fn unauthorized_count(&self) -> u64 {
        self.unauthorized.load(Ordering::Relaxed)
    }

    /// `GET` and decode a JSON body.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and decode failures unchanged.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.execute(Method::Get, path, None).await?;
        decode(&resp)
    }

    /// `POST` a JSON body and decode a JSON response.
    ///
    /// # Errors
    ///
    /// Propagates encode, transport, status and decode failures unchanged.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let resp = self.execute(Method::Post, path, Some(body)).await?;
        decode(&resp)
    }

    /// `POST` without a body, ignoring whatever the backend answers on 2xx.
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures unchanged.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::Post, path, None).await.map(|_| ())
    }

    /// Run both hooks around one transport call and return the raw 2xx response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for non-2xx responses and passes transport
    /// errors through.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.prepare(method, path, body);
        let resp = self.transport.send(request).await?;
        self.inspect(method, path, resp)
    }

    /// Outbound hook: build the request and attach a bearer token when one exists.
    fn prepare(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> ApiRequest {
        let mut request = ApiRequest::new(method, self.config.url(path));
        if body.is_some() {
            request
                .headers
                .push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        request.body = body;

        if self.tokens.is_logged_in() {
            if let Some(token) = self.tokens.access_token() {
                request
                    .headers
                    .push(("Authorization".to_owned(), bearer_header(&token)));
            }
        }
        request
    }

    /// Inbound hook: classify the response status.
    fn inspect(&self, method: Method, path: &str, resp: ApiResponse) -> Result<ApiResponse, ApiError> {
        if resp.ok() {
            return Ok(resp);
        }
        if resp.status == 401 {
            self.unauthorized.fetch_add(1, Ordering::Relaxed);
            log::warn!("unauthorized response: {} {path}", method.as_str());
        }
        Err(ApiError::Status { status: resp.status, body: parse_error_body(&resp.body) })
    }
}

fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Parse the backend error payload; plain-text bodies become the message.
fn parse_error_body(raw: &str) -> ErrorBody {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ErrorBody::default();
    }
    serde_json::from_str(trimmed)
        .unwrap_or_else(|_| ErrorBody { message: Some(trimmed.to_owned()), ..ErrorBody::default() })
}

/// Decode a 2xx body. An empty body decodes as JSON `null`.
fn decode<T: DeserializeOwned>(resp: &ApiResponse) -> Result<T, ApiError> {
    let raw = if resp.body.trim().is_empty() { "null" } else { resp.body.as_str() };
    serde_json::from_str(raw).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;
