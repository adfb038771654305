//! API endpoint configuration.
//!
//! The WASM apps have no process environment at runtime, so the base URL is
//! baked in at compile time from `FIELDOPS_API_BASE_URL`. The CLI passes its
//! own value from flags/env.

pub const DEFAULT_API_BASE_URL: &str = "/api";

/// Normalized backend base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Build from a raw base URL. Blank input falls back to
    /// [`DEFAULT_API_BASE_URL`]; trailing slashes are trimmed.
    #[must_use]
    pub fn new(raw: Option<&str>) -> Self {
        let base_url = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        Self { base_url }
    }

    /// Build from the `FIELDOPS_API_BASE_URL` value captured at compile time.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(option_env!("FIELDOPS_API_BASE_URL"))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an endpoint path onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
