//! Mini-app service wiring.
//!
//! Two HTTP clients share one transport: linking calls carry the LINE access
//! token as bearer, while the session store authenticates with the internal
//! tokens it persists. Both write to the same storage the dashboard reads, so
//! a session established here is visible there on the same origin.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use session::{ApiConfig, HttpClient, KeyValueStorage, SessionStore, StoredTokens, Transport};

use crate::linking::LinkingService;
use crate::net::driver::LinkDriver;
use crate::sdk::{LiffSdk, LiffTokens};

/// LIFF app id baked in at build time.
pub const LIFF_ID: Option<&str> = option_env!("FIELDOPS_LIFF_ID");

/// Configured LIFF app id; blank counts as missing.
pub fn configured_liff_id(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|id| !id.is_empty())
}

/// Build the driver over explicit I/O.
pub fn build_driver(
    config: ApiConfig,
    sdk: Arc<dyn LiffSdk>,
    transport: Arc<dyn Transport>,
    storage: Arc<dyn KeyValueStorage>,
) -> LinkDriver {
    let line_http = HttpClient::new(config.clone(), transport.clone(), Arc::new(LiffTokens::new(sdk.clone())));
    let session_http = HttpClient::new(config, transport, Arc::new(StoredTokens::new(storage.clone())));
    LinkDriver::new(sdk, LinkingService::new(line_http), SessionStore::new(session_http, storage))
}

/// Build the driver for the running platform.
#[cfg(feature = "csr")]
pub fn platform_driver(config: ApiConfig) -> LinkDriver {
    build_driver(
        config,
        Arc::new(crate::sdk::BrowserLiff),
        Arc::new(session::transport::BrowserTransport),
        Arc::new(session::storage::BrowserStorage),
    )
}
