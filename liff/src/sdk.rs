//! LIFF SDK capability.
//!
//! SYSTEM CONTEXT
//! ==============
//! The mini-app runs inside LINE's webview and gets its identity from the
//! global `liff` object. Everything the app needs from it goes through
//! [`LiffSdk`], so the link flow and the linking service can be tested with a
//! scripted SDK.
//!
//! ERROR HANDLING
//! ==============
//! "Not logged in to LINE" is a normal state, so identity lookups downgrade
//! failures to `None`/`false` and log them. Only `init` and `send_text`
//! report errors, because the page has something to show for them.

#[cfg(test)]
#[path = "sdk_test.rs"]
mod sdk_test;

use std::sync::Arc;

use session::TokenSource;
use wire::LineProfile;

/// Failure reported by the LIFF SDK.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    #[error("LINE SDK is not available on this page")]
    Unavailable,
    #[error("LINE SDK {method} failed: {message}")]
    Call { method: &'static str, message: String },
}

/// The slice of the LIFF SDK the mini-app uses.
#[async_trait::async_trait(?Send)]
pub trait LiffSdk: Send + Sync {
    /// Initialise the SDK for `liff_id`. Must succeed before anything else.
    async fn init(&self, liff_id: &str) -> Result<(), SdkError>;
    fn is_logged_in(&self) -> bool;
    /// Redirects to LINE login; the page reloads afterwards.
    fn login(&self);
    fn logout(&self);
    async fn profile(&self) -> Option<LineProfile>;
    fn access_token(&self) -> Option<String>;
    /// True inside the LINE app, false in an external browser.
    fn is_in_client(&self) -> bool;
    /// `ios`, `android` or `web`.
    fn os(&self) -> Option<String>;
    /// Post a text message into the chat that opened the mini-app.
    async fn send_text(&self, text: &str) -> Result<(), SdkError>;
    fn close_window(&self);
}

/// Bearer tokens for mini-app requests come from the LINE session.
#[derive(Clone)]
pub struct LiffTokens {
    sdk: Arc<dyn LiffSdk>,
}

impl LiffTokens {
    #[must_use]
    pub fn new(sdk: Arc<dyn LiffSdk>) -> Self {
        Self { sdk }
    }
}

impl TokenSource for LiffTokens {
    fn is_logged_in(&self) -> bool {
        self.sdk.is_logged_in()
    }

    fn access_token(&self) -> Option<String> {
        self.sdk.access_token().filter(|t| !t.is_empty())
    }
}

// =============================================================================
// BROWSER
// =============================================================================

#[cfg(feature = "csr")]
mod bindings {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = liff, js_name = init, catch)]
        pub fn init(config: &JsValue) -> Result<js_sys::Promise, JsValue>;

        #[wasm_bindgen(js_namespace = liff, js_name = isLoggedIn, catch)]
        pub fn is_logged_in() -> Result<bool, JsValue>;

        #[wasm_bindgen(js_namespace = liff, js_name = login, catch)]
        pub fn login() -> Result<(), JsValue>;

        #[wasm_bindgen(js_namespace = liff, js_name = logout, catch)]
        pub fn logout() -> Result<(), JsValue>;

        #[wasm_bindgen(js_namespace = liff, js_name = getProfile, catch)]
        pub fn get_profile() -> Result<js_sys::Promise, JsValue>;

        #[wasm_bindgen(js_namespace = liff, js_name = getAccessToken, catch)]
        pub fn get_access_token() -> Result<Option<String>, JsValue>;

        #[wasm_bindgen(js_namespace = liff, js_name = isInClient, catch)]
        pub fn is_in_client() -> Result<bool, JsValue>;

        #[wasm_bindgen(js_namespace = liff, js_name = getOS, catch)]
        pub fn get_os() -> Result<Option<String>, JsValue>;

        #[wasm_bindgen(js_namespace = liff, js_name = sendMessages, catch)]
        pub fn send_messages(messages: &JsValue) -> Result<js_sys::Promise, JsValue>;

        #[wasm_bindgen(js_namespace = liff, js_name = closeWindow, catch)]
        pub fn close_window() -> Result<(), JsValue>;
    }
}

/// The global `liff` object loaded from LINE's CDN script.
#[cfg(feature = "csr")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserLiff;

#[cfg(feature = "csr")]
fn js_message(err: &wasm_bindgen::JsValue) -> String {
    js_sys::JSON::stringify(err)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

#[cfg(feature = "csr")]
fn call_failed(method: &'static str, err: &wasm_bindgen::JsValue) -> SdkError {
    SdkError::Call { method, message: js_message(err) }
}

#[cfg(feature = "csr")]
fn to_js(value: &serde_json::Value) -> Result<wasm_bindgen::JsValue, SdkError> {
    js_sys::JSON::parse(&value.to_string()).map_err(|e| call_failed("encode", &e))
}

#[cfg(feature = "csr")]
async fn await_promise(
    method: &'static str,
    promise: Result<js_sys::Promise, wasm_bindgen::JsValue>,
) -> Result<wasm_bindgen::JsValue, SdkError> {
    let promise = promise.map_err(|e| call_failed(method, &e))?;
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|e| call_failed(method, &e))
}

#[cfg(feature = "csr")]
#[async_trait::async_trait(?Send)]
impl LiffSdk for BrowserLiff {
    async fn init(&self, liff_id: &str) -> Result<(), SdkError> {
        let loaded = js_sys::Reflect::has(&js_sys::global(), &wasm_bindgen::JsValue::from_str("liff")).unwrap_or(false);
        if !loaded {
            return Err(SdkError::Unavailable);
        }
        let config = to_js(&serde_json::json!({ "liffId": liff_id }))?;
        await_promise("init", bindings::init(&config)).await.map(|_| ())
    }

    fn is_logged_in(&self) -> bool {
        bindings::is_logged_in().unwrap_or_else(|e| {
            log::warn!("{}", call_failed("isLoggedIn", &e));
            false
        })
    }

    fn login(&self) {
        if let Err(e) = bindings::login() {
            log::warn!("{}", call_failed("login", &e));
        }
    }

    fn logout(&self) {
        if let Err(e) = bindings::logout() {
            log::warn!("{}", call_failed("logout", &e));
        }
    }

    async fn profile(&self) -> Option<LineProfile> {
        let value = match await_promise("getProfile", bindings::get_profile()).await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{e}");
                return None;
            }
        };
        let raw = js_sys::JSON::stringify(&value).ok()?.as_string()?;
        serde_json::from_str(&raw)
            .map_err(|e| log::warn!("LINE profile did not parse: {e}"))
            .ok()
    }

    fn access_token(&self) -> Option<String> {
        bindings::get_access_token().unwrap_or_else(|e| {
            log::warn!("{}", call_failed("getAccessToken", &e));
            None
        })
    }

    fn is_in_client(&self) -> bool {
        bindings::is_in_client().unwrap_or(false)
    }

    fn os(&self) -> Option<String> {
        bindings::get_os().ok().flatten()
    }

    async fn send_text(&self, text: &str) -> Result<(), SdkError> {
        let messages = to_js(&serde_json::json!([{ "type": "text", "text": text }]))?;
        await_promise("sendMessages", bindings::send_messages(&messages)).await.map(|_| ())
    }

    fn close_window(&self) {
        if let Err(e) = bindings::close_window() {
            log::warn!("{}", call_failed("closeWindow", &e));
        }
    }
}
