//! # liff
//!
//! Leptos + WASM mini-app that runs inside LINE and links a LINE identity to
//! a FieldOps account.
//!
//! The crate holds the LIFF SDK capability and its browser binding, the
//! linking service, the link-flow state machine and the page that drives it.
//! A grant obtained here is handed to the shared [`session::SessionStore`].

pub mod app;
pub mod linking;
pub mod net;
pub mod pages;
pub mod sdk;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;

/// WASM entry point: install console logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use leptos::prelude::*;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    let driver = net::api::platform_driver(session::ApiConfig::from_build_env());
    leptos::mount::mount_to_body(move || view! { <app::App driver=driver/> });
}
