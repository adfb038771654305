//! # client
//!
//! Leptos + WASM dashboard for FieldOps task and workforce management.
//!
//! This crate contains the route-level pages, the navigation shell and the
//! glue that puts the shared [`session::SessionStore`] into Leptos context and
//! keeps the route guard applied on every navigation.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install console logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
