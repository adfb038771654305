//! Networking wiring for the dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` builds the shared session store over the browser transport and maps
//! request errors to user-facing text. The HTTP client itself lives in the
//! `session` crate.

pub mod api;
