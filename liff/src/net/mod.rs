//! Networking wiring for the mini-app.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` assembles the HTTP clients, the linking service and the session
//! store for the current platform. `driver` runs the SDK and backend calls
//! behind each step of the link flow.

pub mod api;
pub mod driver;
