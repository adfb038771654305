//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The session itself is owned by `session::SessionStore`; this layer only
//! mirrors it into reactive signals for components.

pub mod auth;
