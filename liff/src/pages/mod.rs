//! Page modules for the mini-app.

pub mod link;
