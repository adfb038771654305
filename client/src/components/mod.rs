//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard chrome while reading the shared session signal
//! from Leptos context.

pub mod nav_bar;
