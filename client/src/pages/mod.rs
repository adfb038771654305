//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Access control is not a page concern: the shared route
//! guard redirects before a page the user may not see stays on screen.

pub mod dashboard;
pub mod login;
pub mod section;
