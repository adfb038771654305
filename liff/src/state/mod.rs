//! Mini-app state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The link page renders a single [`flow::LinkFlow`] value held in an
//! `RwSignal`; async work produces [`flow::FlowEvent`]s that are folded into it.

pub mod flow;
