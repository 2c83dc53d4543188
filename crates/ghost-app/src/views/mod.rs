//! # View State Module
//!
//! Read-only state types handed to renderers. Frontends re-derive their
//! output from a [`ViewState`] snapshot or from individual signal
//! subscriptions; they never mutate popup state directly.

mod state;

pub mod notifications;

pub use state::ViewState;
