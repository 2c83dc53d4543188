//! # Ghost App
//!
//! Portable headless popup core for the Ghost disposable-identity manager.
//! This crate is the single point coordinating transient UI state with the
//! privileged background process that owns the actual identity and
//! credential data.
//!
//! ## Architecture
//!
//! ```text
//! frontend (rendering)        ghost-app (this crate)        background process
//! ┌──────────────────┐        ┌────────────────────┐        ┌──────────────┐
//! │ screens render   │ intents│ PopupCore          │request │ owns store + │
//! │ StateSnapshot,   ├───────►│  view state machine├───────►│ generation   │
//! │ subscribe to     │◄───────┤  identity sync     │◄───────┤ algorithms   │
//! │ signals          │ signals│  notify scheduler  │ push   │              │
//! └──────────────────┘        │  config gate       │ updates└──────────────┘
//!                             └────────────────────┘
//! ```
//!
//! Frontends receive read-only signal projections and dispatch [`Intent`]s;
//! nothing outside this crate mutates popup state. Platform resources
//! (store, clipboard, settings surface) and the message channel sit behind
//! the traits in [`ghost_core::effects`] and [`runtime_bridge`].
//!
//! No failure in this crate escalates to a panic: every failure path
//! resolves to silent retention of prior state or a transient notification.

pub mod core;
pub mod gate;
pub mod notify;
pub mod runtime_bridge;
pub mod sync;
pub mod testing;
pub mod views;

pub use crate::core::{Intent, PopupConfig, PopupCore, Screen};
pub use gate::ConfigGate;
pub use notify::NotificationScheduler;
pub use runtime_bridge::{BoxedRuntimeBridge, RuntimeBridge};
pub use sync::IdentitySync;
pub use views::ViewState;
