//! # Ghost Core
//!
//! Foundation layer for the Ghost popup core. This crate stays pure: it
//! defines the unified error type, the reactive signal primitives shared by
//! every component, and the effect traits behind which platform resources
//! (local store, clipboard, settings surface) live.
//!
//! Nothing in this crate knows about the message-channel protocol or the
//! popup's state machine; those live in `ghost-protocol` and `ghost-app`.

pub mod effects;
pub mod errors;
pub mod reactive;

pub use errors::GhostError;
pub use reactive::{Signal, SignalStream};
