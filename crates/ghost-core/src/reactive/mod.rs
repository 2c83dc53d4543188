//! # Reactive Primitives for Popup State
//!
//! This module provides the reactive cells that hold every piece of shared
//! popup state. Each component owns its signals and mutates them directly;
//! consumers (screens, tests) hold read-only handles and subscribe for
//! changes.
//!
//! ## Core Types
//!
//! - [`Signal<T>`]: A reactive value replaced wholesale on every update.
//!   Subscribers are woken on each replacement.
//!
//! - [`SignalStream<T>`]: A push subscription to a `Signal<T>`. Yields the
//!   latest value after each change. Intermediate values may be coalesced;
//!   the latest value always wins, which matches the store's last-writer
//!   semantics.
//!
//! ## Design Principles
//!
//! 1. **Wholesale replacement**: values are never partially mutated through
//!    a signal. `set` swaps the whole value, so observers can never see a
//!    half-updated record.
//!
//! 2. **Latest-wins delivery**: a slow consumer skips straight to the most
//!    recent value instead of draining a backlog.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ghost_core::reactive::Signal;
//!
//! let counter = Signal::new(0);
//! let mut stream = counter.subscribe();
//!
//! counter.set(1);
//! assert_eq!(counter.get(), 1);
//!
//! // In an async context:
//! if let Some(value) = stream.next().await {
//!     assert_eq!(value, 1);
//! }
//! ```

mod signal;

pub use signal::{Signal, SignalStream};
