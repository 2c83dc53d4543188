//! # Platform Effect Traits
//!
//! The popup core never touches platform resources directly. Every resource
//! sits behind a narrow trait here, implemented by the frontend's glue code
//! in production and by in-memory doubles in tests:
//!
//! - [`LocalStoreEffects`]: read-only access to the shared persisted store
//!   plus its change-notification stream. The store is mutated exclusively
//!   by the background process; this layer only reads and subscribes.
//! - [`ClipboardEffects`]: writing text to the system clipboard.
//! - [`SettingsSurfaceEffects`]: opening the external settings surface,
//!   with a fallback strategy when the preferred surface is unavailable.

mod clipboard;
mod store;
mod surface;

pub use clipboard::{ClipboardEffects, ClipboardError};
pub use store::{LocalStoreEffects, StoreChange, StoreChangeStream, StoreError};
pub use surface::{SettingsSurfaceEffects, SurfaceError};
