//! Local store effects
//!
//! Read-only access to the shared persisted store and its push-update
//! stream. Values are raw JSON: the store belongs to the background
//! process, so this layer validates payloads at the point of use instead of
//! trusting the wire shape.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

/// Errors from local store reads.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The store could not be read
    #[error("store read failed: {0}")]
    ReadFailed(String),
}

/// A change pushed from the shared persisted store.
///
/// Mirrors the `{ oldValue, newValue }` shape of the store's change
/// notifications. A `new_value` of `None` means the key was removed.
#[derive(Debug, Clone)]
pub struct StoreChange {
    /// Store key that changed
    pub key: String,
    /// Value before the change, if any
    pub old_value: Option<Value>,
    /// Value after the change; `None` when the key was removed
    pub new_value: Option<Value>,
}

/// A subscription to store change notifications.
///
/// Wraps a broadcast receiver; a lagging consumer skips the overrun
/// entries and keeps receiving. Consumers re-read current state through
/// [`LocalStoreEffects::get`] when they need a full resync.
pub struct StoreChangeStream {
    rx: broadcast::Receiver<StoreChange>,
}

impl StoreChangeStream {
    /// Wrap a broadcast receiver.
    #[must_use]
    pub fn new(rx: broadcast::Receiver<StoreChange>) -> Self {
        Self { rx }
    }

    /// Wait for the next change event.
    ///
    /// Returns `None` once the store side of the stream has closed.
    pub async fn next(&mut self) -> Option<StoreChange> {
        loop {
            match self.rx.recv().await {
                Ok(change) => return Some(change),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "store change stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Read-only access to the shared persisted store.
#[async_trait]
pub trait LocalStoreEffects: Send + Sync {
    /// Read the current value for `key`, if present.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Subscribe to change notifications for all keys.
    fn subscribe(&self) -> StoreChangeStream;
}
