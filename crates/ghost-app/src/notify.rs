//! # Notification Scheduler
//!
//! Manages the single transient-message slot with cancel-and-replace
//! semantics. At most one pending clear timer exists at any time: a new
//! [`show`](NotificationScheduler::show) cancels the prior timer before
//! installing the new message, so an older call's delayed clear can never
//! wipe a newer message.
//!
//! The timer is a scoped resource: it is released on the next `show`, on
//! [`dismiss`](NotificationScheduler::dismiss), and on teardown.

use std::sync::Arc;
use std::time::Duration;

use ghost_core::reactive::{Signal, SignalStream};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::views::notifications::DEFAULT_TOAST_DURATION_MS;

struct TimerSlot {
    /// Incremented on every show/dismiss; a clear task only fires if its
    /// epoch still matches, so a superseded timer is inert even if it was
    /// already past its sleep when cancelled.
    epoch: u64,
    handle: Option<JoinHandle<()>>,
}

/// Single-slot scheduler for transient user-facing messages.
///
/// Cheap to clone; clones share the slot. Must be used from within a tokio
/// runtime (the auto-clear is a spawned timer task).
#[derive(Clone)]
pub struct NotificationScheduler {
    message: Signal<Option<String>>,
    duration: Duration,
    slot: Arc<Mutex<TimerSlot>>,
}

impl NotificationScheduler {
    /// Create a scheduler with the default display duration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_duration(Duration::from_millis(DEFAULT_TOAST_DURATION_MS))
    }

    /// Create a scheduler with a custom display duration.
    #[must_use]
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            message: Signal::new(None),
            duration,
            slot: Arc::new(Mutex::new(TimerSlot {
                epoch: 0,
                handle: None,
            })),
        }
    }

    /// Display `message` immediately, replacing any visible message, and
    /// schedule its automatic clearing.
    ///
    /// No error conditions; the only side effect is the notification
    /// signal.
    pub fn show(&self, message: impl Into<String>) {
        let mut slot = self.slot.lock();
        slot.epoch += 1;
        let epoch = slot.epoch;
        if let Some(handle) = slot.handle.take() {
            handle.abort();
        }

        self.message.set(Some(message.into()));

        let shared = Arc::clone(&self.slot);
        let signal = self.message.clone();
        let duration = self.duration;
        slot.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut slot = shared.lock();
            if slot.epoch == epoch {
                signal.set(None);
                slot.handle = None;
            }
        }));
    }

    /// Clear the visible message and cancel the pending timer.
    pub fn dismiss(&self) {
        let mut slot = self.slot.lock();
        slot.epoch += 1;
        if let Some(handle) = slot.handle.take() {
            handle.abort();
        }
        self.message.set(None);
    }

    /// Current visible message, if any.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.message.get()
    }

    /// Subscribe to notification changes.
    #[must_use]
    pub fn subscribe(&self) -> SignalStream<Option<String>> {
        self.message.subscribe()
    }
}

impl Default for NotificationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
