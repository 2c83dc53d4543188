//! Signal<T> - A reactive value with push subscriptions
//!
//! `Signal<T>` wraps a value and wakes subscribers on every replacement. It
//! is the primitive behind all shared popup state: the cached identity
//! record, the active screen, the notification slot, and the gate flag.
//!
//! Backed by `tokio::sync::watch`, so a subscription always observes the
//! latest value and never a backlog of stale intermediates.

use tokio::sync::watch;

/// A reactive value that can be observed for changes.
///
/// `Signal<T>` provides:
/// - `get()`: Synchronously read the current value
/// - `set()`: Replace the value and wake subscribers
/// - `update()`: Replace via a closure over the current value
/// - `subscribe()`: Get a [`SignalStream`] of subsequent values
///
/// # Thread Safety
///
/// `Signal<T>` is `Send + Sync` and cheap to clone; clones share the same
/// underlying cell.
#[derive(Clone)]
pub struct Signal<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    /// Create a new signal with the given initial value.
    #[must_use]
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx }
    }

    /// Get the current value.
    ///
    /// This is a synchronous operation that clones the value.
    #[must_use]
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the value wholesale and wake all subscribers.
    ///
    /// Subscribers are woken even if the new value compares equal to the
    /// old one; the popup treats every replacement as an event.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Replace the value computed from the current one.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        self.tx.send_modify(|current| *current = f(current));
    }

    /// Subscribe to subsequent value changes.
    ///
    /// The stream yields values set *after* this call; use
    /// [`SignalStream::current`] for the value at subscription time.
    #[must_use]
    pub fn subscribe(&self) -> SignalStream<T> {
        SignalStream {
            rx: self.tx.subscribe(),
        }
    }
}

impl<T: Clone + Default + Send + Sync + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// A push subscription to a [`Signal`].
///
/// Yields the latest value after each change. If several replacements
/// happen between polls only the most recent is observed.
pub struct SignalStream<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> SignalStream<T> {
    /// Wait for the next change and return the latest value.
    ///
    /// Returns `None` once the owning [`Signal`] has been dropped.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Read the current value without waiting.
    #[must_use]
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_set_roundtrip() {
        let signal = Signal::new(7_u32);
        assert_eq!(signal.get(), 7);
        signal.set(9);
        assert_eq!(signal.get(), 9);
    }

    #[tokio::test]
    async fn subscription_sees_subsequent_values() {
        let signal = Signal::new("a".to_string());
        let mut stream = signal.subscribe();
        assert_eq!(stream.current(), "a");

        signal.set("b".to_string());
        assert_eq!(stream.next().await.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn coalesced_delivery_yields_latest() {
        let signal = Signal::new(0_u32);
        let mut stream = signal.subscribe();

        signal.set(1);
        signal.set(2);
        signal.set(3);

        // Only the most recent value is observed.
        assert_eq!(stream.next().await, Some(3));
    }

    #[tokio::test]
    async fn clones_share_the_cell() {
        let signal = Signal::new(1_u32);
        let other = signal.clone();
        other.set(5);
        assert_eq!(signal.get(), 5);
    }

    #[tokio::test]
    async fn update_replaces_from_current() {
        let signal = Signal::new(10_u32);
        signal.update(|v| v + 1);
        assert_eq!(signal.get(), 11);
    }

    #[tokio::test]
    async fn stream_ends_when_signal_dropped() {
        let signal = Signal::new(0_u32);
        let mut stream = signal.subscribe();
        drop(signal);
        assert_eq!(stream.next().await, None);
    }
}
