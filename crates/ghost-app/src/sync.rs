//! # Identity Sync Controller
//!
//! Owns the cached [`IdentityRecord`] and reconciles three writers into it:
//! fetch responses, generation responses, and unsolicited push updates from
//! the shared store. The cache is replaced wholesale on every accepted
//! update, never partially mutated, so observers only ever see a complete
//! record or nothing.
//!
//! No ordering is guaranteed between a pending response and a push update:
//! whichever applies last fully overwrites the cache. This last-writer-wins
//! behavior is deliberate; both paths funnel through one `Signal::set`, the
//! choke point where a versioned scheme could later be installed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ghost_core::reactive::{Signal, SignalStream};
use ghost_protocol::{ChannelRequest, IdentityRecord};
use serde_json::Value;
use tracing::{debug, warn};

use crate::notify::NotificationScheduler;
use crate::runtime_bridge::BoxedRuntimeBridge;
use crate::views::notifications::{GENERATE_FAILED_MESSAGE, GENERATED_MESSAGE};

/// Releases the in-flight flag on every exit path.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Fetches, regenerates, and reconciles the cached identity record.
#[derive(Clone)]
pub struct IdentitySync {
    identity: Signal<Option<IdentityRecord>>,
    bridge: BoxedRuntimeBridge,
    notify: NotificationScheduler,
    in_flight: Arc<AtomicBool>,
}

impl IdentitySync {
    /// Create a controller with an absent cached record.
    #[must_use]
    pub fn new(bridge: BoxedRuntimeBridge, notify: NotificationScheduler) -> Self {
        Self {
            identity: Signal::new(None),
            bridge,
            notify,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request the currently stored identity.
    ///
    /// Only a well-formed record replaces the cache; a failure, malformed,
    /// or empty response leaves prior state untouched. Non-fatal; nothing
    /// is surfaced to the user.
    pub async fn fetch_identity(&self) {
        match self.bridge.request(ChannelRequest::GetCurrentEmail).await {
            Ok(response) => {
                match response.email.as_ref().and_then(IdentityRecord::from_value) {
                    Some(record) => {
                        debug!(address = %record.full_email, "fetched stored identity");
                        self.identity.set(Some(record));
                    }
                    None => debug!("no well-formed stored identity, keeping cached state"),
                }
            }
            Err(err) => warn!(%err, "identity fetch failed, keeping cached state"),
        }
    }

    /// Request a fresh identity from the background process.
    ///
    /// The cache is set absent before the request is issued (the visible
    /// "regenerating" state) and stays absent on failure. Success replaces
    /// the cache and shows a notification; failure shows a notification.
    ///
    /// Re-entrant calls while a generation is outstanding are ignored, so
    /// rapid repeated triggers cannot double-clear or double-request.
    pub async fn generate_identity(&self) {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("generation already in flight, ignoring");
            return;
        }
        let _guard = InFlightGuard(Arc::clone(&self.in_flight));

        self.identity.set(None);

        match self.bridge.request(ChannelRequest::GenerateEmail).await {
            Ok(response) => {
                match response.email.as_ref().and_then(IdentityRecord::from_value) {
                    Some(record) => {
                        debug!(address = %record.full_email, "generated identity");
                        self.identity.set(Some(record));
                        self.notify.show(GENERATED_MESSAGE);
                    }
                    None => {
                        warn!("generation returned malformed payload");
                        self.notify.show(GENERATE_FAILED_MESSAGE);
                    }
                }
            }
            Err(err) => {
                warn!(%err, "generation failed");
                self.notify.show(GENERATE_FAILED_MESSAGE);
            }
        }
    }

    /// Apply a pushed change to the identity store key.
    ///
    /// Unconditionally replaces the cache with the validated pushed value
    /// (absent when the key was removed or the payload is malformed), even
    /// if a local operation is in flight. Last writer wins.
    pub fn on_external_change(&self, new_value: Option<&Value>) {
        let record = new_value.and_then(IdentityRecord::from_value);
        debug!(present = record.is_some(), "identity overwritten by push update");
        self.identity.set(record);
    }

    /// Current cached record, if any.
    #[must_use]
    pub fn current(&self) -> Option<IdentityRecord> {
        self.identity.get()
    }

    /// Subscribe to cache replacements.
    #[must_use]
    pub fn subscribe(&self) -> SignalStream<Option<IdentityRecord>> {
        self.identity.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedBridge;
    use ghost_core::GhostError;
    use ghost_protocol::ChannelResponse;
    use serde_json::json;
    use std::time::Duration;

    fn record_payload(address: &str) -> Value {
        json!({ "fullEmail": address, "password": "xY9!" })
    }

    fn controller(bridge: &Arc<ScriptedBridge>) -> IdentitySync {
        IdentitySync::new(bridge.clone(), NotificationScheduler::new())
    }

    #[tokio::test]
    async fn fetch_replaces_cache_on_well_formed_record() {
        let bridge = Arc::new(ScriptedBridge::new());
        bridge.expect(Ok(ChannelResponse::with_email(record_payload("a@b.ghost"))));

        let sync = controller(&bridge);
        sync.fetch_identity().await;

        assert_eq!(sync.current().unwrap().full_email, "a@b.ghost");
        assert_eq!(bridge.requests(), vec![ChannelRequest::GetCurrentEmail]);
    }

    #[tokio::test]
    async fn fetch_failure_keeps_prior_state() {
        let bridge = Arc::new(ScriptedBridge::new());
        bridge.expect(Ok(ChannelResponse::with_email(record_payload("a@b.ghost"))));
        bridge.expect(Err(GhostError::channel("background unreachable")));
        bridge.expect(Ok(ChannelResponse::with_email(json!({ "fullEmail": "" }))));

        let sync = controller(&bridge);
        sync.fetch_identity().await;
        sync.fetch_identity().await; // channel error
        sync.fetch_identity().await; // malformed payload

        assert_eq!(sync.current().unwrap().full_email, "a@b.ghost");
    }

    #[tokio::test]
    async fn fetch_with_null_payload_keeps_prior_state() {
        let bridge = Arc::new(ScriptedBridge::new());
        bridge.expect(Ok(ChannelResponse::with_email(record_payload("a@b.ghost"))));
        bridge.expect(Ok(ChannelResponse::empty()));

        let sync = controller(&bridge);
        sync.fetch_identity().await;
        sync.fetch_identity().await;

        assert_eq!(sync.current().unwrap().full_email, "a@b.ghost");
    }

    #[tokio::test]
    async fn generate_clears_before_resolution_on_both_outcomes() {
        // Success path: the record observed absent while the request is held.
        let bridge = Arc::new(ScriptedBridge::new());
        let release = bridge.expect_held(Ok(ChannelResponse::with_email(record_payload(
            "new@b.ghost",
        ))));

        let sync = controller(&bridge);
        sync.on_external_change(Some(&record_payload("old@b.ghost")));

        let task = tokio::spawn({
            let sync = sync.clone();
            async move { sync.generate_identity().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(sync.current(), None, "cache cleared while in flight");

        release.notify_one();
        task.await.unwrap();
        assert_eq!(sync.current().unwrap().full_email, "new@b.ghost");

        // Failure path: cache stays absent.
        let bridge = Arc::new(ScriptedBridge::new());
        bridge.expect(Err(GhostError::channel("generation refused")));
        let sync = controller(&bridge);
        sync.on_external_change(Some(&record_payload("old@b.ghost")));
        sync.generate_identity().await;
        assert_eq!(sync.current(), None);
    }

    #[tokio::test]
    async fn generate_success_shows_notification() {
        let bridge = Arc::new(ScriptedBridge::new());
        bridge.expect(Ok(ChannelResponse::with_email(record_payload("a@b.ghost"))));

        let notify = NotificationScheduler::new();
        let sync = IdentitySync::new(bridge.clone(), notify.clone());
        sync.generate_identity().await;

        assert_eq!(notify.current().as_deref(), Some(GENERATED_MESSAGE));
    }

    #[tokio::test]
    async fn generate_failure_shows_notification() {
        let bridge = Arc::new(ScriptedBridge::new());
        bridge.expect(Err(GhostError::channel("generation refused")));

        let notify = NotificationScheduler::new();
        let sync = IdentitySync::new(bridge.clone(), notify.clone());
        sync.generate_identity().await;

        assert_eq!(notify.current().as_deref(), Some(GENERATE_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn reentrant_generate_is_ignored() {
        let bridge = Arc::new(ScriptedBridge::new());
        let release = bridge.expect_held(Ok(ChannelResponse::with_email(record_payload(
            "new@b.ghost",
        ))));

        let sync = controller(&bridge);
        let task = tokio::spawn({
            let sync = sync.clone();
            async move { sync.generate_identity().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        // Second call while the first is outstanding: no second request.
        sync.generate_identity().await;
        assert_eq!(bridge.requests().len(), 1);

        release.notify_one();
        task.await.unwrap();
        assert_eq!(sync.current().unwrap().full_email, "new@b.ghost");

        // After resolution the guard is released and a new request goes out.
        bridge.expect(Ok(ChannelResponse::with_email(record_payload(
            "newer@b.ghost",
        ))));
        sync.generate_identity().await;
        assert_eq!(bridge.requests().len(), 2);
    }

    #[tokio::test]
    async fn push_update_overwrites_generate_result() {
        let bridge = Arc::new(ScriptedBridge::new());
        bridge.expect(Ok(ChannelResponse::with_email(record_payload(
            "generated@b.ghost",
        ))));

        let sync = controller(&bridge);
        sync.generate_identity().await;
        assert_eq!(sync.current().unwrap().full_email, "generated@b.ghost");

        // A later push fully overwrites, no version check.
        sync.on_external_change(Some(&record_payload("pushed@b.ghost")));
        assert_eq!(sync.current().unwrap().full_email, "pushed@b.ghost");

        // Removal pushes the cache back to absent.
        sync.on_external_change(None);
        assert_eq!(sync.current(), None);
    }

    #[tokio::test]
    async fn malformed_push_resolves_to_absent() {
        let bridge = Arc::new(ScriptedBridge::new());
        let sync = controller(&bridge);

        sync.on_external_change(Some(&record_payload("a@b.ghost")));
        sync.on_external_change(Some(&json!({ "password": "only" })));
        assert_eq!(sync.current(), None);
    }
}
