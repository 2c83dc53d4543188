//! # Configuration Gate
//!
//! Tracks whether the required credential is present and blocks the popup
//! until it is. The check is reactive: it is computed once from the stored
//! settings blob at mount and recomputed on every settings change event.
//! A store read failure fails closed: the gate blocks rather than silently
//! allowing use. There are no retries; the push-update stream is the only
//! correction mechanism.

use ghost_core::effects::LocalStoreEffects;
use ghost_core::reactive::{Signal, SignalStream};
use ghost_protocol::{keys, Settings};
use serde_json::Value;
use tracing::{debug, warn};

/// Minimum credential length; anything at or below is treated as absent.
pub const MIN_CREDENTIAL_LEN: usize = 10;

/// Reactive credential-presence gate.
#[derive(Clone)]
pub struct ConfigGate {
    satisfied: Signal<bool>,
    min_credential_len: usize,
}

impl ConfigGate {
    /// Create an unsatisfied gate with the default length threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::with_min_len(MIN_CREDENTIAL_LEN)
    }

    /// Create an unsatisfied gate with a custom length threshold.
    #[must_use]
    pub fn with_min_len(min_credential_len: usize) -> Self {
        Self {
            satisfied: Signal::new(false),
            min_credential_len,
        }
    }

    fn evaluate(&self, blob: Option<&Value>) -> bool {
        blob.and_then(Settings::from_value)
            .and_then(|settings| settings.llm_api_key)
            .is_some_and(|key| key.len() > self.min_credential_len)
    }

    /// Read the stored settings blob and compute the initial gate state.
    pub async fn init<S: LocalStoreEffects + ?Sized>(&self, store: &S) {
        let satisfied = match store.get(keys::SETTINGS).await {
            Ok(blob) => self.evaluate(blob.as_ref()),
            Err(err) => {
                warn!(%err, "settings read failed, gate stays closed");
                false
            }
        };
        self.satisfied.set(satisfied);
    }

    /// Recompute the gate from a pushed settings change.
    pub fn on_settings_change(&self, new_value: Option<&Value>) {
        let satisfied = self.evaluate(new_value);
        debug!(satisfied, "settings changed, gate recomputed");
        self.satisfied.set(satisfied);
    }

    /// Whether the credential requirement is currently satisfied.
    #[must_use]
    pub fn satisfied(&self) -> bool {
        self.satisfied.get()
    }

    /// Subscribe to gate changes.
    #[must_use]
    pub fn subscribe(&self) -> SignalStream<bool> {
        self.satisfied.subscribe()
    }
}

impl Default for ConfigGate {
    fn default() -> Self {
        Self::new()
    }
}
