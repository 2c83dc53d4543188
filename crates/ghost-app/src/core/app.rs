//! PopupCore - the orchestrator
//!
//! Composes the sync controller, configuration gate, and notification
//! scheduler behind one shared state struct, wires intents to operations,
//! and owns the store-subscription lifecycle.

use std::sync::Arc;
use std::time::Duration;

use ghost_core::effects::{ClipboardEffects, LocalStoreEffects, SettingsSurfaceEffects};
use ghost_core::reactive::{Signal, SignalStream};
use ghost_protocol::{keys, IdentityRecord};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::core::{Intent, Screen};
use crate::gate::{ConfigGate, MIN_CREDENTIAL_LEN};
use crate::notify::NotificationScheduler;
use crate::runtime_bridge::BoxedRuntimeBridge;
use crate::sync::IdentitySync;
use crate::views::notifications::{
    COPY_FAILED_MESSAGE, COPY_SUCCESS_MESSAGE, DEFAULT_TOAST_DURATION_MS,
};
use crate::views::ViewState;

/// Popup tunables with production defaults.
#[derive(Debug, Clone)]
pub struct PopupConfig {
    /// Notification display duration in milliseconds
    pub toast_duration_ms: u64,
    /// Minimum credential length for the configuration gate
    pub min_credential_len: usize,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            min_credential_len: MIN_CREDENTIAL_LEN,
        }
    }
}

/// The headless popup controller.
///
/// Frontends construct one per popup instance, call
/// [`mount`](Self::mount), dispatch [`Intent`]s, and render from
/// [`snapshot`](Self::snapshot) or the signal subscriptions. Dropping the
/// core (or calling [`shutdown`](Self::shutdown)) releases the store
/// subscription and the pending notification timer.
pub struct PopupCore {
    screen: Signal<Screen>,
    help_open: Signal<bool>,
    notify: NotificationScheduler,
    gate: ConfigGate,
    sync: IdentitySync,
    store: Arc<dyn LocalStoreEffects>,
    clipboard: Arc<dyn ClipboardEffects>,
    surface: Arc<dyn SettingsSurfaceEffects>,
    subscription: Mutex<Option<JoinHandle<()>>>,
}

impl PopupCore {
    /// Create an unmounted popup core.
    #[must_use]
    pub fn new(
        config: PopupConfig,
        bridge: BoxedRuntimeBridge,
        store: Arc<dyn LocalStoreEffects>,
        clipboard: Arc<dyn ClipboardEffects>,
        surface: Arc<dyn SettingsSurfaceEffects>,
    ) -> Self {
        let notify =
            NotificationScheduler::with_duration(Duration::from_millis(config.toast_duration_ms));
        Self {
            screen: Signal::new(Screen::Hub),
            help_open: Signal::new(false),
            gate: ConfigGate::with_min_len(config.min_credential_len),
            sync: IdentitySync::new(bridge, notify.clone()),
            notify,
            store,
            clipboard,
            surface,
            subscription: Mutex::new(None),
        }
    }

    /// Bring the popup live.
    ///
    /// Acquires the store-change subscription, evaluates the gate from the
    /// stored settings, and triggers one identity fetch. The subscription
    /// is acquired before the initial reads so a store write landing in
    /// between is not missed.
    pub async fn mount(&self) {
        let mut stream = self.store.subscribe();
        let sync = self.sync.clone();
        let gate = self.gate.clone();
        let handle = tokio::spawn(async move {
            while let Some(change) = stream.next().await {
                match change.key.as_str() {
                    keys::CURRENT_EMAIL => sync.on_external_change(change.new_value.as_ref()),
                    keys::SETTINGS => gate.on_settings_change(change.new_value.as_ref()),
                    _ => {}
                }
            }
        });
        if let Some(previous) = self.subscription.lock().replace(handle) {
            debug!("remounting popup core, releasing previous subscription");
            previous.abort();
        }

        self.gate.init(self.store.as_ref()).await;
        self.sync.fetch_identity().await;
    }

    /// Release the store subscription and the current notification.
    pub fn shutdown(&self) {
        if let Some(handle) = self.subscription.lock().take() {
            handle.abort();
        }
        self.notify.dismiss();
    }

    /// Dispatch a user intent.
    ///
    /// Never fails: every failure path inside resolves to retained state,
    /// a log line, or a transient notification.
    pub async fn dispatch(&self, intent: Intent) {
        match intent {
            Intent::Navigate { screen } => self.screen.set(screen),
            Intent::Back => self.screen.set(Screen::Hub),
            Intent::GenerateIdentity => self.sync.generate_identity().await,
            Intent::CopyAddress => self.copy_address().await,
            Intent::OpenSettings => self.open_settings().await,
            Intent::ToggleHelp => self.help_open.update(|open| !open),
        }
    }

    async fn copy_address(&self) {
        let Some(record) = self.sync.current() else {
            debug!("copy requested with no identity present");
            self.notify.show(COPY_FAILED_MESSAGE);
            return;
        };
        match self.clipboard.write_text(&record.full_email).await {
            Ok(()) => self.notify.show(COPY_SUCCESS_MESSAGE),
            Err(err) => {
                warn!(%err, "clipboard write failed");
                self.notify.show(COPY_FAILED_MESSAGE);
            }
        }
    }

    async fn open_settings(&self) {
        if let Err(preferred) = self.surface.open_preferred().await {
            debug!(%preferred, "preferred settings surface unavailable, falling back");
            if let Err(fallback) = self.surface.open_fallback().await {
                warn!(%fallback, "settings surface fallback failed");
            }
        }
    }

    /// A complete snapshot of the visible state.
    #[must_use]
    pub fn snapshot(&self) -> ViewState {
        ViewState {
            screen: self.screen.get(),
            identity: self.sync.current(),
            notification: self.notify.current(),
            gate_satisfied: self.gate.satisfied(),
            help_open: self.help_open.get(),
        }
    }

    /// Subscribe to screen changes.
    #[must_use]
    pub fn subscribe_screen(&self) -> SignalStream<Screen> {
        self.screen.subscribe()
    }

    /// Subscribe to identity cache replacements.
    #[must_use]
    pub fn subscribe_identity(&self) -> SignalStream<Option<IdentityRecord>> {
        self.sync.subscribe()
    }

    /// Subscribe to notification changes.
    #[must_use]
    pub fn subscribe_notification(&self) -> SignalStream<Option<String>> {
        self.notify.subscribe()
    }

    /// Subscribe to gate changes.
    #[must_use]
    pub fn subscribe_gate(&self) -> SignalStream<bool> {
        self.gate.subscribe()
    }

    /// Subscribe to help overlay changes.
    #[must_use]
    pub fn subscribe_help(&self) -> SignalStream<bool> {
        self.help_open.subscribe()
    }
}

impl Drop for PopupCore {
    fn drop(&mut self) {
        self.shutdown();
    }
}
