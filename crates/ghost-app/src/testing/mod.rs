//! # Popup Test Utilities
//!
//! Deterministic in-memory doubles for every external boundary of the
//! popup core: the persisted store (with its change broadcast), the message
//! channel, the clipboard, and the settings surface.
//!
//! The doubles simulate the *background process side* of each boundary:
//! [`MemoryStore::insert`] plays the role of the background process writing
//! a key and the platform pushing the change notification;
//! [`ScriptedBridge::expect_held`] lets a test hold a response in flight to
//! exercise race orderings deterministically.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use ghost_core::effects::{
    ClipboardEffects, ClipboardError, LocalStoreEffects, SettingsSurfaceEffects, StoreChange,
    StoreChangeStream, StoreError, SurfaceError,
};
use ghost_core::GhostError;
use ghost_protocol::{ChannelRequest, ChannelResponse};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{broadcast, Notify};

use crate::runtime_bridge::RuntimeBridge;

/// In-memory persisted store with a change broadcast.
///
/// Writes simulate the background process mutating the store; the popup
/// core itself never writes.
pub struct MemoryStore {
    data: Mutex<HashMap<String, Value>>,
    changes: broadcast::Sender<StoreChange>,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            data: Mutex::new(HashMap::new()),
            changes,
            fail_reads: AtomicBool::new(false),
        }
    }

    /// Write a key as the background process would, pushing a change event.
    pub fn insert(&self, key: &str, value: Value) {
        let old_value = self.data.lock().insert(key.to_string(), value.clone());
        let _ = self.changes.send(StoreChange {
            key: key.to_string(),
            old_value,
            new_value: Some(value),
        });
    }

    /// Remove a key, pushing a change event with an absent new value.
    pub fn remove(&self, key: &str) {
        let old_value = self.data.lock().remove(key);
        let _ = self.changes.send(StoreChange {
            key: key.to_string(),
            old_value,
            new_value: None,
        });
    }

    /// Make subsequent reads fail, to exercise the fail-closed paths.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocalStoreEffects for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::ReadFailed("simulated read failure".into()));
        }
        Ok(self.data.lock().get(key).cloned())
    }

    fn subscribe(&self) -> StoreChangeStream {
        StoreChangeStream::new(self.changes.subscribe())
    }
}

struct Scripted {
    barrier: Option<Arc<Notify>>,
    response: Result<ChannelResponse, GhostError>,
}

/// Message-channel double answering from a scripted response queue.
///
/// Every request is recorded. An empty queue answers with a channel error,
/// which doubles as the "background unreachable" case.
pub struct ScriptedBridge {
    script: Mutex<VecDeque<Scripted>>,
    seen: Mutex<Vec<ChannelRequest>>,
}

impl ScriptedBridge {
    /// Create a bridge with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Queue the response for the next request.
    pub fn expect(&self, response: Result<ChannelResponse, GhostError>) {
        self.script.lock().push_back(Scripted {
            barrier: None,
            response,
        });
    }

    /// Queue a response that is held in flight until the returned handle
    /// is notified, so a test can interleave other events first.
    pub fn expect_held(&self, response: Result<ChannelResponse, GhostError>) -> Arc<Notify> {
        let barrier = Arc::new(Notify::new());
        self.script.lock().push_back(Scripted {
            barrier: Some(Arc::clone(&barrier)),
            response,
        });
        barrier
    }

    /// Every request seen so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ChannelRequest> {
        self.seen.lock().clone()
    }
}

impl Default for ScriptedBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuntimeBridge for ScriptedBridge {
    async fn request(&self, request: ChannelRequest) -> Result<ChannelResponse, GhostError> {
        self.seen.lock().push(request);
        let scripted = self.script.lock().pop_front();
        match scripted {
            Some(scripted) => {
                if let Some(barrier) = scripted.barrier {
                    barrier.notified().await;
                }
                scripted.response
            }
            None => Err(GhostError::channel("no scripted response")),
        }
    }
}

/// Clipboard double recording writes, optionally failing.
pub struct TestClipboard {
    writes: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl TestClipboard {
    /// Create a working clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    /// Make subsequent writes fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Every successful write so far.
    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }
}

impl Default for TestClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardEffects for TestClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClipboardError::WriteFailed("simulated denial".into()));
        }
        self.writes.lock().push(text.to_string());
        Ok(())
    }
}

/// Settings-surface double recording open attempts.
pub struct TestSurface {
    opened: Mutex<Vec<&'static str>>,
    fail_preferred: AtomicBool,
    fail_fallback: AtomicBool,
}

impl TestSurface {
    /// Create a surface where both strategies succeed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            fail_preferred: AtomicBool::new(false),
            fail_fallback: AtomicBool::new(false),
        }
    }

    /// Make the preferred surface fail.
    pub fn fail_preferred(&self, fail: bool) {
        self.fail_preferred.store(fail, Ordering::SeqCst);
    }

    /// Make the fallback fail too.
    pub fn fail_fallback(&self, fail: bool) {
        self.fail_fallback.store(fail, Ordering::SeqCst);
    }

    /// Attempted strategies, in order.
    #[must_use]
    pub fn opened(&self) -> Vec<&'static str> {
        self.opened.lock().clone()
    }
}

impl Default for TestSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsSurfaceEffects for TestSurface {
    async fn open_preferred(&self) -> Result<(), SurfaceError> {
        self.opened.lock().push("preferred");
        if self.fail_preferred.load(Ordering::SeqCst) {
            return Err(SurfaceError::OpenFailed("no in-app surface".into()));
        }
        Ok(())
    }

    async fn open_fallback(&self) -> Result<(), SurfaceError> {
        self.opened.lock().push("fallback");
        if self.fail_fallback.load(Ordering::SeqCst) {
            return Err(SurfaceError::OpenFailed("new context refused".into()));
        }
        Ok(())
    }
}
