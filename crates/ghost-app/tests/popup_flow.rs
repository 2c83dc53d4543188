//! End-to-end popup flows: mount, gate unlock, generation, push
//! reconciliation, notification expiry, teardown.

use std::sync::Arc;
use std::time::Duration;

use ghost_app::testing::{MemoryStore, ScriptedBridge, TestClipboard, TestSurface};
use ghost_app::views::notifications::DEFAULT_TOAST_DURATION_MS;
use ghost_app::{Intent, PopupConfig, PopupCore, Screen};
use ghost_protocol::{keys, ChannelRequest, ChannelResponse};
use serde_json::json;

struct Harness {
    core: PopupCore,
    bridge: Arc<ScriptedBridge>,
    store: Arc<MemoryStore>,
}

fn harness() -> Harness {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let bridge = Arc::new(ScriptedBridge::new());
    let store = Arc::new(MemoryStore::new());
    let core = PopupCore::new(
        PopupConfig::default(),
        bridge.clone(),
        store.clone(),
        Arc::new(TestClipboard::new()),
        Arc::new(TestSurface::new()),
    );
    Harness {
        core,
        bridge,
        store,
    }
}

async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn cold_start_to_generated_identity() {
    let h = harness();

    // Cold start: nothing stored, nothing configured.
    h.bridge.expect(Ok(ChannelResponse::empty()));
    h.core.mount().await;

    let state = h.core.snapshot();
    assert_eq!(state.screen, Screen::Hub);
    assert_eq!(state.identity, None);
    assert!(!state.gate_satisfied);

    // The user configures a credential in the options page; the gate
    // unlocks from the push update alone, no re-query.
    let mut gate = h.core.subscribe_gate();
    h.store.insert(
        keys::SETTINGS,
        json!({ "llmApiKey": "sk-ghost-0123456789" }),
    );
    assert_eq!(gate.next().await, Some(true));

    // Generate an identity.
    h.bridge.expect(Ok(ChannelResponse::with_email(
        json!({ "fullEmail": "a@b.ghost", "password": "xY9!" }),
    )));
    h.core.dispatch(Intent::GenerateIdentity).await;

    let state = h.core.snapshot();
    assert_eq!(state.identity.as_ref().unwrap().full_email, "a@b.ghost");
    assert_eq!(
        state.identity.as_ref().unwrap().password.as_deref(),
        Some("xY9!")
    );
    assert_eq!(
        state.notification.as_deref(),
        Some("New identity generated!")
    );

    // The notification auto-clears after its display duration.
    // Let the spawned clear task register its timer deadline before the
    // clock is advanced (paused-time plumbing).
    settle().await;
    tokio::time::advance(Duration::from_millis(DEFAULT_TOAST_DURATION_MS + 1)).await;
    settle().await;
    assert_eq!(h.core.snapshot().notification, None);

    assert_eq!(
        h.bridge.requests(),
        vec![
            ChannelRequest::GetCurrentEmail,
            ChannelRequest::GenerateEmail
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn push_update_wins_over_local_result() {
    let h = harness();
    h.bridge.expect(Ok(ChannelResponse::with_email(
        json!({ "fullEmail": "stored@b.ghost" }),
    )));
    h.core.mount().await;
    assert_eq!(
        h.core.snapshot().identity.unwrap().full_email,
        "stored@b.ghost"
    );

    // The background process rotates the identity on its own; the pushed
    // value overwrites whatever the popup last resolved.
    let mut identity = h.core.subscribe_identity();
    h.store.insert(
        keys::CURRENT_EMAIL,
        json!({ "fullEmail": "rotated@b.ghost" }),
    );
    let pushed = identity.next().await.flatten().unwrap();
    assert_eq!(pushed.full_email, "rotated@b.ghost");

    // Removal pushes the popup back to the empty state.
    h.store.remove(keys::CURRENT_EMAIL);
    assert_eq!(identity.next().await, Some(None));
    assert_eq!(h.core.snapshot().identity, None);
}

#[tokio::test(start_paused = true)]
async fn navigation_survives_identity_and_gate_churn() {
    let h = harness();
    h.bridge.expect(Ok(ChannelResponse::empty()));
    h.core.mount().await;

    h.core
        .dispatch(Intent::Navigate {
            screen: Screen::Password,
        })
        .await;

    // Identity and gate churn does not move the screen.
    h.store.insert(
        keys::SETTINGS,
        json!({ "llmApiKey": "sk-ghost-0123456789" }),
    );
    h.store
        .insert(keys::CURRENT_EMAIL, json!({ "fullEmail": "a@b.ghost" }));
    settle().await;

    assert_eq!(h.core.snapshot().screen, Screen::Password);

    h.core.dispatch(Intent::Back).await;
    assert_eq!(h.core.snapshot().screen, Screen::Hub);
}

#[tokio::test(start_paused = true)]
async fn teardown_releases_subscription_and_timer() {
    let h = harness();
    h.bridge.expect(Ok(ChannelResponse::empty()));
    h.core.mount().await;

    h.bridge.expect(Ok(ChannelResponse::with_email(
        json!({ "fullEmail": "a@b.ghost" }),
    )));
    h.core.dispatch(Intent::GenerateIdentity).await;
    assert!(h.core.snapshot().notification.is_some());

    h.core.shutdown();

    // The notification is released immediately, not by a timer firing.
    assert_eq!(h.core.snapshot().notification, None);

    // Store changes after teardown no longer reach the core.
    h.store
        .insert(keys::CURRENT_EMAIL, json!({ "fullEmail": "late@b.ghost" }));
    settle().await;
    assert_eq!(h.core.snapshot().identity.unwrap().full_email, "a@b.ghost");
}
