//! # RuntimeBridge: The Message Channel
//!
//! Abstracts the request/response channel to the privileged background
//! process so the popup core stays pure. Frontends implement this trait
//! over their platform's messaging primitive; tests implement it with
//! scripted responses.
//!
//! ```text
//! ghost-app (pure)           frontend glue (runtime)
//! ┌─────────────────┐        ┌──────────────────────┐
//! │ PopupCore       │        │ platform channel     │
//! │  ┌────────────┐ │        │   implements         │
//! │  │RuntimeBridge│◄────────│   RuntimeBridge      │
//! │  └────────────┘ │        │                      │
//! └─────────────────┘        └──────────────────────┘
//! ```
//!
//! Requests have no cancellation path: a resolved-late response still
//! applies its result. Reconciliation with push updates is the sync
//! controller's job, not the channel's.

use std::sync::Arc;

use async_trait::async_trait;
use ghost_core::GhostError;
use ghost_protocol::{ChannelRequest, ChannelResponse};

/// Request/response access to the background process.
#[async_trait]
pub trait RuntimeBridge: Send + Sync {
    /// Issue a request and await the response.
    ///
    /// Channel failures and background-reported errors both surface as
    /// [`GhostError::Channel`].
    async fn request(&self, request: ChannelRequest) -> Result<ChannelResponse, GhostError>;
}

/// Shared trait-object alias used throughout the popup core.
pub type BoxedRuntimeBridge = Arc<dyn RuntimeBridge>;
