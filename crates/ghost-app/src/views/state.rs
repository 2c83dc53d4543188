//! Popup view state snapshot

use ghost_protocol::IdentityRecord;
use serde::{Deserialize, Serialize};

use crate::core::Screen;

/// A complete, self-consistent snapshot of the popup's visible state.
///
/// Produced by [`PopupCore::snapshot`](crate::PopupCore::snapshot). An
/// absent `identity` means no identity is stored or one is being
/// regenerated; a partial record is never observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Active screen
    pub screen: Screen,

    /// Cached identity record, possibly stale, absent while regenerating
    pub identity: Option<IdentityRecord>,

    /// Visible transient message, if any
    pub notification: Option<String>,

    /// Whether the credential gate is satisfied; while `false` the gate
    /// overlay supersedes every screen without changing `screen`
    pub gate_satisfied: bool,

    /// Whether the help overlay is open
    pub help_open: bool,
}
