//! # Intents: User Actions
//!
//! An intent is a user action forwarded by the frontend. Frontends never
//! mutate popup state directly; they dispatch intents and re-render from
//! the resulting signals.

use serde::{Deserialize, Serialize};

/// Screen identifier for navigation intents.
///
/// The gate overlay, when unsatisfied, visually supersedes every screen
/// without changing this value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Hub/home screen
    #[default]
    Hub,
    /// Disposable email screen
    Email,
    /// Generated password detail screen
    Password,
    /// One-time passcode detail screen
    Otp,
}

/// A user action dispatched to [`PopupCore`](crate::PopupCore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Navigate to a screen
    Navigate {
        /// Target screen
        screen: Screen,
    },

    /// Return to the hub from a detail screen
    Back,

    /// Request a fresh disposable identity from the background process
    GenerateIdentity,

    /// Copy the current identity's address to the clipboard
    CopyAddress,

    /// Open the external settings surface
    OpenSettings,

    /// Toggle the help overlay
    ToggleHelp,
}
