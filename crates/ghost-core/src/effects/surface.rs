//! Settings surface effects
//!
//! Opening the external settings collaborator. Two strategies: the
//! preferred in-app settings surface, and a fallback that opens the
//! settings resource in a new context when the preferred surface is
//! unavailable on the host platform.

use async_trait::async_trait;

/// Errors from opening the settings surface.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SurfaceError {
    /// The surface could not be opened
    #[error("settings surface failed to open: {0}")]
    OpenFailed(String),
}

/// Opening the external settings surface.
#[async_trait]
pub trait SettingsSurfaceEffects: Send + Sync {
    /// Open the preferred settings surface.
    async fn open_preferred(&self) -> Result<(), SurfaceError>;

    /// Open the settings resource in a new context.
    ///
    /// Used when [`open_preferred`](Self::open_preferred) fails.
    async fn open_fallback(&self) -> Result<(), SurfaceError>;
}
