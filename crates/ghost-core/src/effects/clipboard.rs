//! Clipboard effects

use async_trait::async_trait;

/// Errors from clipboard operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClipboardError {
    /// The clipboard write was rejected or unavailable
    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Writing text to the system clipboard.
///
/// The write suspends pending platform confirmation; the rest of the UI
/// stays interactive while it is outstanding.
#[async_trait]
pub trait ClipboardEffects: Send + Sync {
    /// Write `text` to the clipboard.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
