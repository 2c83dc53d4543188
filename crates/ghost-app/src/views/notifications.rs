//! Notification lifecycle constants and user-facing messages

/// How long a notification stays visible before auto-clearing.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 2500;

/// Shown when a fresh identity was generated.
pub const GENERATED_MESSAGE: &str = "New identity generated!";

/// Shown when identity generation failed.
pub const GENERATE_FAILED_MESSAGE: &str = "Identity generation failed";

/// Shown when the address was copied to the clipboard.
pub const COPY_SUCCESS_MESSAGE: &str = "Copied to clipboard";

/// Shown when the clipboard write failed or there was nothing to copy.
pub const COPY_FAILED_MESSAGE: &str = "Copy failed";
