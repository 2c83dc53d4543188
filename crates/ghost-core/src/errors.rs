//! Unified error system for the Ghost core
//!
//! A single error type covers every operation in this workspace. Variants
//! are categories, not call sites; the app layer uses the category to decide
//! between silent retention, a log line, and a user-visible notification.

use serde::{Deserialize, Serialize};

/// Unified error type for all Ghost operations
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum GhostError {
    /// Message-channel request failed (channel closed, background error)
    #[error("Channel error: {message}")]
    Channel {
        /// Error message describing the channel failure
        message: String,
    },

    /// Persisted store could not be read
    #[error("Storage error: {message}")]
    Storage {
        /// Error message describing the storage failure
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// Invalid input or malformed payload
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Platform resource unavailable (clipboard, settings surface)
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform failure
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl GhostError {
    /// Create a channel error
    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a platform error
    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error is likely transient and worth a user retry.
    ///
    /// Transient errors are surfaced as notifications rather than logged
    /// and swallowed; the user is the retry mechanism.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Channel { .. } | Self::Platform { .. })
    }
}
