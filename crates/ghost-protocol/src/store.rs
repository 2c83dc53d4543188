//! Persisted store keys and the settings blob
//!
//! The popup consumes exactly two store keys reactively. Both are written
//! only by the background process; the popup reads them at mount and then
//! follows the change-notification stream.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Store keys consumed by the popup.
pub mod keys {
    /// Latest identity record, or absent when none is stored
    pub const CURRENT_EMAIL: &str = "currentEmail";

    /// Configuration blob containing the credential field
    pub const SETTINGS: &str = "settings";
}

/// The persisted configuration blob.
///
/// The popup interprets a single field: the credential gating the whole UI.
/// Everything else in the blob belongs to the options page and is carried
/// opaquely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Credential required before the popup unlocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_api_key: Option<String>,

    /// Remaining configuration, opaque to the popup
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Settings {
    /// Parse a raw settings blob.
    ///
    /// Returns `None` for a malformed blob; callers treat that the same as
    /// an absent blob (fail closed).
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}
