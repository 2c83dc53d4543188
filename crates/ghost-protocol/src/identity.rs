//! Identity record wire type
//!
//! The disposable identity bundle as it crosses the channel and store
//! boundaries. The authoritative copy lives in the background process; the
//! popup holds a cached copy replaced wholesale on every fetch, generation
//! response, or push update.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The currently active disposable identity.
///
/// Only `full_email` is required; everything else the background process
/// attaches (creation time, provider hints, OTP seeds) is carried opaquely
/// in `extra` and round-tripped untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    /// Full disposable address
    pub full_email: String,

    /// Generated password associated with this identity, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Opaque account metadata owned by the background process
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdentityRecord {
    /// Validate a raw JSON payload into a record.
    ///
    /// A payload is well-formed only if it is an object whose `fullEmail`
    /// field is a non-empty string. Anything else (null, a bare string, an
    /// object missing the address) is treated as absent so it can never
    /// replace cached state with a partial record.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        match serde_json::from_value::<Self>(value.clone()) {
            Ok(record) if !record.full_email.is_empty() => Some(record),
            _ => None,
        }
    }
}
