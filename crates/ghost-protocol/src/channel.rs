//! Message-channel actions
//!
//! Request/response exchange with the background process. Two actions
//! exist; both answer with an envelope carrying the identity payload as raw
//! JSON. Validation of the payload happens in the consumer via
//! [`IdentityRecord::from_value`](crate::IdentityRecord::from_value), never
//! here: a response that deserializes is not yet a response that is
//! well-formed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An action addressed to the background process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ChannelRequest {
    /// Ask for the currently stored identity, if any
    #[serde(rename = "GET_CURRENT_EMAIL")]
    GetCurrentEmail,

    /// Ask the background process to generate a fresh identity
    #[serde(rename = "GENERATE_EMAIL")]
    GenerateEmail,
}

/// Response envelope for both channel actions.
///
/// `GET_CURRENT_EMAIL` answers `{ email: record | null }`;
/// `GENERATE_EMAIL` answers `{ email: record }` on success. Failures are
/// carried as channel errors, not as response payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelResponse {
    /// Raw identity payload; `None` when no identity is stored
    #[serde(default)]
    pub email: Option<Value>,
}

impl ChannelResponse {
    /// Envelope carrying an identity payload.
    #[must_use]
    pub fn with_email(email: Value) -> Self {
        Self { email: Some(email) }
    }

    /// Envelope with no stored identity.
    #[must_use]
    pub fn empty() -> Self {
        Self { email: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requests_serialize_to_channel_action_names() {
        let get = serde_json::to_value(ChannelRequest::GetCurrentEmail).unwrap();
        assert_eq!(get, json!({ "action": "GET_CURRENT_EMAIL" }));

        let gen = serde_json::to_value(ChannelRequest::GenerateEmail).unwrap();
        assert_eq!(gen, json!({ "action": "GENERATE_EMAIL" }));
    }

    #[test]
    fn response_with_null_email_deserializes() {
        let resp: ChannelResponse = serde_json::from_value(json!({ "email": null })).unwrap();
        assert_eq!(resp.email, None);

        let resp: ChannelResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(resp.email, None);
    }

    #[test]
    fn response_carries_raw_payload() {
        let resp: ChannelResponse =
            serde_json::from_value(json!({ "email": { "fullEmail": "a@b.ghost" } })).unwrap();
        assert_eq!(resp.email, Some(json!({ "fullEmail": "a@b.ghost" })));
    }
}
