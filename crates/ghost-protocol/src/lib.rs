//! # Ghost Protocol
//!
//! Wire types for the two external boundaries of the popup core:
//!
//! - The **message channel** to the privileged background process
//!   ([`ChannelRequest`], [`ChannelResponse`]). Request/response only; the
//!   background process owns the data and the generation algorithms.
//! - The **persisted store keys** the popup consumes reactively
//!   ([`keys`], [`Settings`]).
//!
//! Field names keep their channel spelling (`fullEmail`, `llmApiKey`) so
//! payloads round-trip against the background process unchanged.
//!
//! Payload validation lives here too: [`IdentityRecord::from_value`] is the
//! single rule deciding whether a JSON payload counts as a well-formed
//! record. Consumers apply it at every boundary so a malformed payload can
//! never replace cached state.

mod channel;
mod identity;
mod store;

pub use channel::{ChannelRequest, ChannelResponse};
pub use identity::IdentityRecord;
pub use store::{keys, Settings};
