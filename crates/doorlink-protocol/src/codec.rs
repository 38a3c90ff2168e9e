//! JSON frame codec: the boundary between wire text and typed messages.
//!
//! Decoding is deliberately two-tiered:
//!
//! - [`decode_frame`] returns a `Result` and is the strict path used by
//!   tests and anything that wants to observe decode failures.
//! - [`decode_lenient`] is the production boundary: malformed frames are
//!   logged at `warn` and swallowed (`None`). The dispatcher is never
//!   invoked for text that failed to decode; a garbled frame costs one log
//!   line and nothing else.
//!
//! A frame whose JSON is valid but whose `type` is unknown is *not* a decode
//! failure; it decodes to [`InboundMessage::Unrecognized`] so the dispatcher
//! can log the foreign type. Missing required fields on a known type are a
//! decode failure.

use doorlink_core::constants::{MSG_ACK, MSG_COMMAND, MSG_COMMAND_DENIED, MSG_HANDSHAKE};
use doorlink_core::{Error, Result};
use serde_json::Value;
use tracing::warn;

use crate::message::{CommandWord, InboundMessage, OutboundMessage};

/// Encode an outbound message to wire text.
///
/// # Errors
/// Returns `Error::Encode` if serialization fails (practically unreachable
/// for these types, but never panics).
pub fn encode_frame(message: &OutboundMessage) -> Result<String> {
    serde_json::to_string(message).map_err(|e| Error::Encode(e.to_string()))
}

/// Decode wire text into an inbound message.
///
/// # Errors
/// Returns `Error::InvalidMessageFormat` for non-JSON text or a non-object
/// frame, and `Error::MissingField` when a known `type` lacks a required
/// field.
pub fn decode_frame(text: &str) -> Result<InboundMessage> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| Error::InvalidMessageFormat(format!("Invalid JSON frame: {e}")))?;

    let msg_type = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MissingField("type".to_string()))?;

    match msg_type {
        MSG_COMMAND => {
            let word = require_str(&value, "command")?;
            Ok(InboundMessage::Command {
                command: CommandWord::parse(word),
            })
        }
        MSG_COMMAND_DENIED => Ok(InboundMessage::CommandDenied {
            command: require_str(&value, "command")?.to_string(),
            reason: require_str(&value, "reason")?.to_string(),
        }),
        MSG_HANDSHAKE => Ok(InboundMessage::Handshake),
        MSG_ACK => Ok(InboundMessage::Ack),
        other => Ok(InboundMessage::Unrecognized {
            raw_type: other.to_string(),
        }),
    }
}

/// Decode wire text, logging and dropping malformed frames.
///
/// This is the production decode path: a `None` means the frame was already
/// logged and must simply be skipped.
#[must_use]
pub fn decode_lenient(text: &str) -> Option<InboundMessage> {
    match decode_frame(text) {
        Ok(message) => Some(message),
        Err(e) => {
            warn!(error = %e, "Dropping malformed inbound frame");
            None
        }
    }
}

fn require_str<'a>(value: &'a Value, field: &str) -> Result<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MissingField(field.to_string()))
}
