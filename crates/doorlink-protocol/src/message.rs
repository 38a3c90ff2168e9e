//! Protocol message variants.
//!
//! Inbound and outbound messages are modeled as separate enums because the
//! two directions share no variants and have different failure modes: an
//! unknown outbound type cannot be constructed at all, while an unknown
//! inbound type must survive decoding as [`InboundMessage::Unrecognized`]
//! so the dispatcher can log it without dropping the connection.

use doorlink_core::{DoorCommand, DoorPosition, Timestamp};
use doorlink_core::constants::{
    MSG_BUTTON_COMMAND_REQUEST, MSG_COMMAND_RESPONSE, MSG_STATUS_UPDATE, WORD_CLOSE, WORD_OPEN,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The command word carried by an inbound `command` frame.
///
/// The raw word of an unrecognized command is preserved so the failure
/// response can echo it back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandWord {
    Open,
    Close,
    Unknown(String),
}

impl CommandWord {
    /// Parse a wire word. Never fails; anything unrecognized is `Unknown`.
    #[must_use]
    pub fn parse(word: &str) -> Self {
        match word {
            WORD_OPEN => CommandWord::Open,
            WORD_CLOSE => CommandWord::Close,
            other => CommandWord::Unknown(other.to_string()),
        }
    }

    /// The recognized door command, if any.
    #[must_use]
    pub fn known(&self) -> Option<DoorCommand> {
        match self {
            CommandWord::Open => Some(DoorCommand::Open),
            CommandWord::Close => Some(DoorCommand::Close),
            CommandWord::Unknown(_) => None,
        }
    }

    /// The wire word, including unrecognized ones.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            CommandWord::Open => WORD_OPEN,
            CommandWord::Close => WORD_CLOSE,
            CommandWord::Unknown(word) => word,
        }
    }
}

impl fmt::Display for CommandWord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A decoded frame from the controller.
///
/// Inbound frames may carry extra fields (e.g. a controller-side timestamp);
/// decoding ignores anything beyond the fields modeled here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Authoritative state-change command. The only message that may mutate
    /// door state.
    Command { command: CommandWord },

    /// The controller refused an earlier button command request. Log-only;
    /// the node tracks no pending-request state to roll back.
    CommandDenied { command: String, reason: String },

    /// The controller (re)initialized and needs a fresh status announcement.
    Handshake,

    /// Generic acknowledgment. Log-only.
    Ack,

    /// Well-formed frame with a `type` this node does not understand.
    Unrecognized { raw_type: String },
}

/// A frame to be sent to the controller.
///
/// Every variant carries the node's monotonic tick [`Timestamp`]. Delivery
/// is best-effort at-most-once: if the link is down when a message is built,
/// it is discarded, never queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Announces the current physical door state.
    StatusUpdate {
        physical_status: DoorPosition,
        timestamp: Timestamp,
    },

    /// Advisory request originating from the local switch. The controller
    /// may grant it (with a later `command`) or deny it.
    ButtonCommandRequest {
        command: DoorCommand,
        timestamp: Timestamp,
    },

    /// Result of applying a controller command.
    CommandResponse {
        command: String,
        success: bool,
        message: String,
        timestamp: Timestamp,
    },
}

impl OutboundMessage {
    /// The wire `type` word, also used as the message kind in logs.
    ///
    /// The serde tag on each variant must serialize to exactly this word;
    /// the wire-format tests hold the two together.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundMessage::StatusUpdate { .. } => MSG_STATUS_UPDATE,
            OutboundMessage::ButtonCommandRequest { .. } => MSG_BUTTON_COMMAND_REQUEST,
            OutboundMessage::CommandResponse { .. } => MSG_COMMAND_RESPONSE,
        }
    }
}
