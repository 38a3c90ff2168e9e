//! Wire message model and JSON frame codec for the doorlink protocol.
//!
//! Every frame exchanged with the controller is a single flat JSON object
//! with a required `type` discriminator. Outbound frames additionally carry a
//! monotonic `timestamp` tick. See [`message`] for the variant model and
//! [`codec`] for the encode/decode boundary, including the lenient decode
//! path that logs and drops malformed frames instead of surfacing them to
//! the dispatcher.

pub mod codec;
pub mod message;

pub use codec::{decode_frame, decode_lenient, encode_frame};
pub use message::{CommandWord, InboundMessage, OutboundMessage};
