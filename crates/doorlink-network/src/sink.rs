//! The outbound message seam.

use crate::client::LinkError;
use doorlink_protocol::OutboundMessage;

/// Destination for outbound protocol messages.
///
/// Implementations are best-effort: a send may fail or be impossible while
/// disconnected, and callers are expected to discard the message in that
/// case rather than queue it. There is exactly one production
/// implementation ([`ControllerLink`](crate::ControllerLink)) and one test
/// implementation ([`MockLink`](crate::mock::MockLink)).
pub trait MessageSink: Send {
    /// Whether the underlying transport is currently established.
    fn is_connected(&self) -> bool;

    /// Transmit one message.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotConnected`] when down, or a transport error
    /// if the connection fails mid-send (the link is dropped in that case).
    async fn send(&mut self, message: &OutboundMessage) -> Result<(), LinkError>;
}
