//! Mock message sink for testing the node without a socket.

use crate::client::LinkError;
use crate::sink::MessageSink;
use doorlink_protocol::OutboundMessage;

/// In-memory [`MessageSink`] that records everything sent through it.
///
/// The connected flag is switchable so tests can exercise the
/// drop-when-disconnected policy.
#[derive(Debug, Default)]
pub struct MockLink {
    connected: bool,
    sent: Vec<OutboundMessage>,
}

impl MockLink {
    /// Create a connected mock link.
    #[must_use]
    pub fn connected() -> Self {
        Self {
            connected: true,
            sent: Vec::new(),
        }
    }

    /// Create a disconnected mock link.
    #[must_use]
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Flip the simulated connection state.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Messages sent so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> &[OutboundMessage] {
        &self.sent
    }

    /// Drain and return the sent messages.
    pub fn take_sent(&mut self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.sent)
    }
}

impl MessageSink for MockLink {
    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn send(&mut self, message: &OutboundMessage) -> Result<(), LinkError> {
        if !self.connected {
            return Err(LinkError::NotConnected);
        }
        self.sent.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doorlink_core::{DoorPosition, Timestamp};

    fn status(ms: u64) -> OutboundMessage {
        OutboundMessage::StatusUpdate {
            physical_status: DoorPosition::Closed,
            timestamp: Timestamp::from_millis(ms),
        }
    }

    #[tokio::test]
    async fn test_records_when_connected() {
        let mut link = MockLink::connected();
        link.send(&status(1)).await.unwrap();
        link.send(&status(2)).await.unwrap();
        assert_eq!(link.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_rejects_when_disconnected() {
        let mut link = MockLink::disconnected();
        let result = link.send(&status(1)).await;
        assert!(matches!(result, Err(LinkError::NotConnected)));
        assert!(link.sent().is_empty());
    }
}
