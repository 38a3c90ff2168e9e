//! Outbound message construction and best-effort delivery.

use doorlink_core::{DoorCommand, DoorPosition, TickClock};
use doorlink_network::MessageSink;
use doorlink_protocol::OutboundMessage;
use tracing::warn;

/// Builds each outbound frame with a fresh tick timestamp and hands it to
/// the link.
///
/// Delivery is at-most-once: if the link is down the message is logged and
/// discarded, never queued or retried. A reconnect triggers
/// a fresh `status_update`, which is all the controller needs to catch up.
#[derive(Debug)]
pub struct Notifier {
    clock: TickClock,
}

impl Notifier {
    /// Notifier stamping messages from `clock`.
    #[must_use]
    pub fn new(clock: TickClock) -> Self {
        Self { clock }
    }

    /// Emit a `status_update` with the current physical state.
    pub async fn status_update<S: MessageSink>(&self, sink: &mut S, position: DoorPosition) {
        let message = OutboundMessage::StatusUpdate {
            physical_status: position,
            timestamp: self.clock.now(),
        };
        self.deliver(sink, message).await;
    }

    /// Emit a `button_command_request` proposing `command`.
    pub async fn button_request<S: MessageSink>(&self, sink: &mut S, command: DoorCommand) {
        let message = OutboundMessage::ButtonCommandRequest {
            command,
            timestamp: self.clock.now(),
        };
        self.deliver(sink, message).await;
    }

    /// Emit a `command_response` reporting the result of a command.
    pub async fn command_response<S: MessageSink>(
        &self,
        sink: &mut S,
        command: impl Into<String>,
        success: bool,
        message: impl Into<String>,
    ) {
        let message = OutboundMessage::CommandResponse {
            command: command.into(),
            success,
            message: message.into(),
            timestamp: self.clock.now(),
        };
        self.deliver(sink, message).await;
    }

    async fn deliver<S: MessageSink>(&self, sink: &mut S, message: OutboundMessage) {
        if !sink.is_connected() {
            warn!(kind = message.kind(), "Link down, discarding outbound message");
            return;
        }
        if let Err(e) = sink.send(&message).await {
            warn!(kind = message.kind(), error = %e, "Send failed, message discarded");
        }
    }
}
