//! Message and edge routing around the door state.

use doorlink_core::DoorCommand;
use doorlink_core::DoorPosition;
use doorlink_hardware::{Edge, IndicatorPanel};
use doorlink_network::MessageSink;
use doorlink_protocol::InboundMessage;
use tracing::{debug, info, warn};

use crate::door::Door;
use crate::notifier::Notifier;

/// Sole owner and writer of the [`Door`] state.
///
/// Every inbound controller message and every debounced switch edge funnels
/// through here, so there is exactly one place where state transitions and
/// their announcements happen. A local edge never touches the door directly:
/// it only raises a `button_command_request`, and the door moves when (and
/// if) the controller answers with a `command`.
pub struct Dispatcher<P: IndicatorPanel> {
    door: Door,
    panel: P,
    notifier: Notifier,
}

impl<P: IndicatorPanel> Dispatcher<P> {
    pub fn new(panel: P, notifier: Notifier) -> Self {
        Self {
            door: Door::new(),
            panel,
            notifier,
        }
    }

    /// Current physical position.
    pub fn position(&self) -> DoorPosition {
        self.door.position()
    }

    /// Drive the indicator panel to the initial (closed) state.
    ///
    /// Called once at startup, before the first connection attempt, so the
    /// indicators are meaningful even while the controller is unreachable.
    pub async fn initialize(&mut self) {
        if let Err(e) = self.panel.show(self.door.position()).await {
            warn!(error = %e, "Indicator panel unavailable at startup");
        }
    }

    /// Announce the current state after a successful (re)connect.
    pub async fn on_connected<S: MessageSink>(&mut self, sink: &mut S) {
        info!(position = %self.door.position().as_status_str(), "Connected, announcing state");
        self.notifier.status_update(sink, self.door.position()).await;
    }

    /// Route one inbound controller message.
    pub async fn on_inbound<S: MessageSink>(&mut self, message: InboundMessage, sink: &mut S) {
        match message {
            InboundMessage::Command { command } => match command.known() {
                Some(cmd) => self.execute(cmd, sink).await,
                None => {
                    warn!(command = command.as_str(), "Unknown command word");
                    self.notifier
                        .command_response(sink, command.as_str(), false, "Unknown command")
                        .await;
                }
            },
            InboundMessage::CommandDenied { command, reason } => {
                // The door never moved, so there is nothing to roll back.
                warn!(
                    command = command.as_str(),
                    reason = %reason,
                    "Controller denied command request"
                );
            }
            InboundMessage::Handshake => {
                info!("Handshake from controller, re-announcing state");
                self.notifier.status_update(sink, self.door.position()).await;
            }
            InboundMessage::Ack => {
                debug!("Ack from controller");
            }
            InboundMessage::Unrecognized { raw_type } => {
                warn!(r#type = %raw_type, "Unrecognized message type, ignoring");
            }
        }
    }

    /// Handle one debounced switch edge.
    ///
    /// A rising edge (press) requests the transition away from the current
    /// state; a falling edge (release) is not an input.
    pub async fn on_local_edge<S: MessageSink>(&mut self, edge: Edge, sink: &mut S) {
        match edge {
            Edge::Rising => {
                let command = DoorCommand::away_from(self.door.position());
                info!(command = command.as_str(), "Button press, requesting transition");
                self.notifier.button_request(sink, command).await;
            }
            Edge::Falling => {
                debug!("Button release");
            }
        }
    }

    /// Apply an authoritative command, update indicators, and respond.
    ///
    /// Ordering is fixed: the `command_response` always goes out before the
    /// `status_update`, and the status update only follows an actual change.
    async fn execute<S: MessageSink>(&mut self, command: DoorCommand, sink: &mut S) {
        let outcome = self.door.apply(command);
        info!(
            command = command.as_str(),
            changed = outcome.changed,
            "Command applied"
        );

        if outcome.changed {
            if let Err(e) = self.panel.show(self.door.position()).await {
                warn!(error = %e, "Indicator panel update failed");
            }
        }

        self.notifier
            .command_response(sink, command.as_str(), outcome.success, outcome.message)
            .await;

        if outcome.changed {
            self.notifier.status_update(sink, self.door.position()).await;
        }
    }
}
