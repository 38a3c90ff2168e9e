//! Authoritative local door state and its single transition rule.

use doorlink_core::{DoorCommand, DoorPosition};

/// Result of applying a command to the door.
///
/// A command matching the current state is *not* a failure: the controller
/// asked for a state the door is already in, so `success` stays `true` and
/// only `changed` distinguishes the no-op. The message wording is part of
/// the protocol surface (the controller displays it verbatim).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Whether the physical state actually moved.
    pub changed: bool,

    /// Whether the command was accepted.
    pub success: bool,

    /// Human-readable result for the `command_response` frame.
    pub message: String,
}

/// The one piece of authoritative local state.
///
/// Created `Closed` at process start and owned exclusively by the
/// [`Dispatcher`](crate::Dispatcher); nothing else mutates it, and the only
/// mutation path is [`Door::apply`] driven by an inbound controller command.
#[derive(Debug)]
pub struct Door {
    position: DoorPosition,
}

impl Door {
    /// A closed door.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: DoorPosition::Closed,
        }
    }

    /// Current physical position.
    #[must_use]
    pub fn position(&self) -> DoorPosition {
        self.position
    }

    /// Apply an authoritative command. Idempotent.
    pub fn apply(&mut self, command: DoorCommand) -> ApplyOutcome {
        let target = command.target();

        if self.position == target {
            let message = match target {
                DoorPosition::Open => "Door was already open",
                DoorPosition::Closed => "Door was already closed",
            };
            return ApplyOutcome {
                changed: false,
                success: true,
                message: message.to_string(),
            };
        }

        self.position = target;
        let message = match target {
            DoorPosition::Open => "Door opened successfully",
            DoorPosition::Closed => "Door closed successfully",
        };
        ApplyOutcome {
            changed: true,
            success: true,
            message: message.to_string(),
        }
    }
}

impl Default for Door {
    fn default() -> Self {
        Self::new()
    }
}
