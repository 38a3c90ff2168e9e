//! Protocol and timing constants for the doorlink node.
//!
//! This module centralizes the wire-level type discriminators and the timing
//! defaults shared between the node and its remote controller. The wire format
//! is a flat JSON object per frame with a required `type` field:
//!
//! ```text
//! {"type":"command","command":"open","timestamp":1234}
//! ```
//!
//! # Message types
//!
//! | Direction | `type` value | Payload fields |
//! |-----------|------------------------|------------------------------------|
//! | outbound | `status_update` | `physical_status`, `timestamp` |
//! | outbound | `button_command_request` | `command`, `timestamp` |
//! | outbound | `command_response` | `command`, `success`, `message`, `timestamp` |
//! | inbound | `command` | `command` |
//! | inbound | `command_denied` | `command`, `reason` |
//! | inbound | `handshake` | (none) |
//! | inbound | `ack` | (none) |
//!
//! Timing defaults mirror the deployed firmware: a 50ms switch debounce
//! window, a 5s reconnect interval, and a 10ms poll cadence.

// ============================================================================
// Wire message type discriminators
// ============================================================================

/// Outbound: announces the current physical door state.
pub const MSG_STATUS_UPDATE: &str = "status_update";

/// Outbound: advisory request originating from the local switch.
pub const MSG_BUTTON_COMMAND_REQUEST: &str = "button_command_request";

/// Outbound: result of applying a controller command.
pub const MSG_COMMAND_RESPONSE: &str = "command_response";

/// Inbound: authoritative state-change command from the controller.
pub const MSG_COMMAND: &str = "command";

/// Inbound: the controller refused a button command request.
pub const MSG_COMMAND_DENIED: &str = "command_denied";

/// Inbound: the controller (re)initialized and needs a status announcement.
pub const MSG_HANDSHAKE: &str = "handshake";

/// Inbound: generic acknowledgment, log-only.
pub const MSG_ACK: &str = "ack";

// ============================================================================
// Command and status words
// ============================================================================

/// Wire word for the open command / open status.
pub const WORD_OPEN: &str = "open";

/// Wire word for the close command.
pub const WORD_CLOSE: &str = "close";

/// Wire word for the closed status.
pub const WORD_CLOSED: &str = "closed";

// ============================================================================
// Timing defaults
// ============================================================================

/// Minimum time (ms) a raw switch reading must hold before it counts as an edge.
pub const DEFAULT_DEBOUNCE_WINDOW_MS: u64 = 50;

/// Fixed interval (ms) between reconnection attempts. No backoff growth.
pub const DEFAULT_RECONNECT_INTERVAL_MS: u64 = 5000;

/// Steady-state poll loop cadence (ms): one I/O step + one sampling step per tick.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

// ============================================================================
// Endpoint defaults
// ============================================================================

/// Default controller host.
pub const DEFAULT_CONTROLLER_HOST: &str = "127.0.0.1";

/// Default controller port.
pub const DEFAULT_CONTROLLER_PORT: u16 = 5000;

/// Default WebSocket path prefix; the door id is appended as the last segment.
pub const DEFAULT_WS_PATH: &str = "/ws";

/// Default door identifier.
pub const DEFAULT_DOOR_ID: &str = "DOOR-001";

// ============================================================================
// Identifier limits
// ============================================================================

/// Minimum door identifier length.
pub const MIN_DOOR_ID_LENGTH: usize = 1;

/// Maximum door identifier length.
pub const MAX_DOOR_ID_LENGTH: usize = 32;
