use crate::{
    Result,
    constants::{MAX_DOOR_ID_LENGTH, MIN_DOOR_ID_LENGTH, WORD_CLOSE, WORD_CLOSED, WORD_OPEN},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Physical state of the door.
///
/// There is exactly one instance of this value per node, owned by the command
/// dispatcher. It is created as `Closed` at process start and only ever
/// changes as a direct consequence of an authoritative controller command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorPosition {
    Open,
    Closed,
}

impl DoorPosition {
    /// The other position.
    #[inline]
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            DoorPosition::Open => DoorPosition::Closed,
            DoorPosition::Closed => DoorPosition::Open,
        }
    }

    /// Wire word for the `physical_status` field (`"open"` / `"closed"`).
    #[must_use]
    pub fn as_status_str(self) -> &'static str {
        match self {
            DoorPosition::Open => WORD_OPEN,
            DoorPosition::Closed => WORD_CLOSED,
        }
    }

    /// Returns `true` if the door is open.
    #[inline]
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, DoorPosition::Open)
    }
}

impl fmt::Display for DoorPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_status_str())
    }
}

/// A recognized door command.
///
/// Only the remote controller issues these with authority; the local switch
/// can merely propose one via a button command request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorCommand {
    Open,
    Close,
}

impl DoorCommand {
    /// The position this command drives the door toward.
    #[inline]
    #[must_use]
    pub fn target(self) -> DoorPosition {
        match self {
            DoorCommand::Open => DoorPosition::Open,
            DoorCommand::Close => DoorPosition::Closed,
        }
    }

    /// The command that moves the door *away* from `position`.
    ///
    /// Used when the local switch fires: the proposed command is always the
    /// opposite of the current physical state.
    #[must_use]
    pub fn away_from(position: DoorPosition) -> Self {
        match position {
            DoorPosition::Open => DoorCommand::Close,
            DoorPosition::Closed => DoorCommand::Open,
        }
    }

    /// Wire word for the `command` field (`"open"` / `"close"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DoorCommand::Open => WORD_OPEN,
            DoorCommand::Close => WORD_CLOSE,
        }
    }
}

impl fmt::Display for DoorCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DoorCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            WORD_OPEN => Ok(DoorCommand::Open),
            WORD_CLOSE => Ok(DoorCommand::Close),
            other => Err(Error::InvalidMessageFormat(format!(
                "Unknown door command: {other}"
            ))),
        }
    }
}

/// Stable door identifier (e.g. `DOOR-001`).
///
/// Appended as the last segment of the controller WebSocket path so the
/// controller can associate the connection with a door.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoorId(String);

impl DoorId {
    /// Create a new door id with validation.
    ///
    /// The id is normalized (trimmed and converted to uppercase) before
    /// validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidDoorId` if:
    /// - The id length is not between 1-32 characters
    /// - The id contains characters other than ASCII alphanumerics, `-`, `_`
    pub fn new(id: &str) -> Result<Self> {
        let id = id.trim().to_uppercase();

        let len = id.len();
        if !(MIN_DOOR_ID_LENGTH..=MAX_DOOR_ID_LENGTH).contains(&len) {
            return Err(Error::InvalidDoorId(format!(
                "Door id must be {MIN_DOOR_ID_LENGTH}-{MAX_DOOR_ID_LENGTH} chars, got {len}"
            )));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::InvalidDoorId(format!(
                "Door id must be ASCII alphanumeric with '-' or '_': {id}"
            )));
        }

        Ok(DoorId(id))
    }

    /// Get the door id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DoorId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DoorId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DoorId::new(s)
    }
}

/// Monotonic tick timestamp in milliseconds since process start.
///
/// The controller treats timestamps as opaque ordering hints; the node has no
/// wall clock, so frames carry the tick count the way the deployed firmware
/// reported `millis()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from a raw millisecond tick count.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    /// Raw millisecond tick count.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of [`Timestamp`] values, anchored at a fixed origin instant.
#[derive(Debug, Clone)]
pub struct TickClock {
    origin: Instant,
}

impl TickClock {
    /// Clock anchored at the current instant; subsequent reads count up from 0.
    #[must_use]
    pub fn new() -> Self {
        TickClock {
            origin: Instant::now(),
        }
    }

    /// Clock anchored at an explicit origin. Lets tests pin tick values.
    #[must_use]
    pub fn starting_at(origin: Instant) -> Self {
        TickClock { origin }
    }

    /// Milliseconds elapsed since the origin.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed().as_millis() as u64)
    }

    /// Timestamp for an arbitrary instant at or after the origin.
    #[must_use]
    pub fn at(&self, instant: Instant) -> Timestamp {
        Timestamp(
            instant
                .saturating_duration_since(self.origin)
                .as_millis() as u64,
        )
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience: millisecond durations for config plumbing.
#[must_use]
pub fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
