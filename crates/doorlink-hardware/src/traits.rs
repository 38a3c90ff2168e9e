//! Hardware device trait definitions.
//!
//! These traits establish the contract between the node core and its two
//! peripherals: the manual switch and the door state indicator lamps.
//! Both are polled or driven from the single-threaded node loop, so the
//! contracts are deliberately small.

use crate::error::Result;
use doorlink_core::DoorPosition;

/// A raw digital level source: the manual door switch.
///
/// `read_level` must return promptly with the *current* level; it never
/// waits for a change. The node samples it once per poll tick and feeds the
/// reading through a [`Debouncer`](crate::Debouncer), so implementations do
/// not debounce themselves.
///
/// # Examples
///
/// ```no_run
/// use doorlink_hardware::{SwitchInput, Result};
///
/// async fn sample_once<S: SwitchInput>(switch: &mut S) -> Result<bool> {
///     switch.read_level().await
/// }
/// ```
pub trait SwitchInput: Send {
    /// Read the current raw level. `true` is logical-high (switch pressed).
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected or the read fails.
    async fn read_level(&mut self) -> Result<bool>;
}

/// The door state indicator: green lamp for open, red lamp for closed.
///
/// Driven once at startup and after every committed state transition. The
/// panel reflects *local authoritative* state only; it never changes on a
/// mere button request.
pub trait IndicatorPanel: Send {
    /// Light the lamp matching `position` and extinguish the other.
    ///
    /// # Errors
    ///
    /// Returns an error if the lamp hardware cannot be driven.
    async fn show(&mut self, position: DoorPosition) -> Result<()>;
}
