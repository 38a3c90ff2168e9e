//! Mock switch implementation for testing and development.

use crate::{Result, traits::SwitchInput};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Mock manual switch.
///
/// Holds a shared level that a [`MockSwitchHandle`] can flip at any time;
/// `read_level` simply reports the current value, mirroring how a real GPIO
/// input pin behaves under polling.
///
/// # Examples
///
/// ```
/// use doorlink_hardware::mock::MockSwitch;
/// use doorlink_hardware::SwitchInput;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> doorlink_hardware::Result<()> {
/// let (mut switch, handle) = MockSwitch::new();
/// assert!(!switch.read_level().await?);
///
/// handle.set_high();
/// assert!(switch.read_level().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MockSwitch {
    level: Arc<AtomicBool>,
}

impl MockSwitch {
    /// Create a mock switch starting at logical-low.
    ///
    /// Returns the switch and a handle for driving its level.
    pub fn new() -> (Self, MockSwitchHandle) {
        let level = Arc::new(AtomicBool::new(false));
        let switch = Self {
            level: Arc::clone(&level),
        };
        (switch, MockSwitchHandle { level })
    }
}

impl SwitchInput for MockSwitch {
    async fn read_level(&mut self) -> Result<bool> {
        Ok(self.level.load(Ordering::Relaxed))
    }
}

/// Handle for driving a [`MockSwitch`]. Cloneable and thread-safe.
#[derive(Debug, Clone)]
pub struct MockSwitchHandle {
    level: Arc<AtomicBool>,
}

impl MockSwitchHandle {
    /// Drive the switch to logical-high (pressed).
    pub fn set_high(&self) {
        self.level.store(true, Ordering::Relaxed);
    }

    /// Drive the switch to logical-low (released).
    pub fn set_low(&self) {
        self.level.store(false, Ordering::Relaxed);
    }

    /// Drive the switch to an explicit level.
    pub fn set_level(&self, high: bool) {
        self.level.store(high, Ordering::Relaxed);
    }
}
