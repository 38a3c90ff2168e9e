//! Mock indicator panel implementation for testing and development.

use crate::{Result, traits::IndicatorPanel};
use doorlink_core::DoorPosition;
use std::sync::{Arc, Mutex};

/// Mock red/green indicator panel.
///
/// Records every position shown so tests can assert that the lamps track
/// committed state transitions, and only those.
#[derive(Debug)]
pub struct MockPanel {
    shown: Arc<Mutex<Vec<DoorPosition>>>,
}

impl MockPanel {
    /// Create a mock panel and an observation handle.
    pub fn new() -> (Self, MockPanelHandle) {
        let shown = Arc::new(Mutex::new(Vec::new()));
        let panel = Self {
            shown: Arc::clone(&shown),
        };
        (panel, MockPanelHandle { shown })
    }
}

impl IndicatorPanel for MockPanel {
    async fn show(&mut self, position: DoorPosition) -> Result<()> {
        self.shown
            .lock()
            .map_err(|_| crate::HardwareError::communication("panel mutex poisoned"))?
            .push(position);
        Ok(())
    }
}

/// Handle for observing what a [`MockPanel`] has displayed.
#[derive(Debug, Clone)]
pub struct MockPanelHandle {
    shown: Arc<Mutex<Vec<DoorPosition>>>,
}

impl MockPanelHandle {
    /// All positions shown so far, oldest first.
    pub fn history(&self) -> Vec<DoorPosition> {
        self.shown.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// The position currently displayed, if any.
    pub fn current(&self) -> Option<DoorPosition> {
        self.shown.lock().ok().and_then(|v| v.last().copied())
    }
}
