//! Mock hardware for development and tests.
//!
//! Each mock device comes with a cloneable handle: the device itself moves
//! into the node, the handle stays with the test (or the development REPL)
//! to drive levels and observe lamp output.

mod panel;
mod switch;

pub use panel::{MockPanel, MockPanelHandle};
pub use switch::{MockSwitch, MockSwitchHandle};
