//! Hardware abstraction layer for the doorlink node.
//!
//! This crate isolates the node core from physical I/O. Two seams exist:
//!
//! - [`SwitchInput`]: a raw digital level source (the manual switch). The
//!   node polls it; all debouncing happens in software via [`Debouncer`].
//! - [`IndicatorPanel`]: the red/green lamp pair that mirrors the door's
//!   physical state.
//!
//! Traits use native `async fn` (Edition 2024 RPITIT); callers are expected
//! to use generic type parameters rather than trait objects. Real GPIO
//! drivers live behind feature flags; the [`mock`] module provides
//! channel-free, programmatically controllable implementations for
//! development and tests.

#![allow(async_fn_in_trait)]

pub mod debounce;
pub mod error;
pub mod mock;
pub mod traits;

pub use debounce::{Debouncer, Edge};
pub use error::{HardwareError, Result};
pub use traits::{IndicatorPanel, SwitchInput};
