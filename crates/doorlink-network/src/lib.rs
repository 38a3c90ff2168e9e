//! Controller connectivity for the doorlink node.
//!
//! The node keeps one persistent WebSocket connection to its controller,
//! identified by the door id in the URL path (`ws://host:port/ws/DOOR-001`).
//! [`ControllerLink`] owns that connection and its recovery policy: on any
//! loss it retries at a fixed interval, forever, with no backoff growth.
//!
//! Outbound traffic goes through the [`MessageSink`] seam so the message
//! building layer can be tested against [`mock::MockLink`] without a socket.

#![allow(async_fn_in_trait)]

pub mod client;
pub mod mock;
pub mod sink;

pub use client::{ControllerLink, LinkConfig, LinkError};
pub use sink::MessageSink;
