//! The doorlink node: control core of a networked physical-access door.
//!
//! Three cooperating pieces run on one task:
//!
//! - the debounced switch sampler (see `doorlink-hardware`), which turns raw
//!   levels into logical edges;
//! - the [`Dispatcher`], sole owner and writer of the [`Door`] state, which
//!   routes inbound controller messages and local edges;
//! - the [`Notifier`], which builds timestamped outbound frames and pushes
//!   them through the link, best-effort.
//!
//! The remote controller is the single source of truth: a local switch edge
//! only ever *requests* a transition (`button_command_request`); the door
//! state moves exclusively on an inbound `command`. Every committed state
//! change is immediately followed by a `status_update`, and a fresh
//! `status_update` is announced on every (re)connect and on every inbound
//! `handshake`, because the controller keeps no state across restarts.

pub mod config;
pub mod dispatcher;
pub mod door;
pub mod notifier;
pub mod runtime;

pub use config::NodeConfig;
pub use dispatcher::Dispatcher;
pub use door::{ApplyOutcome, Door};
pub use notifier::Notifier;
pub use runtime::NodeRuntime;
