//! Node configuration.
//!
//! Defaults match the deployed fleet; every field can be overridden through
//! `DOORLINK_*` environment variables, which is how the node is configured
//! in practice (there is no config file).
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `DOORLINK_CONTROLLER_HOST` | `controller_host` | `127.0.0.1` |
//! | `DOORLINK_CONTROLLER_PORT` | `controller_port` | `5000` |
//! | `DOORLINK_WS_PATH` | `ws_path` | `/ws` |
//! | `DOORLINK_DOOR_ID` | `door_id` | `DOOR-001` |
//! | `DOORLINK_DEBOUNCE_MS` | `debounce_window` | `50` |
//! | `DOORLINK_RECONNECT_MS` | `reconnect_interval` | `5000` |
//! | `DOORLINK_POLL_MS` | `poll_interval` | `10` |

use std::time::Duration;

use doorlink_core::constants::{
    DEFAULT_CONTROLLER_HOST, DEFAULT_CONTROLLER_PORT, DEFAULT_DEBOUNCE_WINDOW_MS, DEFAULT_DOOR_ID,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_RECONNECT_INTERVAL_MS, DEFAULT_WS_PATH,
};
use doorlink_core::{DoorId, Error, Result, millis};
use doorlink_network::LinkConfig;

/// Everything the node needs to run.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Controller hostname or address.
    pub controller_host: String,

    /// Controller port.
    pub controller_port: u16,

    /// WebSocket path prefix; the door id is appended as the last segment.
    pub ws_path: String,

    /// This node's door identity.
    pub door_id: DoorId,

    /// How long a raw switch level must hold before an edge is committed.
    pub debounce_window: Duration,

    /// Fixed delay between controller reconnection attempts.
    pub reconnect_interval: Duration,

    /// Cadence of the switch sampling / receive loop.
    pub poll_interval: Duration,
}

impl NodeConfig {
    /// Defaults overlaid with any `DOORLINK_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when a set variable fails to parse, and
    /// `Error::InvalidDoorId` for a malformed `DOORLINK_DOOR_ID`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("DOORLINK_CONTROLLER_HOST") {
            config.controller_host = host;
        }
        if let Some(port) = env_parse("DOORLINK_CONTROLLER_PORT")? {
            config.controller_port = port;
        }
        if let Ok(path) = std::env::var("DOORLINK_WS_PATH") {
            config.ws_path = path;
        }
        if let Ok(id) = std::env::var("DOORLINK_DOOR_ID") {
            config.door_id = DoorId::new(&id)?;
        }
        if let Some(ms) = env_parse("DOORLINK_DEBOUNCE_MS")? {
            config.debounce_window = millis(ms);
        }
        if let Some(ms) = env_parse("DOORLINK_RECONNECT_MS")? {
            config.reconnect_interval = millis(ms);
        }
        if let Some(ms) = env_parse("DOORLINK_POLL_MS")? {
            config.poll_interval = millis(ms);
        }

        Ok(config)
    }

    /// Derive the controller link configuration.
    #[must_use]
    pub fn link_config(&self) -> LinkConfig {
        let mut link = LinkConfig::for_door(
            &self.controller_host,
            self.controller_port,
            &self.ws_path,
            &self.door_id,
        );
        link.reconnect_interval = self.reconnect_interval;
        link
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            controller_host: DEFAULT_CONTROLLER_HOST.to_string(),
            controller_port: DEFAULT_CONTROLLER_PORT,
            ws_path: DEFAULT_WS_PATH.to_string(),
            door_id: DoorId::new(DEFAULT_DOOR_ID).expect("default door id is valid"),
            debounce_window: millis(DEFAULT_DEBOUNCE_WINDOW_MS),
            reconnect_interval: millis(DEFAULT_RECONNECT_INTERVAL_MS),
            poll_interval: millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{name}: cannot parse {raw:?}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fleet_settings() {
        let config = NodeConfig::default();
        assert_eq!(config.controller_host, "127.0.0.1");
        assert_eq!(config.controller_port, 5000);
        assert_eq!(config.door_id.as_str(), "DOOR-001");
        assert_eq!(config.debounce_window, Duration::from_millis(50));
        assert_eq!(config.reconnect_interval, Duration::from_millis(5000));
        assert_eq!(config.poll_interval, Duration::from_millis(10));
    }

    #[test]
    fn test_link_config_carries_url_and_interval() {
        let mut config = NodeConfig::default();
        config.controller_host = "controller.local".to_string();
        config.controller_port = 9000;
        config.door_id = DoorId::new("GATE-7").unwrap();
        config.reconnect_interval = Duration::from_millis(250);

        let link = config.link_config();
        assert_eq!(link.url, "ws://controller.local:9000/ws/GATE-7");
        assert_eq!(link.reconnect_interval, Duration::from_millis(250));
    }
}
