//! Doorlink node binary.
//!
//! Runs the node against mock hardware: type `press` on stdin to simulate a
//! held button press on the door switch. Real GPIO backends plug in through
//! the same `SwitchInput` / `IndicatorPanel` traits.

use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use doorlink_hardware::mock::{MockPanel, MockSwitch, MockSwitchHandle};
use doorlink_node::{NodeConfig, NodeRuntime};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = NodeConfig::from_env().context("Invalid DOORLINK_* configuration")?;
    info!(
        door_id = %config.door_id,
        controller = %format!("{}:{}", config.controller_host, config.controller_port),
        "Doorlink node {}",
        doorlink_core::VERSION
    );

    let (switch, switch_handle) = MockSwitch::new();
    let (panel, _panel_handle) = MockPanel::new();

    tokio::spawn(drive_switch_from_stdin(switch_handle));

    NodeRuntime::new(config, switch, panel).run().await;
    Ok(())
}

/// Turn each `press` line on stdin into a debounce-length button press.
async fn drive_switch_from_stdin(handle: MockSwitchHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!("Type 'press' to simulate the door switch");

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim() == "press" {
            handle.set_high();
            // Held well past the debounce window, then released.
            tokio::time::sleep(Duration::from_millis(120)).await;
            handle.set_low();
        }
    }
}
