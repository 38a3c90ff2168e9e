//! End-to-end node tests against an in-process controller.
//!
//! These run the real [`NodeRuntime`] loop over a real WebSocket, with the
//! controller side played by the test. Intervals are shrunk so the whole
//! exchange fits in milliseconds.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{WebSocketStream, accept_async};

use doorlink_core::{DoorId, DoorPosition, millis};
use doorlink_hardware::mock::{MockPanel, MockPanelHandle, MockSwitch, MockSwitchHandle};
use doorlink_node::{NodeConfig, NodeRuntime};

type ServerWs = WebSocketStream<TcpStream>;

const STEP: Duration = Duration::from_secs(5);

struct Harness {
    listener: TcpListener,
    switch: MockSwitchHandle,
    panel: MockPanelHandle,
    node: tokio::task::JoinHandle<()>,
}

/// Bind a controller endpoint and start a node pointed at it.
async fn start_node() -> Harness {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let config = NodeConfig {
        controller_host: "127.0.0.1".to_string(),
        controller_port: port,
        ws_path: "/ws".to_string(),
        door_id: DoorId::new("DOOR-001").unwrap(),
        debounce_window: millis(20),
        reconnect_interval: millis(25),
        poll_interval: millis(5),
    };

    let (switch, switch_handle) = MockSwitch::new();
    let (panel, panel_handle) = MockPanel::new();

    let node = tokio::spawn(NodeRuntime::new(config, switch, panel).run());

    Harness {
        listener,
        switch: switch_handle,
        panel: panel_handle,
        node,
    }
}

async fn accept(listener: &TcpListener) -> ServerWs {
    let (stream, _) = timeout(STEP, listener.accept()).await.unwrap().unwrap();
    accept_async(stream).await.unwrap()
}

/// Next text frame from the node, decoded as JSON.
async fn next_frame(ws: &mut ServerWs) -> serde_json::Value {
    loop {
        let frame = timeout(STEP, ws.next())
            .await
            .expect("timed out waiting for node frame")
            .expect("stream ended")
            .expect("transport error");
        if let WsMessage::Text(text) = frame {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

async fn send_frame(ws: &mut ServerWs, text: &str) {
    ws.send(WsMessage::text(text)).await.unwrap();
}

/// Hold the switch past the debounce window, then release it.
async fn press_switch(handle: &MockSwitchHandle) {
    handle.set_high();
    tokio::time::sleep(Duration::from_millis(60)).await;
    handle.set_low();
}

#[tokio::test]
async fn node_announces_executes_and_requests() {
    let harness = start_node().await;
    let mut ws = accept(&harness.listener).await;

    // The very first frame announces the boot state.
    let hello = next_frame(&mut ws).await;
    assert_eq!(hello["type"], "status_update");
    assert_eq!(hello["physical_status"], "closed");
    assert!(hello["timestamp"].is_u64());

    // An authoritative open: response first, then the new status.
    send_frame(&mut ws, r#"{"type":"command","command":"open"}"#).await;

    let response = next_frame(&mut ws).await;
    assert_eq!(response["type"], "command_response");
    assert_eq!(response["command"], "open");
    assert_eq!(response["success"], true);
    assert_eq!(response["message"], "Door opened successfully");

    let status = next_frame(&mut ws).await;
    assert_eq!(status["type"], "status_update");
    assert_eq!(status["physical_status"], "open");

    // The indicator panel tracked the transition (it is updated before the
    // response goes out).
    assert_eq!(harness.panel.current(), Some(DoorPosition::Open));

    // A redundant open succeeds but changes nothing.
    send_frame(&mut ws, r#"{"type":"command","command":"open"}"#).await;

    let response = next_frame(&mut ws).await;
    assert_eq!(response["type"], "command_response");
    assert_eq!(response["success"], true);
    assert_eq!(response["message"], "Door was already open");

    // A switch press produces a request, never a local transition. Since
    // the door is open the proposed command is close. That this is the very
    // next frame also proves the redundant open sent no status update.
    press_switch(&harness.switch).await;

    let request = next_frame(&mut ws).await;
    assert_eq!(request["type"], "button_command_request");
    assert_eq!(request["command"], "close");

    harness.node.abort();
}

#[tokio::test]
async fn unknown_command_word_is_rejected() {
    let harness = start_node().await;
    let mut ws = accept(&harness.listener).await;
    next_frame(&mut ws).await; // boot status

    send_frame(&mut ws, r#"{"type":"command","command":"toggle"}"#).await;

    let response = next_frame(&mut ws).await;
    assert_eq!(response["type"], "command_response");
    assert_eq!(response["command"], "toggle");
    assert_eq!(response["success"], false);
    assert_eq!(response["message"], "Unknown command");

    harness.node.abort();
}

#[tokio::test]
async fn malformed_frames_do_not_disturb_the_node() {
    let harness = start_node().await;
    let mut ws = accept(&harness.listener).await;
    next_frame(&mut ws).await; // boot status

    // Garbage, a known type with a missing field, an unknown type, then a
    // handshake, which must still get its status update.
    send_frame(&mut ws, "not json at all").await;
    send_frame(&mut ws, r#"{"type":"command"}"#).await;
    send_frame(&mut ws, r#"{"type":"telemetry_poll"}"#).await;
    send_frame(&mut ws, r#"{"type":"handshake"}"#).await;

    let status = next_frame(&mut ws).await;
    assert_eq!(status["type"], "status_update");
    assert_eq!(status["physical_status"], "closed");

    harness.node.abort();
}

#[tokio::test]
async fn command_denied_is_acknowledged_silently() {
    let harness = start_node().await;
    let mut ws = accept(&harness.listener).await;
    next_frame(&mut ws).await; // boot status

    send_frame(
        &mut ws,
        r#"{"type":"command_denied","command":"open","reason":"outside schedule"}"#,
    )
    .await;

    // Nothing comes back for a denial; a handshake afterwards shows the
    // state never moved.
    send_frame(&mut ws, r#"{"type":"handshake"}"#).await;

    let status = next_frame(&mut ws).await;
    assert_eq!(status["type"], "status_update");
    assert_eq!(status["physical_status"], "closed");

    harness.node.abort();
}

#[tokio::test]
async fn node_reconnects_and_reannounces_current_state() {
    let harness = start_node().await;
    let mut ws = accept(&harness.listener).await;
    next_frame(&mut ws).await; // boot status

    // Move the door so the re-announcement is distinguishable from boot.
    send_frame(&mut ws, r#"{"type":"command","command":"open"}"#).await;
    next_frame(&mut ws).await; // command_response
    next_frame(&mut ws).await; // status_update open

    // Drop the connection out from under the node.
    ws.close(None).await.unwrap();
    drop(ws);

    // The node comes back on its own and announces the *current* state.
    let mut ws = accept(&harness.listener).await;
    let status = next_frame(&mut ws).await;
    assert_eq!(status["type"], "status_update");
    assert_eq!(status["physical_status"], "open");

    harness.node.abort();
}

#[tokio::test]
async fn switch_keeps_sampling_during_an_outage() {
    let harness = start_node().await;
    let addr = harness.listener.local_addr().unwrap();
    let mut ws = accept(&harness.listener).await;
    next_frame(&mut ws).await; // boot status

    // Kill the connection and the endpoint: every reconnection attempt is
    // refused until the listener comes back.
    ws.close(None).await.unwrap();
    drop(ws);
    drop(harness.listener);

    // A full press-and-release entirely inside the outage. The debouncer
    // must commit both edges on time; the resulting request is dropped by
    // the disconnected link, not deferred.
    press_switch(&harness.switch).await;
    tokio::time::sleep(Duration::from_millis(60)).await;

    // Controller comes back. The node reconnects and re-announces.
    let listener = TcpListener::bind(addr).await.unwrap();
    let mut ws = accept(&listener).await;
    let status = next_frame(&mut ws).await;
    assert_eq!(status["type"], "status_update");
    assert_eq!(status["physical_status"], "closed");

    // The outage-era press must not replay after reconnect: the frame after
    // a handshake probe is its status update, not a stale request.
    send_frame(&mut ws, r#"{"type":"handshake"}"#).await;
    let next = next_frame(&mut ws).await;
    assert_eq!(next["type"], "status_update");

    harness.node.abort();
}

#[tokio::test]
async fn switch_press_while_closed_requests_open() {
    let harness = start_node().await;
    let mut ws = accept(&harness.listener).await;
    next_frame(&mut ws).await; // boot status

    press_switch(&harness.switch).await;

    let request = next_frame(&mut ws).await;
    assert_eq!(request["type"], "button_command_request");
    assert_eq!(request["command"], "open");
    assert!(request["timestamp"].is_u64());

    // The press alone moved nothing.
    send_frame(&mut ws, r#"{"type":"handshake"}"#).await;
    let status = next_frame(&mut ws).await;
    assert_eq!(status["physical_status"], "closed");

    harness.node.abort();
}
