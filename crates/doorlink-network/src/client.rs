//! Persistent WebSocket client for the door controller.
//!
//! # Connection lifecycle
//!
//! 1. Create with [`ControllerLink::new`]
//! 2. Establish with [`ControllerLink::connect_with_retry`], which loops at
//!    the fixed reconnect interval until the controller answers
//! 3. Exchange messages with [`ControllerLink::recv`] and
//!    [`ControllerLink::send`]
//! 4. On any loss, the link clears itself; the caller reconnects and must
//!    then re-announce the current door state (the controller is stateless
//!    across reconnects)
//!
//! # Design
//!
//! - **Fixed-interval retry, no cap**: the node is useless without its
//!   controller, so it keeps trying forever. No exponential backoff.
//! - **No outbound buffering**: sends while disconnected fail with
//!   [`LinkError::NotConnected`] and the message is gone. The status
//!   announcement on reconnect makes the controller whole again.
//! - **Decode errors never surface**: malformed text frames are logged and
//!   skipped inside [`recv`](ControllerLink::recv); only transport loss is
//!   an error.
//!
//! # Thread safety
//!
//! `ControllerLink` lives on the single node task; it is not shared.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use doorlink_core::DoorId;
use doorlink_core::constants::{
    DEFAULT_CONTROLLER_HOST, DEFAULT_CONTROLLER_PORT, DEFAULT_DOOR_ID,
    DEFAULT_RECONNECT_INTERVAL_MS, DEFAULT_WS_PATH,
};
use doorlink_protocol::{InboundMessage, OutboundMessage, decode_lenient, encode_frame};

use crate::sink::MessageSink;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Configuration for the controller link.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Full WebSocket URL, door id included as the last path segment.
    pub url: String,

    /// Fixed delay between reconnection attempts.
    pub reconnect_interval: Duration,
}

impl LinkConfig {
    /// Build a config for a door behind a controller endpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use doorlink_core::DoorId;
    /// use doorlink_network::LinkConfig;
    ///
    /// let id = DoorId::new("DOOR-001").unwrap();
    /// let config = LinkConfig::for_door("192.168.1.10", 5000, "/ws", &id);
    /// assert_eq!(config.url, "ws://192.168.1.10:5000/ws/DOOR-001");
    /// ```
    #[must_use]
    pub fn for_door(host: &str, port: u16, path: &str, door_id: &DoorId) -> Self {
        let path = path.trim_end_matches('/');
        Self {
            url: format!("ws://{host}:{port}{path}/{door_id}"),
            reconnect_interval: Duration::from_millis(DEFAULT_RECONNECT_INTERVAL_MS),
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            url: format!(
                "ws://{DEFAULT_CONTROLLER_HOST}:{DEFAULT_CONTROLLER_PORT}{DEFAULT_WS_PATH}/{DEFAULT_DOOR_ID}"
            ),
            reconnect_interval: Duration::from_millis(DEFAULT_RECONNECT_INTERVAL_MS),
        }
    }
}

/// Errors that can occur on the controller link.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Link is not currently established.
    #[error("Not connected to controller")]
    NotConnected,

    /// Connection attempt failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Established connection was lost.
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// Outbound message could not be encoded.
    #[error("Encode error: {0}")]
    Encode(String),
}

/// Persistent, auto-recovering WebSocket connection to the controller.
pub struct ControllerLink {
    url: String,
    reconnect_interval: Duration,
    stream: Option<WsStream>,
}

impl ControllerLink {
    /// Create an unconnected link.
    pub fn new(config: LinkConfig) -> Self {
        debug!(url = %config.url, "Creating controller link");
        Self {
            url: config.url,
            reconnect_interval: config.reconnect_interval,
            stream: None,
        }
    }

    /// Attempt a single connection to the controller.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::ConnectionFailed` if the controller is
    /// unreachable or rejects the upgrade.
    pub async fn connect(&mut self) -> Result<(), LinkError> {
        info!(url = %self.url, "Connecting to controller");

        let (stream, _response) = connect_async(self.url.as_str())
            .await
            .map_err(|e| LinkError::ConnectionFailed(e.to_string()))?;

        self.stream = Some(stream);
        info!("Controller link established");
        Ok(())
    }

    /// Connect, retrying at the fixed interval until the controller answers.
    ///
    /// Never gives up: the retry count is unbounded. Each failure is logged
    /// at `warn` and followed by one full interval of sleep.
    pub async fn connect_with_retry(&mut self) {
        loop {
            match self.connect().await {
                Ok(()) => return,
                Err(e) => {
                    warn!(
                        error = %e,
                        retry_in_ms = self.reconnect_interval.as_millis() as u64,
                        "Controller unreachable, will retry"
                    );
                    tokio::time::sleep(self.reconnect_interval).await;
                }
            }
        }
    }

    /// Receive the next decoded inbound message.
    ///
    /// Control frames and malformed text frames are consumed silently (the
    /// latter after a warning from the codec boundary); only a real message
    /// or a link failure returns.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::NotConnected` if the link is down, or
    /// `LinkError::ConnectionLost` when the peer closes or the transport
    /// fails; in both loss cases the link clears itself so the caller can
    /// reconnect.
    pub async fn recv(&mut self) -> Result<InboundMessage, LinkError> {
        loop {
            let frame = match self.stream.as_mut() {
                None => return Err(LinkError::NotConnected),
                Some(stream) => stream.next().await,
            };

            match frame {
                Some(Ok(WsMessage::Text(text))) => {
                    if let Some(message) = decode_lenient(text.as_str()) {
                        debug!(?message, "Inbound message");
                        return Ok(message);
                    }
                    // Malformed frame already logged by the codec; keep reading.
                }
                Some(Ok(WsMessage::Ping(_) | WsMessage::Pong(_))) => {}
                Some(Ok(WsMessage::Binary(_))) => {
                    warn!("Ignoring unexpected binary frame");
                }
                Some(Ok(WsMessage::Close(_))) => {
                    info!("Controller closed the connection");
                    self.stream = None;
                    return Err(LinkError::ConnectionLost(
                        "Controller closed connection".to_string(),
                    ));
                }
                Some(Ok(WsMessage::Frame(_))) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "Controller link transport error");
                    self.stream = None;
                    return Err(LinkError::ConnectionLost(e.to_string()));
                }
                None => {
                    self.stream = None;
                    return Err(LinkError::ConnectionLost("Stream ended".to_string()));
                }
            }
        }
    }

    /// Close the connection gracefully. Idempotent.
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.close(None).await {
                debug!(error = %e, "Error during link close");
            }
            info!("Controller link closed");
        }
    }

    /// The fixed reconnect interval.
    #[must_use]
    pub fn reconnect_interval(&self) -> Duration {
        self.reconnect_interval
    }
}

impl MessageSink for ControllerLink {
    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    async fn send(&mut self, message: &OutboundMessage) -> Result<(), LinkError> {
        let text = encode_frame(message).map_err(|e| LinkError::Encode(e.to_string()))?;

        let Some(stream) = self.stream.as_mut() else {
            return Err(LinkError::NotConnected);
        };

        match stream.send(WsMessage::text(text)).await {
            Ok(()) => {
                debug!(kind = message.kind(), "Outbound message sent");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Send failed, dropping link");
                self.stream = None;
                Err(LinkError::ConnectionLost(e.to_string()))
            }
        }
    }
}
