//! The WebSocket front door.
//!
//! One `/ws` endpoint per client. Inbound frames are deserialized into
//! [`ClientMessage`] and handed to the session manager; outbound events
//! arrive on the connection's channel and are serialized back out. A
//! `/status` endpoint reports room and queue health for probes.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;
use warp::ws::{Message, WebSocket};
use warp::Filter;

use super::manager::SessionManager;
use super::protocol::ClientMessage;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: [u8; 4],
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn new(host: [u8; 4], port: u16) -> Self {
        Self { host, port }
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new([0, 0, 0, 0], 8080)
    }
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    rooms: usize,
}

/// All routes: `GET /ws` (upgrade) and `GET /status`.
pub fn routes(
    manager: Arc<SessionManager>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let with_manager = warp::any().map(move || Arc::clone(&manager));

    let ws = warp::path("ws")
        .and(warp::ws())
        .and(with_manager.clone())
        .map(|upgrade: warp::ws::Ws, manager: Arc<SessionManager>| {
            upgrade.on_upgrade(move |socket| handle_socket(socket, manager))
        });

    let status = warp::path("status").and(with_manager).map(
        |manager: Arc<SessionManager>| {
            warp::reply::json(&StatusResponse {
                rooms: manager.room_count(),
            })
        },
    );

    ws.or(status)
}

/// Serve until the process is stopped.
pub async fn run(config: ServerConfig, manager: Arc<SessionManager>) {
    let addr = config.addr();
    info!(%addr, "listening");
    warp::serve(routes(manager)).run(addr).await;
}

async fn handle_socket(socket: WebSocket, manager: Arc<SessionManager>) {
    let connection_id = Uuid::new_v4().to_string();
    debug!(connection_id, "websocket open");

    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut events = manager.connect(&connection_id);

    // Outbound: the connection's event stream, serialized per event. The
    // channel closing means the manager forgot this connection.
    let forward_id = connection_id.clone();
    let forward = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let payload = match serde_json::to_string(&event) {
                Ok(payload) => payload,
                Err(err) => {
                    warn!(connection_id = %forward_id, %err, "event serialization failed");
                    continue;
                }
            };
            if ws_tx.send(Message::text(payload)).await.is_err() {
                break;
            }
        }
    });

    // Inbound: client frames until close or error.
    while let Some(frame) = ws_rx.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(err) => {
                debug!(connection_id, %err, "websocket error");
                break;
            }
        };
        if frame.is_close() {
            break;
        }
        let Ok(text) = frame.to_str() else {
            continue;
        };
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => manager.handle_message(&connection_id, message).await,
            Err(err) => debug!(connection_id, %err, "unparseable client frame"),
        }
    }

    manager.handle_disconnect(&connection_id);
    forward.abort();
    debug!(connection_id, "websocket closed");
}
