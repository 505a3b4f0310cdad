//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use thiserror::Error;
use tokio::{sync::mpsc, time::Instant};

use crate::{
    domain::{ConnectionId, PlayerRecord},
    infrastructure::dto::websocket::{MessageType, PositionUpdateMessage},
    ui::state::AppState,
};
use waypoint_shared::time::now_millis;

/// Reasons an inbound text frame is ignored.
#[derive(Debug, Error)]
enum InboundFrameError {
    #[error("invalid position update: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("unexpected message type {0:?}")]
    UnexpectedType(MessageType),
}

/// Decode a client text frame into the record to store.
///
/// Coordinates are not required; only the framing (JSON object with
/// `"type": "update-position"`, numeric coordinates if present) is checked.
fn parse_position_update(text: &str) -> Result<PlayerRecord, InboundFrameError> {
    let message: PositionUpdateMessage = serde_json::from_str(text)?;
    if message.r#type != MessageType::UpdatePosition {
        return Err(InboundFrameError::UnexpectedType(message.r#type));
    }
    Ok(message.player.into())
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's channel into the WebSocket sender.
///
/// Also sends a ping every `ping_interval` so that the peer keeps producing
/// frames (pongs) while it is alive.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    ping_interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ping = tokio::time::interval_at(Instant::now() + ping_interval, ping_interval);
        loop {
            tokio::select! {
                msg = rx.recv() => {
                    let Some(msg) = msg else { break };
                    if sender.send(Message::Text(msg.into())).await.is_err() {
                        break;
                    }
                }
                _ = ping.tick() => {
                    if sender.send(Message::Ping(Bytes::new())).await.is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// Reads frames from the client until the transport closes.
///
/// Read errors are logged and do not end the loop; the connection ends on a
/// close frame, end of stream, or when nothing arrives within
/// `liveness_timeout`.
async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    connection_id: ConnectionId,
) {
    let liveness_timeout = state.heartbeat.liveness_timeout;

    loop {
        let frame = match tokio::time::timeout(liveness_timeout, receiver.next()).await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                tracing::info!("Connection '{}' closed by transport", connection_id);
                break;
            }
            Err(_) => {
                tracing::warn!(
                    "No frame from '{}' within {:?}, treating connection as lost",
                    connection_id,
                    liveness_timeout
                );
                break;
            }
        };

        match frame {
            Ok(Message::Text(text)) => {
                tracing::debug!("Received text from '{}': {}", connection_id, text);

                let record = match parse_position_update(text.as_str()) {
                    Ok(record) => record,
                    Err(e) => {
                        tracing::warn!("Ignoring frame from '{}': {}", connection_id, e);
                        continue;
                    }
                };

                if let Err(e) = state
                    .update_position_usecase
                    .execute(connection_id.clone(), record)
                    .await
                {
                    tracing::warn!("Failed to update position of '{}': {}", connection_id, e);
                }
            }
            Ok(Message::Binary(data)) => {
                tracing::warn!(
                    "Ignoring binary frame ({} bytes) from '{}'",
                    data.len(),
                    connection_id
                );
            }
            Ok(Message::Ping(_)) => {
                // Pong is sent automatically by the WebSocket protocol
                tracing::debug!("Received ping from '{}'", connection_id);
            }
            Ok(Message::Pong(_)) => {
                tracing::debug!("Received pong from '{}'", connection_id);
            }
            Ok(Message::Close(_)) => {
                tracing::info!("Client '{}' requested close", connection_id);
                break;
            }
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
            }
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();

    // Channel for everything the server pushes to this client
    let (tx, rx) = mpsc::unbounded_channel();

    // Assign an id and queue the welcome snapshot as the first outbound message
    let connection_id = match state.connect_player_usecase.execute(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to accept connection: {}", e);
            return;
        }
    };
    let connected_at = now_millis();
    tracing::info!("Client '{}' connected", connection_id);

    let mut send_task = pusher_loop(rx, sender, state.heartbeat.ping_interval);
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        state.clone(),
        connection_id.clone(),
    ));

    // If any one of the tasks completes, abort the other and wait until it has
    // stopped, so no update from this connection can run after the disconnect
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
    };

    match state
        .disconnect_player_usecase
        .execute(connection_id.clone())
        .await
    {
        Ok(snapshot) => {
            tracing::info!(
                "Client '{}' disconnected after {} ms, {} players remain",
                connection_id,
                now_millis() - connected_at,
                snapshot.len()
            );
        }
        Err(e) => {
            tracing::warn!("Failed to disconnect '{}': {}", connection_id, e);
        }
    }
}
