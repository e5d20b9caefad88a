use super::core::messages::{ClientMessage, ServerMessage};
use super::core::ConnectionId;
use super::engine::ConnectionSender;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Trait for handling WebSocket lifecycle and messages.
/// The transport only needs this much from whatever owns the room state.
pub trait ConnectionHandler: Send + Sync + 'static {
    /// Register a new connection and return its id
    fn handle_connect(&self, tx: ConnectionSender) -> ConnectionId;

    /// Handle an incoming client message
    fn handle_message(&self, connection_id: ConnectionId, msg: ClientMessage, tx: &ConnectionSender);

    /// Handle client disconnection
    fn handle_disconnect(&self, connection_id: ConnectionId);

    /// Name for logging purposes
    fn name(&self) -> &'static str;
}

/// Run a WebSocket connection with the given handler.
/// Splits the socket, spawns send/receive tasks, and runs the disconnect
/// handler once whichever side finishes first.
pub async fn run_connection<H: ConnectionHandler>(socket: WebSocket, handler: Arc<H>) {
    let (mut sender, receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let connection_id = handler.handle_connect(tx.clone());
    info!(%connection_id, "New {} WebSocket connection", handler.name());

    // Task to forward queued messages to the WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            debug!(%connection_id, ?msg, "Sending message to client");
            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(err) => {
                    warn!(%connection_id, %err, "Failed to encode server message");
                    continue;
                }
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    // Task to receive messages from the WebSocket and dispatch to handler
    let mut recv_task = tokio::spawn(receive_loop(receiver, connection_id, tx, handler.clone()));

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    handler.handle_disconnect(connection_id);
    info!(%connection_id, "{} WebSocket connection closed", handler.name());
}

async fn receive_loop<H: ConnectionHandler>(
    mut receiver: futures_util::stream::SplitStream<WebSocket>,
    connection_id: ConnectionId,
    tx: ConnectionSender,
    handler: Arc<H>,
) {
    while let Some(Ok(msg)) = receiver.next().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => {
                debug!(%connection_id, "Received non-text message, ignoring");
                continue;
            }
        };

        debug!(%connection_id, raw = %text, "Received message");

        let client_msg = match ClientMessage::from_json(&text) {
            Ok(msg) => msg,
            Err(err) => {
                warn!(%connection_id, raw = %text, %err, "Rejected client message");
                let _ = tx.send(ServerMessage::Error {
                    message: err.to_string(),
                });
                continue;
            }
        };

        handler.handle_message(connection_id, client_msg, &tx);
    }
}
