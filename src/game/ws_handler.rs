use super::core::messages::{ClientMessage, ServerMessage};
use super::core::ConnectionId;
use super::engine::{ConnectionSender, SessionCoordinator};
use super::ws::{run_connection, ConnectionHandler};
use axum::extract::ws::WebSocket;
use std::sync::Arc;
use tracing::warn;

impl ConnectionHandler for SessionCoordinator {
    fn handle_connect(&self, tx: ConnectionSender) -> ConnectionId {
        self.connect(tx)
    }

    fn handle_message(&self, connection_id: ConnectionId, msg: ClientMessage, tx: &ConnectionSender) {
        match msg {
            ClientMessage::JoinRoom(room_id) => {
                if let Err(err) = self.join_room(connection_id, &room_id) {
                    warn!(%connection_id, room_id, %err, "Join rejected");
                    let _ = tx.send(ServerMessage::Error {
                        message: err.to_string(),
                    });
                }
            }
            ClientMessage::Move(data) => {
                self.relay_move(connection_id, data);
            }
            ClientMessage::GameOver {
                room_id,
                winner,
                reason,
            } => {
                self.game_over(&room_id, &winner, &reason);
            }
        }
    }

    fn handle_disconnect(&self, connection_id: ConnectionId) {
        self.disconnect(connection_id);
    }

    fn name(&self) -> &'static str {
        "room"
    }
}

pub async fn handle_connection(socket: WebSocket, state: Arc<SessionCoordinator>) {
    run_connection(socket, state).await;
}
