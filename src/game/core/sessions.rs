use super::connection::{Connection, ConnectionId, ConnectionRegistry};
use super::messages::ServerMessage;
use super::room::{RoomTable, ROOM_CAPACITY};
use crate::error::SessionError;
use serde_json::Value;
use tracing::{debug, info, warn};

/// A message addressed to a single connection
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub to: ConnectionId,
    pub message: ServerMessage,
}

impl Delivery {
    pub fn new(to: ConnectionId, message: ServerMessage) -> Self {
        Self { to, message }
    }
}

/// Room lifecycle state machine (pure, no transport concerns).
///
/// Rooms and the per-connection room field are mutated together here and nowhere
/// else. Each operation returns the deliveries it produced, already resolved to
/// individual connections, so the caller only has to hand them to the transport.
#[derive(Debug, Default)]
pub struct Sessions {
    rooms: RoomTable,
    connections: ConnectionRegistry,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, id: ConnectionId) {
        if self.connections.register(id) {
            debug!(connection_id = %id, "Registered connection");
        }
    }

    pub fn join_room(
        &mut self,
        id: ConnectionId,
        room_id: &str,
    ) -> Result<Vec<Delivery>, SessionError> {
        let connection = self
            .connections
            .get(id)
            .ok_or(SessionError::UnknownConnection)?;
        if let Some(current) = &connection.room_id {
            return Err(SessionError::AlreadyInRoom {
                room_id: current.clone(),
            });
        }

        let room = self.rooms.get_or_create(room_id);
        let Some(color) = room.add_member(id) else {
            warn!(connection_id = %id, room_id, "Room is full");
            return Ok(vec![Delivery::new(id, ServerMessage::RoomFull)]);
        };
        let members = room.members().to_vec();
        self.connections.assign_room(id, room_id, color);

        info!(
            connection_id = %id,
            room_id,
            %color,
            members = members.len(),
            "Joined room"
        );

        let mut deliveries = vec![Delivery::new(
            id,
            ServerMessage::JoinedRoom {
                room_id: room_id.to_string(),
                color,
            },
        )];

        // Only the join that fills the room starts the game
        if members.len() == ROOM_CAPACITY {
            info!(room_id, "Game starting");
            deliveries.extend(
                members
                    .into_iter()
                    .map(|member| Delivery::new(member, ServerMessage::StartGame)),
            );
        }

        Ok(deliveries)
    }

    /// Forward a move to everyone else in the sender's room.
    pub fn relay_move(&self, id: ConnectionId, data: Value) -> Vec<Delivery> {
        let Some(room_id) = self.connections.room_of(id) else {
            debug!(connection_id = %id, "Move from connection outside any room");
            return Vec::new();
        };
        let Some(room) = self.rooms.get(room_id) else {
            debug!(connection_id = %id, room_id, "Move for a room that no longer exists");
            return Vec::new();
        };

        debug!(connection_id = %id, room_id, "Relaying move");
        room.members()
            .iter()
            .filter(|&&member| member != id)
            .map(|&member| Delivery::new(member, ServerMessage::OpponentMove(data.clone())))
            .collect()
    }

    /// Announce the end of a game to every current member. The room stays open.
    pub fn game_over(&self, room_id: &str, winner: &str, reason: &str) -> Vec<Delivery> {
        let Some(room) = self.rooms.get(room_id) else {
            debug!(room_id, "Game over for unknown room");
            return Vec::new();
        };

        info!(room_id, winner, reason, "Game over");
        room.members()
            .iter()
            .map(|&member| {
                Delivery::new(
                    member,
                    ServerMessage::GameOver {
                        winner: winner.to_string(),
                        reason: reason.to_string(),
                    },
                )
            })
            .collect()
    }

    /// Forget a connection and tell whoever is left in its room.
    pub fn disconnect(&mut self, id: ConnectionId) -> Vec<Delivery> {
        let Some(connection) = self.connections.remove(id) else {
            debug!(connection_id = %id, "Disconnect for unknown connection");
            return Vec::new();
        };
        let Some(room_id) = connection.room_id else {
            return Vec::new();
        };
        let Some(remaining) = self.rooms.remove_member(&room_id, id) else {
            return Vec::new();
        };

        info!(
            connection_id = %id,
            room_id,
            members = remaining.len(),
            "Left room"
        );
        if remaining.is_empty() {
            info!(room_id, "Room removed");
        }

        remaining
            .into_iter()
            .map(|member| Delivery::new(member, ServerMessage::OpponentLeft))
            .collect()
    }

    pub fn room_members(&self, room_id: &str) -> Option<&[ConnectionId]> {
        self.rooms.get(room_id).map(|room| room.members())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }
}
