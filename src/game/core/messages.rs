use super::room::Color;
use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events a client may send. Frames look like `{"event": "joinRoom", "data": "r1"}`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    JoinRoom(String),
    /// Opaque move payload, relayed to the opponent untouched
    Move(Value),
    GameOver {
        room_id: String,
        winner: String,
        reason: String,
    },
}

impl ClientMessage {
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    RoomFull,
    JoinedRoom {
        room_id: String,
        color: Color,
    },
    StartGame,
    OpponentMove(Value),
    GameOver {
        winner: String,
        reason: String,
    },
    OpponentLeft,
    Error {
        message: String,
    },
}
