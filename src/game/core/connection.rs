use super::room::Color;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Identifier handed out to each live transport connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What the server knows about a connection. The room is set once per membership.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Connection {
    pub room_id: Option<String>,
    pub color: Option<Color>,
}

#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the connection was already registered.
    pub fn register(&mut self, id: ConnectionId) -> bool {
        if self.connections.contains_key(&id) {
            return false;
        }
        self.connections.insert(id, Connection::default());
        true
    }

    pub fn remove(&mut self, id: ConnectionId) -> Option<Connection> {
        self.connections.remove(&id)
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn room_of(&self, id: ConnectionId) -> Option<&str> {
        self.connections.get(&id)?.room_id.as_deref()
    }

    pub fn assign_room(&mut self, id: ConnectionId, room_id: &str, color: Color) {
        if let Some(connection) = self.connections.get_mut(&id) {
            connection.room_id = Some(room_id.to_string());
            connection.color = Some(color);
        }
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
