use super::connection::ConnectionId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const ROOM_CAPACITY: usize = 2;

/// Side a member plays, fixed by join order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Colour for the member at a 1-based position in the room.
    pub fn for_position(position: usize) -> Option<Self> {
        match position {
            1 => Some(Self::White),
            2 => Some(Self::Black),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Members of one room, in join order
#[derive(Debug, Default)]
pub struct Room {
    members: Vec<ConnectionId>,
}

impl Room {
    pub fn new() -> Self {
        Self {
            members: Vec::with_capacity(ROOM_CAPACITY),
        }
    }

    pub fn members(&self) -> &[ConnectionId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= ROOM_CAPACITY
    }

    /// Append a member. Returns the colour for its position, or None when the room is full.
    pub fn add_member(&mut self, id: ConnectionId) -> Option<Color> {
        if self.is_full() {
            return None;
        }
        self.members.push(id);
        Color::for_position(self.members.len())
    }

    /// Returns true if the member was present.
    pub fn remove_member(&mut self, id: ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|&member| member != id);
        self.members.len() != before
    }
}

/// Room id -> room. Rooms never stay in the table empty.
#[derive(Debug, Default)]
pub struct RoomTable {
    rooms: HashMap<String, Room>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn get_or_create(&mut self, room_id: &str) -> &mut Room {
        self.rooms.entry(room_id.to_string()).or_default()
    }

    pub fn contains(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Remove a member from a room, dropping the room once nobody is left.
    /// Returns the remaining members, or None if the room or the member was not found.
    pub fn remove_member(&mut self, room_id: &str, id: ConnectionId) -> Option<Vec<ConnectionId>> {
        let room = self.rooms.get_mut(room_id)?;
        if !room.remove_member(id) {
            return None;
        }

        let remaining = room.members().to_vec();
        if remaining.is_empty() {
            self.remove_room(room_id);
        }
        Some(remaining)
    }

    pub fn remove_room(&mut self, room_id: &str) -> Option<Room> {
        self.rooms.remove(room_id)
    }
}
