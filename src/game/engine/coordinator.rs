use crate::error::SessionError;
use crate::game::core::messages::ServerMessage;
use crate::game::core::{ConnectionId, Delivery, Sessions};
use dashmap::DashMap;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Outbound half of a connection. Anything holding a clone can push to that client.
pub type ConnectionSender = mpsc::UnboundedSender<ServerMessage>;

/// Process-wide room coordination.
///
/// All room and connection state sits behind one mutex so each event runs to
/// completion before the next one is looked at. Deliveries are pushed onto the
/// outbound channels before the lock is released, which keeps every client's
/// view of notifications in the same order as the state changes behind them.
pub struct SessionCoordinator {
    sessions: Mutex<Sessions>,
    channels: DashMap<ConnectionId, ConnectionSender>,
}

impl Default for SessionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionCoordinator {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(Sessions::new()),
            channels: DashMap::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Sessions> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&self, deliveries: Vec<Delivery>) {
        for Delivery { to, message } in deliveries {
            let Some(tx) = self.channels.get(&to) else {
                debug!(connection_id = %to, "Dropping message for closed connection");
                continue;
            };
            let _ = tx.send(message);
        }
    }

    /// Register a new connection and its outbound channel.
    pub fn connect(&self, tx: ConnectionSender) -> ConnectionId {
        let id = ConnectionId::new();
        let mut sessions = self.lock();
        self.channels.insert(id, tx);
        sessions.connect(id);
        info!(connection_id = %id, "Client connected");
        id
    }

    pub fn join_room(&self, id: ConnectionId, room_id: &str) -> Result<(), SessionError> {
        let mut sessions = self.lock();
        let deliveries = sessions.join_room(id, room_id)?;
        self.dispatch(deliveries);
        Ok(())
    }

    pub fn relay_move(&self, id: ConnectionId, data: Value) {
        let sessions = self.lock();
        self.dispatch(sessions.relay_move(id, data));
    }

    pub fn game_over(&self, room_id: &str, winner: &str, reason: &str) {
        let sessions = self.lock();
        self.dispatch(sessions.game_over(room_id, winner, reason));
    }

    /// Tear down a connection. Safe to call more than once.
    pub fn disconnect(&self, id: ConnectionId) {
        let mut sessions = self.lock();
        let deliveries = sessions.disconnect(id);
        self.dispatch(deliveries);
        if self.channels.remove(&id).is_some() {
            info!(connection_id = %id, "Client disconnected");
        }
    }

    /// Current members of a room, in join order.
    pub fn room_members(&self, room_id: &str) -> Option<Vec<ConnectionId>> {
        self.lock().room_members(room_id).map(<[ConnectionId]>::to_vec)
    }

    pub fn room_count(&self) -> usize {
        self.lock().room_count()
    }

    pub fn connection_count(&self) -> usize {
        self.channels.len()
    }
}
