use thiserror::Error;

/// Inbound frame could not be turned into a client message
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A request the session state refused to apply
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("already in room {room_id}")]
    AlreadyInRoom { room_id: String },

    #[error("unknown connection")]
    UnknownConnection,
}

/// Failures while bringing the server up
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
