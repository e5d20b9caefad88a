pub mod connection;
pub mod messages;
pub mod room;
pub mod sessions;

pub use connection::ConnectionId;
pub use room::Color;
pub use sessions::{Delivery, Sessions};
