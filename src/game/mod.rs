pub mod core;
pub mod engine;
mod ws;
mod ws_handler;

pub use engine::SessionCoordinator;
pub use ws_handler::handle_connection;
