pub mod coordinator;

pub use coordinator::{ConnectionSender, SessionCoordinator};
