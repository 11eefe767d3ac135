//! Listener layer: a single-consumer event queue whose worker applies a handler
//! to shared state, plus the counting barrier used to wait for it to drain.

pub mod error;
pub mod event_listener;
pub mod handler;
pub mod state_cell;
pub mod status;
pub mod wait_group;

pub use error::{HandlerError, ListenerError};
pub use event_listener::EventListener;
pub use handler::EventHandler;
pub use state_cell::StateCell;
pub use status::ListenerStatus;
pub use wait_group::WaitGroup;

/// Returns the listener module name for smoke checks.
pub fn module_name() -> &'static str {
    "listener"
}
