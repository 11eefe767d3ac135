//! Window layer: the stateful resource whose size only changes through its
//! event listener.

pub mod handler;
pub mod resource;

pub use handler::ResizeHandler;
pub use resource::Window;

/// Returns the window module name for smoke checks.
pub fn module_name() -> &'static str {
    "window"
}
