//! Domain layer: window state values and the events that change them.

pub mod dimensions;
pub mod events;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
