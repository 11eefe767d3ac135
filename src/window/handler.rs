use crate::{
    domain::{dimensions::Dimensions, events::ResizeEvent},
    listener::{EventHandler, HandlerError},
};

const RESIZE_APPLIED: &str = "WINDOW_RESIZE_APPLIED";

/// Default resize handler: accepts any non-empty size, and can be told to
/// reject the n-th event to exercise the fail-fast path.
#[derive(Debug, Clone, Default)]
pub struct ResizeHandler {
    seen: u64,
    fail_at: Option<u64>,
}

impl ResizeHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the `sequence`-th event (1-based).
    pub fn failing_at(sequence: u64) -> Self {
        Self {
            seen: 0,
            fail_at: Some(sequence),
        }
    }
}

impl EventHandler<ResizeEvent, Dimensions> for ResizeHandler {
    fn handle(&mut self, event: &ResizeEvent) -> Result<Dimensions, HandlerError> {
        self.seen += 1;

        if self.fail_at == Some(self.seen) {
            return Err(HandlerError::new(format!(
                "resize #{} rejected on request",
                self.seen
            )));
        }

        let target = event.target();
        if target.is_empty() {
            return Err(HandlerError::new(format!(
                "window cannot be resized to {target}"
            )));
        }

        tracing::info!(code = RESIZE_APPLIED, size = %target, "window resized");
        println!("Window resized to {target}");
        Ok(target)
    }
}
