/// Health of a listener, observable from outside the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerStatus {
    /// Constructed, worker not started yet.
    Idle,
    Running,
    /// Queue closed, worker still draining buffered events.
    Closed,
    /// Worker exited after draining a closed queue.
    Stopped,
    /// Handler failed; the worker exited and applies nothing more.
    Failed(HandlerFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    /// 1-based position of the failing event in processing order.
    pub sequence: u64,
    pub reason: String,
    /// Buffered events dropped without being applied.
    pub discarded: usize,
}

impl ListenerStatus {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Idle => "LISTENER_IDLE",
            Self::Running => "LISTENER_RUNNING",
            Self::Closed => "LISTENER_CLOSED",
            Self::Stopped => "LISTENER_STOPPED",
            Self::Failed(_) => "LISTENER_FAILED",
        }
    }

    pub fn failure(&self) -> Option<&HandlerFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure().is_some()
    }
}
