use thiserror::Error;

/// Failure returned by an event handler. Fatal to the listener that ran it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct HandlerError {
    reason: String,
}

impl HandlerError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("listener `{listener}` was already started")]
    AlreadyStarted { listener: String },
    #[error("send on closed queue of listener `{listener}`")]
    SendAfterClose { listener: String },
    #[error("listener `{listener}` halted after handler failed on event #{sequence}: {reason}")]
    Halted {
        listener: String,
        sequence: u64,
        reason: String,
    },
    #[error("failed to spawn worker for listener `{listener}`: {source}")]
    WorkerSpawn {
        listener: String,
        #[source]
        source: std::io::Error,
    },
    #[error("worker of listener `{listener}` panicked")]
    WorkerPanicked { listener: String },
}
