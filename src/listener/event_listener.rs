use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicU64, Ordering},
        mpsc::{self, Receiver, Sender},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    thread::{self, JoinHandle},
};

use crate::listener::{
    error::{HandlerError, ListenerError},
    handler::EventHandler,
    state_cell::StateCell,
    status::{HandlerFailure, ListenerStatus},
    wait_group::WaitGroup,
};

const LISTENER_WORKER_STARTED: &str = "LISTENER_WORKER_STARTED";
const LISTENER_WORKER_STOPPED: &str = "LISTENER_WORKER_STOPPED";
const LISTENER_QUEUE_CLOSED: &str = "LISTENER_QUEUE_CLOSED";
const LISTENER_HANDLER_FAILED: &str = "LISTENER_HANDLER_FAILED";
const LISTENER_SEND_REJECTED: &str = "LISTENER_SEND_REJECTED";

/// Unbounded FIFO queue drained by exactly one background worker.
///
/// The worker applies the handler to every event in submission order and
/// stores each result in the [`StateCell`] passed to [`start`](Self::start).
/// The first handler failure (an error or a panic) halts the listener
/// permanently: the failing
/// event and everything still queued are dropped, later sends are rejected
/// with [`ListenerError::Halted`], and [`status`](Self::status) reports
/// [`ListenerStatus::Failed`].
///
/// When a [`WaitGroup`] is attached, every accepted event adds one unit before
/// it becomes visible to the worker and releases it once consumed, so
/// [`WaitGroup::wait`] returns after all accepted events were handled.
pub struct EventListener<E, S> {
    shared: Arc<Shared<E>>,
    parts: Mutex<Option<WorkerParts<E, S>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

struct Shared<E> {
    name: String,
    control: Mutex<Control<E>>,
    processed: AtomicU64,
    wait_group: Option<WaitGroup>,
}

struct Control<E> {
    sender: Option<Sender<E>>,
    status: ListenerStatus,
}

struct WorkerParts<E, S> {
    receiver: Receiver<E>,
    handler: Box<dyn EventHandler<E, S>>,
}

impl<E, S> EventListener<E, S>
where
    E: Send + 'static,
    S: Clone + Send + 'static,
{
    pub fn new<H>(name: impl Into<String>, handler: H, wait_group: Option<WaitGroup>) -> Self
    where
        H: EventHandler<E, S> + 'static,
    {
        let (sender, receiver) = mpsc::channel();

        Self {
            shared: Arc::new(Shared {
                name: name.into(),
                control: Mutex::new(Control {
                    sender: Some(sender),
                    status: ListenerStatus::Idle,
                }),
                processed: AtomicU64::new(0),
                wait_group,
            }),
            parts: Mutex::new(Some(WorkerParts {
                receiver,
                handler: Box::new(handler),
            })),
            worker: Mutex::new(None),
        }
    }

    /// Spawns the worker that writes into `target`. Only the first call does
    /// anything; later calls fail with [`ListenerError::AlreadyStarted`].
    pub fn start(&self, target: StateCell<S>) -> Result<(), ListenerError> {
        let parts = self
            .parts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| ListenerError::AlreadyStarted {
                listener: self.shared.name.clone(),
            })?;

        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name(self.shared.name.clone())
            .spawn(move || run_worker(&shared, parts, &target))
            .map_err(|source| ListenerError::WorkerSpawn {
                listener: self.shared.name.clone(),
                source,
            })?;

        *self.worker.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);

        {
            let mut control = self.shared.lock_control();
            // The worker may already have halted or drained a closed queue.
            if control.status == ListenerStatus::Idle {
                control.status = ListenerStatus::Running;
            }
        }

        tracing::info!(
            code = LISTENER_WORKER_STARTED,
            listener = %self.shared.name,
            "listener worker started"
        );

        Ok(())
    }
}

impl<E, S> EventListener<E, S> {
    /// Enqueues `event` without waiting for it to be handled.
    pub fn send(&self, event: E) -> Result<(), ListenerError> {
        let control = self.shared.lock_control();

        if let ListenerStatus::Failed(failure) = &control.status {
            tracing::warn!(
                code = LISTENER_SEND_REJECTED,
                listener = %self.shared.name,
                failed_sequence = failure.sequence,
                "event rejected by halted listener"
            );
            return Err(ListenerError::Halted {
                listener: self.shared.name.clone(),
                sequence: failure.sequence,
                reason: failure.reason.clone(),
            });
        }

        let Some(sender) = control.sender.as_ref() else {
            tracing::warn!(
                code = LISTENER_SEND_REJECTED,
                listener = %self.shared.name,
                "event rejected by closed listener"
            );
            return Err(ListenerError::SendAfterClose {
                listener: self.shared.name.clone(),
            });
        };

        if let Some(wait_group) = &self.shared.wait_group {
            wait_group.add(1);
        }

        if sender.send(event).is_err() {
            // Receiver is only gone when the worker died without halting.
            self.shared.release(1);
            return Err(ListenerError::WorkerPanicked {
                listener: self.shared.name.clone(),
            });
        }

        Ok(())
    }

    /// Closes the queue. Buffered events are still handled before the worker
    /// exits, so pair this with a wait or [`join`](Self::join) before reading
    /// the final state. Calling it again has no effect.
    pub fn stop(&self) {
        let mut control = self.shared.lock_control();

        if control.sender.take().is_none() {
            tracing::debug!(listener = %self.shared.name, "listener queue already closed");
            return;
        }

        if matches!(control.status, ListenerStatus::Idle | ListenerStatus::Running) {
            control.status = ListenerStatus::Closed;
        }

        tracing::info!(
            code = LISTENER_QUEUE_CLOSED,
            listener = %self.shared.name,
            "listener queue closed"
        );
    }

    /// Blocks until the worker exits. Without a prior [`stop`](Self::stop) or a
    /// handler failure this waits forever.
    pub fn join(&self) -> Result<(), ListenerError> {
        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match handle {
            Some(handle) => handle.join().map_err(|_| ListenerError::WorkerPanicked {
                listener: self.shared.name.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn status(&self) -> ListenerStatus {
        self.shared.lock_control().status.clone()
    }

    /// Number of events the handler applied successfully.
    pub fn processed(&self) -> u64 {
        self.shared.processed.load(Ordering::Acquire)
    }

    pub fn wait_group(&self) -> Option<&WaitGroup> {
        self.shared.wait_group.as_ref()
    }
}

impl<E, S> Drop for EventListener<E, S> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<E> Shared<E> {
    fn lock_control(&self) -> MutexGuard<'_, Control<E>> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self, count: usize) {
        if let Some(wait_group) = &self.wait_group {
            wait_group.release(count);
        }
    }

    fn halt(&self, sequence: u64, error: &HandlerError, receiver: &Receiver<E>) {
        let discarded = {
            let mut control = self.lock_control();
            // Sends happen under this lock, so everything accepted so far is buffered.
            let discarded = receiver.try_iter().count();
            control.status = ListenerStatus::Failed(HandlerFailure {
                sequence,
                reason: error.reason().to_owned(),
                discarded,
            });
            discarded
        };

        tracing::error!(
            code = LISTENER_HANDLER_FAILED,
            listener = %self.name,
            sequence,
            discarded,
            error = %error,
            "handler failed; listener halted and will not apply further events"
        );

        self.release(1 + discarded);
    }

    fn finish(&self) {
        {
            let mut control = self.lock_control();
            if !control.status.is_failed() {
                control.status = ListenerStatus::Stopped;
            }
        }

        tracing::info!(
            code = LISTENER_WORKER_STOPPED,
            listener = %self.name,
            processed = self.processed.load(Ordering::Acquire),
            "listener worker stopped"
        );
    }
}

fn run_worker<E, S>(shared: &Shared<E>, parts: WorkerParts<E, S>, target: &StateCell<S>)
where
    S: Clone,
{
    let WorkerParts {
        receiver,
        mut handler,
    } = parts;
    let mut sequence: u64 = 0;

    while let Ok(event) = receiver.recv() {
        sequence += 1;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(&event)))
            .unwrap_or_else(|payload| Err(panic_error(payload.as_ref())));

        match outcome {
            Ok(next) => {
                target.replace(next);
                shared.processed.fetch_add(1, Ordering::AcqRel);
                tracing::trace!(listener = %shared.name, sequence, "event applied");
                if let Some(wait_group) = &shared.wait_group {
                    wait_group.done();
                }
            }
            Err(error) => {
                shared.halt(sequence, &error, &receiver);
                return;
            }
        }
    }

    shared.finish();
}

fn panic_error(payload: &(dyn Any + Send)) -> HandlerError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_owned());

    HandlerError::new(format!("handler panicked: {message}"))
}
