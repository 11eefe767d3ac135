use std::sync::{Arc, Mutex, PoisonError};

/// Shared state with a single writer.
///
/// Anyone holding a clone can read a snapshot; only the listener worker can
/// replace the value.
#[derive(Debug)]
pub struct StateCell<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for StateCell<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Clone> StateCell<S> {
    pub fn new(initial: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    pub fn get(&self) -> S {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(super) fn replace(&self, next: S) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}
