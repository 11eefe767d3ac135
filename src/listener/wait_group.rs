use std::{
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

const WAIT_GROUP_OVER_RELEASED: &str = "WAIT_GROUP_OVER_RELEASED";

/// Counting barrier: producers `add` before handing work off, the consumer
/// `release`s once the work is done, and waiters block until the count is zero.
///
/// The count may rise again after a wait returned, starting a new cycle.
#[derive(Clone, Debug, Default)]
pub struct WaitGroup {
    inner: Arc<WaitGroupState>,
}

#[derive(Debug, Default)]
struct WaitGroupState {
    pending: Mutex<usize>,
    idle: Condvar,
}

impl WaitGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, count: usize) {
        *self.lock() += count;
    }

    pub fn done(&self) {
        self.release(1);
    }

    pub fn release(&self, count: usize) {
        let mut pending = self.lock();
        *pending = match pending.checked_sub(count) {
            Some(left) => left,
            None => {
                tracing::warn!(
                    code = WAIT_GROUP_OVER_RELEASED,
                    pending = *pending,
                    released = count,
                    "wait group released more than was added"
                );
                0
            }
        };

        if *pending == 0 {
            self.inner.idle.notify_all();
        }
    }

    pub fn pending(&self) -> usize {
        *self.lock()
    }

    /// Blocks until every added unit has been released.
    pub fn wait(&self) {
        let pending = self.lock();
        let _idle = self
            .inner
            .idle
            .wait_while(pending, |pending| *pending > 0)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Like [`wait`](Self::wait) but gives up after `timeout`. Returns whether
    /// the count reached zero.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let pending = self.lock();
        let (pending, _) = self
            .inner
            .idle
            .wait_timeout_while(pending, timeout, |pending| *pending > 0)
            .unwrap_or_else(PoisonError::into_inner);

        *pending == 0
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Instant};

    use super::*;

    #[test]
    fn wait_returns_immediately_when_nothing_is_pending() {
        let group = WaitGroup::new();

        group.wait();

        assert_eq!(group.pending(), 0);
    }

    #[test]
    fn wait_blocks_until_other_thread_releases_everything() {
        let group = WaitGroup::new();
        group.add(3);

        let worker = {
            let group = group.clone();
            thread::spawn(move || {
                for _ in 0..3 {
                    thread::sleep(Duration::from_millis(5));
                    group.done();
                }
            })
        };

        group.wait();

        assert_eq!(group.pending(), 0);
        worker.join().expect("worker should not panic");
    }

    #[test]
    fn wait_timeout_gives_up_while_work_is_pending() {
        let group = WaitGroup::new();
        group.add(1);

        let started = Instant::now();
        let drained = group.wait_timeout(Duration::from_millis(20));

        assert!(!drained);
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(group.pending(), 1);
    }

    #[test]
    fn supports_new_cycle_after_wait_returned() {
        let group = WaitGroup::new();

        group.add(2);
        group.release(2);
        group.wait();

        group.add(1);
        assert!(!group.wait_timeout(Duration::from_millis(1)));
        group.done();
        assert!(group.wait_timeout(Duration::from_millis(1)));
    }

    #[test]
    fn over_release_saturates_at_zero() {
        let group = WaitGroup::new();
        group.add(1);

        group.release(5);

        assert_eq!(group.pending(), 0);
        group.wait();
    }
}
