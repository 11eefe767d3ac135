use std::time::Duration;

use crate::{
    domain::{dimensions::Dimensions, events::ResizeEvent},
    listener::{EventHandler, EventListener, ListenerError, ListenerStatus, StateCell, WaitGroup},
};

const WINDOW_OPENED: &str = "WINDOW_OPENED";
const WINDOW_CLOSED: &str = "WINDOW_CLOSED";
const LISTENER_THREAD_NAME: &str = "resize-listener";

/// A window whose size is owned by its resize listener.
///
/// Only the listener worker writes the size; [`dimensions`](Self::dimensions)
/// returns a synchronized snapshot. Submissions are asynchronous, so a read
/// right after [`submit`](Self::submit) or [`close`](Self::close) may still
/// show an older size. Wait on the completion group (or [`join`](Self::join)
/// after closing) before relying on the final value.
///
/// If the handler fails, the window stops resizing for good and
/// [`status`](Self::status) reports the failure.
pub struct Window {
    title: String,
    state: StateCell<Dimensions>,
    listener: EventListener<ResizeEvent, Dimensions>,
}

impl Window {
    pub fn create<H>(
        title: impl Into<String>,
        width: u32,
        height: u32,
        handler: H,
        wait_group: Option<WaitGroup>,
    ) -> Self
    where
        H: EventHandler<ResizeEvent, Dimensions> + 'static,
    {
        Self {
            title: title.into(),
            state: StateCell::new(Dimensions::new(width, height)),
            listener: EventListener::new(LISTENER_THREAD_NAME, handler, wait_group),
        }
    }

    pub fn open(&self) -> Result<(), ListenerError> {
        self.listener.start(self.state.clone())?;

        tracing::info!(
            code = WINDOW_OPENED,
            title = %self.title,
            size = %self.dimensions(),
            "window opened"
        );
        Ok(())
    }

    pub fn submit(&self, event: ResizeEvent) -> Result<(), ListenerError> {
        self.listener.send(event)
    }

    /// Stops accepting resizes. Already queued ones are still applied.
    pub fn close(&self) {
        self.listener.stop();
        tracing::info!(code = WINDOW_CLOSED, title = %self.title, "window closed");
    }

    pub fn join(&self) -> Result<(), ListenerError> {
        self.listener.join()
    }

    /// Blocks until every accepted resize was consumed. Returns immediately
    /// when the window was created without a wait group.
    pub fn wait_idle(&self) {
        if let Some(group) = self.listener.wait_group() {
            group.wait();
        }
    }

    pub fn wait_idle_timeout(&self, timeout: Duration) -> bool {
        self.listener
            .wait_group()
            .map_or(true, |group| group.wait_timeout(timeout))
    }

    /// Resizes accepted but not yet consumed by the worker. Always zero
    /// without a wait group.
    pub fn pending_resizes(&self) -> usize {
        self.listener.wait_group().map_or(0, WaitGroup::pending)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.state.get()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> ListenerStatus {
        self.listener.status()
    }

    pub fn applied(&self) -> u64 {
        self.listener.processed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{listener::HandlerError, test_support::resize_sequence, window::ResizeHandler};

    #[test]
    fn applies_seven_resizes_and_ends_on_the_last() {
        let group = WaitGroup::new();
        let window = Window::create("My Window", 800, 600, ResizeHandler::new(), Some(group));

        window.open().expect("window should open");
        for event in resize_sequence() {
            window.submit(event).expect("resize should be accepted");
        }
        window.wait_idle();
        window.close();

        assert_eq!(window.dimensions(), Dimensions::new(2140, 4116));
        assert_eq!(window.applied(), 7);
    }

    #[test]
    fn keeps_initial_size_until_opened_and_resized() {
        let window = Window::create("Idle", 800, 600, ResizeHandler::new(), None);

        assert_eq!(window.title(), "Idle");
        assert_eq!(window.dimensions(), Dimensions::new(800, 600));
        assert_eq!(window.status(), ListenerStatus::Idle);
    }

    #[test]
    fn handler_failure_leaves_previous_size_and_reports_status() {
        let group = WaitGroup::new();
        let window = Window::create(
            "Failing",
            320,
            240,
            ResizeHandler::failing_at(4),
            Some(group),
        );

        window.open().expect("window should open");
        for event in resize_sequence() {
            let _ = window.submit(event);
        }
        window.wait_idle();

        assert_eq!(window.dimensions(), Dimensions::new(800, 600));
        assert_eq!(window.applied(), 3);
        assert_eq!(
            window.status().failure().map(|failure| failure.sequence),
            Some(4)
        );
    }

    #[test]
    fn submit_after_close_fails() {
        let window = Window::create("Closed", 800, 600, ResizeHandler::new(), None);

        window.open().expect("window should open");
        window.close();
        let error = window
            .submit(ResizeEvent::new(1, 1))
            .expect_err("closed window must reject resizes");

        assert!(matches!(error, ListenerError::SendAfterClose { .. }));
    }

    #[test]
    fn opening_twice_is_rejected() {
        let window = Window::create("Twice", 800, 600, ResizeHandler::new(), None);

        window.open().expect("first open should succeed");

        assert!(matches!(
            window.open(),
            Err(ListenerError::AlreadyStarted { .. })
        ));
    }

    #[test]
    fn close_then_join_applies_queued_resizes() {
        let window = Window::create(
            "Draining",
            800,
            600,
            |event: &ResizeEvent| Ok::<_, HandlerError>(event.target()),
            None,
        );

        window.open().expect("window should open");
        for event in resize_sequence() {
            window.submit(event).expect("resize should be accepted");
        }
        window.close();
        window.join().expect("worker should exit");

        assert_eq!(window.dimensions(), Dimensions::new(2140, 4116));
        assert_eq!(window.status(), ListenerStatus::Stopped);
        assert!(window.wait_idle_timeout(Duration::from_millis(1)));
        assert_eq!(window.pending_resizes(), 0);
    }

    #[test]
    fn pending_resizes_tracks_unconsumed_submissions() {
        let window = Window::create(
            "Pending",
            800,
            600,
            ResizeHandler::new(),
            Some(WaitGroup::new()),
        );

        window
            .submit(ResizeEvent::new(640, 480))
            .expect("resize before open is buffered");
        assert_eq!(window.pending_resizes(), 1);

        window.open().expect("window should open");
        window.wait_idle();

        assert_eq!(window.pending_resizes(), 0);
        assert_eq!(window.dimensions(), Dimensions::new(640, 480));
    }
}
