use std::time::Duration;

use anyhow::{Context, Result};

use crate::{
    domain::{dimensions::Dimensions, events::ResizeEvent},
    infra::config::AppConfig,
    listener::{ListenerError, ListenerStatus, WaitGroup},
    window::{ResizeHandler, Window},
};

const RESIZE_SESSION_WAIT_TIMED_OUT: &str = "RESIZE_SESSION_WAIT_TIMED_OUT";
const RESIZE_SESSION_STALE_STATE: &str = "RESIZE_SESSION_STALE_STATE";

/// Everything needed to drive one window through a batch of resizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPlan {
    pub title: String,
    pub initial: Dimensions,
    pub events: Vec<ResizeEvent>,
    pub wait: bool,
    pub wait_timeout: Option<Duration>,
    /// Makes the handler reject the n-th resize (1-based).
    pub fail_at: Option<u64>,
}

impl SessionPlan {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            title: config.window.title.clone(),
            initial: Dimensions::new(config.window.width, config.window.height),
            events: config
                .events
                .sequence
                .iter()
                .copied()
                .map(ResizeEvent::from)
                .collect(),
            wait: config.completion.wait,
            wait_timeout: config.completion.timeout_ms.map(Duration::from_millis),
            fail_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Skipped,
    Completed,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub title: String,
    pub initial: Dimensions,
    pub final_dimensions: Dimensions,
    pub last_submitted: Option<Dimensions>,
    pub requested: usize,
    pub rejected: usize,
    pub applied: u64,
    pub wait: WaitOutcome,
    pub status: ListenerStatus,
}

impl SessionReport {
    /// Whether the window ended on the last resize that was asked for.
    ///
    /// False after a handler failure; that is an expected outcome of the
    /// fail-fast policy, not a bug.
    pub fn reflects_last_submission(&self) -> bool {
        match self.last_submitted {
            Some(last) => !self.status.is_failed() && self.final_dimensions == last,
            None => self.final_dimensions == self.initial,
        }
    }

    /// Final size and outcome, printed once the window is closed and joined.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Height is {}", self.final_dimensions.height),
            format!("Width is {}", self.final_dimensions.width),
        ];

        if let Some(failure) = self.status.failure() {
            lines.push(format!(
                "Resize #{} failed ({}); {} of {} resizes applied, {} queued resizes dropped.",
                failure.sequence, failure.reason, self.applied, self.requested, failure.discarded
            ));
        }

        if self.wait == WaitOutcome::TimedOut {
            lines.push("Completion wait timed out; the queue was drained on close.".to_owned());
        }

        lines
    }
}

/// Opens a window, submits every planned resize, optionally waits for them to
/// be consumed, then closes and joins the window before reading its size.
pub fn run_resize_session(plan: &SessionPlan) -> Result<SessionReport> {
    let wait_group = plan.wait.then(WaitGroup::new);
    let handler = match plan.fail_at {
        Some(sequence) => ResizeHandler::failing_at(sequence),
        None => ResizeHandler::new(),
    };
    let window = Window::create(
        plan.title.clone(),
        plan.initial.width,
        plan.initial.height,
        handler,
        wait_group,
    );

    window.open().context("failed to open window")?;
    println!(
        "Window {} opened with size {}",
        window.title(),
        window.dimensions()
    );

    let mut rejected = 0;
    for event in &plan.events {
        match window.submit(*event) {
            Ok(()) => {}
            Err(error @ ListenerError::Halted { .. }) => {
                tracing::warn!(error = %error, "resize not submitted");
                rejected += 1;
            }
            Err(error) => return Err(error).context("failed to submit resize"),
        }
    }

    let wait = match (plan.wait, plan.wait_timeout) {
        (false, _) => WaitOutcome::Skipped,
        (true, None) => {
            window.wait_idle();
            WaitOutcome::Completed
        }
        (true, Some(timeout)) => {
            if window.wait_idle_timeout(timeout) {
                WaitOutcome::Completed
            } else {
                tracing::warn!(
                    code = RESIZE_SESSION_WAIT_TIMED_OUT,
                    timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    pending = window.pending_resizes(),
                    "completion wait timed out"
                );
                WaitOutcome::TimedOut
            }
        }
    };

    window.close();
    println!("Window {} closed", window.title());
    window.join().context("resize listener did not shut down cleanly")?;

    let report = SessionReport {
        title: window.title().to_owned(),
        initial: plan.initial,
        final_dimensions: window.dimensions(),
        last_submitted: plan.events.last().map(ResizeEvent::target),
        requested: plan.events.len(),
        rejected,
        applied: window.applied(),
        wait,
        status: window.status(),
    };

    if !report.reflects_last_submission() {
        tracing::warn!(
            code = RESIZE_SESSION_STALE_STATE,
            status = report.status.as_label(),
            final_size = %report.final_dimensions,
            "final window size does not match the last requested resize"
        );
    }

    Ok(report)
}
