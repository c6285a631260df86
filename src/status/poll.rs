//! Completion polling: block until every task spawned from a request has
//! reached a terminal state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

use crate::status::QueryFilter;
use crate::status::client::{QueryError, StatusClient};
use crate::status::TaskStatus;

/// Granularity of the cancellation check inside the interval sleep.
const SLEEP_SLICE: Duration = Duration::from_millis(200);

#[derive(Debug, Error)]
pub enum PollError {
    #[error("polling cancelled before all tasks completed")]
    Cancelled,
    #[error("polling deadline of {0:?} expired before all tasks completed")]
    DeadlineExceeded(Duration),
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Poll the status backend until every observed task is terminal.
///
/// Returns the final task set once `terminal == total && total > 0`. A
/// request the backend has not ingested yet reports zero tasks and keeps the
/// loop alive, so callers that cannot tolerate an indefinite wait must pass
/// a `max_wait` deadline; the `cancel` flag aborts promptly at the sleep.
pub fn wait_for_completion(
    client: &StatusClient<'_>,
    filter: &QueryFilter,
    poll_interval: Duration,
    cancel: &AtomicBool,
    max_wait: Option<Duration>,
) -> Result<Vec<TaskStatus>, PollError> {
    let started = Instant::now();

    loop {
        if cancel.load(Ordering::SeqCst) {
            warn!("polling cancelled");
            return Err(PollError::Cancelled);
        }

        let tasks = client.query(filter)?;
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.is_terminal()).count();

        if total > 0 && completed == total {
            info!("all {total} task(s) completed");
            return Ok(tasks);
        }

        info!(
            "{total} task(s) found, {completed} completed, waiting {}s",
            poll_interval.as_secs()
        );

        if let Some(limit) = max_wait {
            if started.elapsed() >= limit {
                warn!("polling deadline expired after {:?}", started.elapsed());
                return Err(PollError::DeadlineExceeded(limit));
            }
        }

        sleep_with_cancel(poll_interval, cancel)?;
    }
}

/// Sleep one interval in slices so a cancellation aborts promptly instead of
/// waiting out the full interval.
fn sleep_with_cancel(interval: Duration, cancel: &AtomicBool) -> Result<(), PollError> {
    let deadline = Instant::now() + interval;
    loop {
        if cancel.load(Ordering::SeqCst) {
            warn!("polling cancelled during wait");
            return Err(PollError::Cancelled);
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(());
        }
        std::thread::sleep(SLEEP_SLICE.min(deadline - now));
    }
}
