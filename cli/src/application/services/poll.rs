//! Application service: wait for an application's instances to run.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Time is taken from the injected `Clock`, so tests drive the loop with
//! virtual time.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::application::ports::{Clock, InstanceStatusQuery, ProgressReporter};
use crate::domain::error::PLACEMENT_ERROR_MESSAGE;
use crate::domain::poll::{PollAction, PollOutcome, timeout_guidance, timeout_headline};

/// Delay between status queries.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Longest budget a poll honours; larger timeouts are clamped to it.
pub const MAX_POLL_TIMEOUT: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Deadline for a poll starting at `now`.
#[must_use]
pub fn poll_deadline(now: Instant, timeout: Duration) -> Instant {
    now.checked_add(timeout.min(MAX_POLL_TIMEOUT))
        .unwrap_or(now)
}

/// Parameters for one poll.
#[derive(Debug, Clone, Copy)]
pub struct PollRequest<'a> {
    pub app_name: &'a str,
    /// Instance count that counts as success.
    pub instances: u32,
    /// Budget measured from the first query.
    pub timeout: Duration,
    pub action: PollAction,
}

/// Poll until `instances` are running, placement fails, or the deadline passes.
///
/// Queries once per [`POLL_INTERVAL`] and prints a `.` after every query that
/// is not yet successful. A placement error ends the poll immediately. A
/// failed query counts as "not yet running". On timeout the action-specific
/// guidance is reported; on placement failure the placement error is.
pub async fn poll_until_all_instances_running(
    status: &impl InstanceStatusQuery,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    request: PollRequest<'_>,
) -> PollOutcome {
    let deadline = poll_deadline(clock.now(), request.timeout);
    let mut outcome = PollOutcome::TimedOut;

    while clock.now() < deadline {
        match status.instances_status(request.app_name).await {
            Ok(observed) if observed.placement_error => {
                outcome = PollOutcome::PlacementFailed;
                break;
            }
            Ok(observed) if observed.running == request.instances => {
                outcome = PollOutcome::Running(observed.running);
                break;
            }
            Ok(observed) => {
                debug!(
                    app = request.app_name,
                    running = observed.running,
                    wanted = request.instances,
                    "instances not yet running"
                );
            }
            Err(e) => warn!(app = request.app_name, "instance status query failed: {e:#}"),
        }
        reporter.tick();
        clock.sleep(POLL_INTERVAL).await;
    }
    reporter.end_line();

    match outcome {
        PollOutcome::PlacementFailed => reporter.error(PLACEMENT_ERROR_MESSAGE),
        PollOutcome::TimedOut => {
            reporter.error(timeout_headline(request.action));
            for line in timeout_guidance(request.action, request.app_name) {
                reporter.step(&line);
            }
        }
        PollOutcome::Running(_) => {}
    }

    outcome
}
