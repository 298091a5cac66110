//! Tests for the poll loop on a virtual clock.

#![allow(clippy::expect_used)]

use std::time::{Duration, Instant};

use ltc_cli::application::services::poll::{
    MAX_POLL_TIMEOUT, POLL_INTERVAL, PollRequest, poll_deadline, poll_until_all_instances_running,
};
use ltc_cli::domain::error::PLACEMENT_ERROR_MESSAGE;
use ltc_cli::domain::{PollAction, PollOutcome};

use crate::mocks::{Event, FakeClock, RecordingReporter, StatusScript, status};

fn request(instances: u32, timeout_secs: u64, action: PollAction) -> PollRequest<'static> {
    PollRequest {
        app_name: "cool-web-app",
        instances,
        timeout: Duration::from_secs(timeout_secs),
        action,
    }
}

#[tokio::test]
async fn test_poll_immediate_success_prints_no_markers() {
    let query = StatusScript::always(3, false);
    let clock = FakeClock::new();
    let reporter = RecordingReporter::default();

    let outcome =
        poll_until_all_instances_running(&query, &clock, &reporter, request(3, 10, PollAction::Start))
            .await;

    assert_eq!(outcome, PollOutcome::Running(3));
    assert_eq!(query.queries(), 1);
    assert_eq!(reporter.ticks(), 0);
    assert_eq!(clock.sleeps(), 0);
    assert_eq!(reporter.events(), vec![Event::EndLine]);
}

#[tokio::test]
async fn test_poll_succeeds_after_pending_ticks() {
    let query = StatusScript::scripted(vec![status(0, false), status(1, false)], 2, false);
    let clock = FakeClock::new();
    let reporter = RecordingReporter::default();

    let outcome =
        poll_until_all_instances_running(&query, &clock, &reporter, request(2, 10, PollAction::Start))
            .await;

    assert_eq!(outcome, PollOutcome::Running(2));
    assert_eq!(query.queries(), 3);
    assert_eq!(reporter.ticks(), 2);
    assert_eq!(clock.elapsed(), POLL_INTERVAL * 2);
}

#[tokio::test]
async fn test_poll_placement_error_stops_immediately() {
    let query = StatusScript::scripted(vec![status(0, false)], 0, true);
    let clock = FakeClock::new();
    let reporter = RecordingReporter::default();

    let outcome = poll_until_all_instances_running(
        &query,
        &clock,
        &reporter,
        request(5, 600, PollAction::Start),
    )
    .await;

    assert_eq!(outcome, PollOutcome::PlacementFailed);
    assert_eq!(query.queries(), 2);
    assert_eq!(clock.elapsed(), POLL_INTERVAL);
    assert_eq!(
        reporter.events().last(),
        Some(&Event::Error(PLACEMENT_ERROR_MESSAGE.to_string()))
    );
}

#[tokio::test]
async fn test_poll_placement_error_wins_over_running_count() {
    let query = StatusScript::always(1, true);
    let clock = FakeClock::new();
    let reporter = RecordingReporter::default();

    let outcome =
        poll_until_all_instances_running(&query, &clock, &reporter, request(1, 10, PollAction::Start))
            .await;

    assert_eq!(outcome, PollOutcome::PlacementFailed);
}

#[tokio::test]
async fn test_poll_times_out_after_timeout_over_interval_queries() {
    let query = StatusScript::always(1, false);
    let clock = FakeClock::new();
    let reporter = RecordingReporter::default();

    let outcome = poll_until_all_instances_running(
        &query,
        &clock,
        &reporter,
        request(2, 28, PollAction::Start),
    )
    .await;

    assert_eq!(outcome, PollOutcome::TimedOut);
    assert_eq!(query.queries(), 28);
    assert_eq!(reporter.ticks(), 28);
    assert_eq!(clock.elapsed(), Duration::from_secs(28));
    assert!(reporter.contains("Timed out waiting for the container to come up."));
    assert!(reporter.contains("Lattice is still downloading your application in the background."));
    assert!(reporter.contains("To view logs:\n\tltc logs cool-web-app"));
    assert!(reporter.contains("To view status:\n\tltc status cool-web-app"));
}

#[tokio::test]
async fn test_poll_scale_timeout_uses_scale_narrative() {
    let query = StatusScript::always(0, false);
    let clock = FakeClock::new();
    let reporter = RecordingReporter::default();

    let outcome =
        poll_until_all_instances_running(&query, &clock, &reporter, request(4, 3, PollAction::Scale))
            .await;

    assert_eq!(outcome, PollOutcome::TimedOut);
    assert!(reporter.contains("Timed out waiting for the container to scale."));
    assert!(reporter.contains("Lattice is still scaling your application in the background."));
    assert!(!reporter.contains("This typically happens because docker layers can take time to download."));
}

#[tokio::test]
async fn test_poll_query_errors_count_as_not_yet_running() {
    let query = StatusScript::scripted(
        vec![Err(anyhow::anyhow!("receptor unavailable")), status(0, false)],
        1,
        false,
    );
    let clock = FakeClock::new();
    let reporter = RecordingReporter::default();

    let outcome =
        poll_until_all_instances_running(&query, &clock, &reporter, request(1, 10, PollAction::Start))
            .await;

    assert_eq!(outcome, PollOutcome::Running(1));
    assert_eq!(reporter.ticks(), 2);
}

#[tokio::test]
async fn test_poll_zero_timeout_never_queries() {
    let query = StatusScript::always(1, false);
    let clock = FakeClock::new();
    let reporter = RecordingReporter::default();

    let outcome =
        poll_until_all_instances_running(&query, &clock, &reporter, request(1, 0, PollAction::Start))
            .await;

    assert_eq!(outcome, PollOutcome::TimedOut);
    assert_eq!(query.queries(), 0);
}

#[test]
fn test_poll_deadline_clamps_huge_timeouts() {
    let now = Instant::now();
    assert_eq!(poll_deadline(now, Duration::MAX), now + MAX_POLL_TIMEOUT);
    assert_eq!(poll_deadline(now, Duration::from_secs(28)), now + Duration::from_secs(28));
}

#[tokio::test]
async fn test_poll_with_maximum_timeout_still_succeeds() {
    let query = StatusScript::scripted(vec![status(0, false)], 2, false);
    let clock = FakeClock::new();
    let reporter = RecordingReporter::default();
    let req = PollRequest {
        timeout: Duration::MAX,
        ..request(2, 0, PollAction::Start)
    };

    let outcome = poll_until_all_instances_running(&query, &clock, &reporter, req).await;

    assert_eq!(outcome, PollOutcome::Running(2));
    assert_eq!(query.queries(), 2);
}
