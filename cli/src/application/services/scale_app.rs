//! Application service: change an application's instance count.

use std::time::Duration;

use tracing::info;

use crate::application::ports::{AppScaler, Clock, InstanceStatusQuery, ProgressReporter};
use crate::application::services::poll::{PollRequest, poll_until_all_instances_running};
use crate::domain::{AppError, PollAction, PollOutcome};

/// Inputs of `ltc scale`.
#[derive(Debug, Clone)]
pub struct ScaleOptions {
    pub name: String,
    pub instances: u32,
    pub timeout: Duration,
}

/// Scale an application and wait for the new instance count.
///
/// # Errors
///
/// Returns [`AppError::IncorrectUsage`] when `instances` is zero and
/// [`AppError::ScaleFailed`] when the scheduler rejects the request.
pub async fn scale_app(
    cluster: &(impl AppScaler + InstanceStatusQuery),
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    opts: ScaleOptions,
) -> Result<PollOutcome, AppError> {
    let ScaleOptions {
        name,
        instances,
        timeout,
    } = opts;
    if instances < 1 {
        return Err(AppError::IncorrectUsage(
            "Number of Instances must be greater than 0".to_string(),
        ));
    }

    info!(app = %name, instances, "submitting scale request");
    cluster
        .scale(&name, instances)
        .await
        .map_err(|e| AppError::ScaleFailed(format!("{e:#}")))?;
    reporter.step(&format!("Scaling {name} to {instances} instances"));

    let outcome = poll_until_all_instances_running(
        cluster,
        clock,
        reporter,
        PollRequest {
            app_name: &name,
            instances,
            timeout,
            action: PollAction::Scale,
        },
    )
    .await;

    if outcome.is_running() {
        reporter.success("App Scaled Successfully");
    }
    Ok(outcome)
}
