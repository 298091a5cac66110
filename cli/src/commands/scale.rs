//! `ltc scale`: change the instance count of an application.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::scale_app::{ScaleOptions, scale_app};
use crate::commands::parse_duration;
use crate::domain::error::PLACEMENT_ERROR_MESSAGE;
use crate::domain::{ExitCategory, PollOutcome};
use crate::infra::clock::SystemClock;
use crate::infra::receptor::ReceptorClient;
use crate::output::{SilentReporter, json};

/// Arguments for the scale command.
#[derive(Args)]
pub struct ScaleArgs {
    /// Application name
    pub app_name: String,

    /// Desired number of instances
    pub instances: u32,

    /// How long to wait for the instances to start
    #[arg(short = 't', long, default_value = "2m", value_parser = parse_duration)]
    pub timeout: Duration,
}

/// Run the scale command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or output cannot be
/// serialized. Workflow failures are reported and mapped to exit codes.
pub async fn run(app: &AppContext, args: ScaleArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let domain = match config_service::require_target(&config) {
        Ok(domain) => domain.to_string(),
        Err(e) => return app.fail(&e),
    };
    let cluster = ReceptorClient::new(&domain, &config);
    let opts = ScaleOptions {
        name: args.app_name.clone(),
        instances: args.instances,
        timeout: args.timeout,
    };

    let result = if app.is_json() {
        scale_app(&cluster, &SystemClock, &SilentReporter, opts).await
    } else {
        scale_app(&cluster, &SystemClock, &app.reporter(), opts).await
    };

    match result {
        Ok(PollOutcome::PlacementFailed) if app.is_json() => {
            app.fail_with(ExitCategory::PlacementError, PLACEMENT_ERROR_MESSAGE)
        }
        Ok(PollOutcome::PlacementFailed) => {
            Ok(ExitCode::from(ExitCategory::PlacementError.code()))
        }
        Ok(outcome) => {
            if app.is_json() {
                println!(
                    "{}",
                    json::format_scale_status(&args.app_name, outcome.is_running(), args.instances)?
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => app.fail(&e),
    }
}
