//! `ltc create`: create a docker application on the target cluster.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::create_app::{CreateOptions, CreateOutcome, create_app};
use crate::commands::parse_duration;
use crate::domain::create::TERMINATOR;
use crate::domain::error::PLACEMENT_ERROR_MESSAGE;
use crate::domain::{ExitCategory, PollOutcome};
use crate::infra::clock::SystemClock;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::docker::DockerMetadataFetcher;
use crate::infra::logs::{NoopLogTailer, ReceptorLogTailer};
use crate::infra::receptor::ReceptorClient;
use crate::output::{SilentReporter, json};

/// Arguments for the create command.
#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct CreateArgs {
    /// APP_NAME DOCKER_IMAGE
    #[arg(value_name = "APP_NAME DOCKER_IMAGE")]
    pub positional: Vec<String>,

    /// Custom start command and its arguments
    #[arg(last = true, value_name = "START_COMMAND")]
    pub start_command: Vec<String>,

    /// Working directory for the start command (default: from image metadata)
    #[arg(short = 'w', long, default_value = "")]
    pub working_dir: String,

    /// Run the container as root
    #[arg(short = 'r', long)]
    pub run_as_root: bool,

    /// Environment variable, NAME=VALUE or NAME to copy from this shell (repeatable)
    #[arg(short = 'e', long = "env", value_name = "NAME[=VALUE]")]
    pub env: Vec<String>,

    /// Relative CPU weight, 1-100
    #[arg(short = 'c', long, default_value_t = 100, allow_negative_numbers = true)]
    pub cpu_weight: i64,

    /// Memory limit in MB
    #[arg(short = 'm', long, default_value_t = 128)]
    pub memory_mb: u64,

    /// Disk limit in MB (0 = unlimited)
    #[arg(short = 'd', long, default_value_t = 0)]
    pub disk_mb: u64,

    /// Ports to expose, comma separated (default: from image metadata, else 8080)
    #[arg(short = 'p', long, default_value = "")]
    pub ports: String,

    /// Disable health checking
    #[arg(long)]
    pub no_monitor: bool,

    /// Port to health-check (default: lowest exposed port)
    #[arg(short = 'M', long)]
    pub monitor_port: Option<u16>,

    /// URL to health-check, as PORT:/path
    #[arg(short = 'U', long, default_value = "")]
    pub monitor_url: String,

    /// Health-check timeout
    #[arg(long, default_value = "1s", value_parser = parse_duration)]
    pub monitor_timeout: Duration,

    /// Route overrides, as PORT:HOSTNAME_PREFIX clauses separated by commas
    #[arg(short = 'R', long, default_value = "")]
    pub routes: String,

    /// Do not register any routes
    #[arg(long)]
    pub no_routes: bool,

    /// Number of instances
    #[arg(short = 'i', long, default_value_t = 1)]
    pub instances: u32,

    /// How long to wait for instances to start
    #[arg(short = 't', long, default_value = "2m", value_parser = parse_duration)]
    pub timeout: Duration,
}

impl CreateArgs {
    /// Positionals as typed, with `--` restored before the start command.
    #[must_use]
    pub fn raw_positionals(&self) -> Vec<String> {
        let mut args = self.positional.clone();
        if !self.start_command.is_empty() {
            args.push(TERMINATOR.to_string());
            args.extend(self.start_command.iter().cloned());
        }
        args
    }

    fn into_options(self, domain: String, ambient_env: Vec<String>) -> CreateOptions {
        CreateOptions {
            args: self.raw_positionals(),
            working_dir: self.working_dir,
            run_as_root: self.run_as_root,
            env: self.env,
            ambient_env,
            cpu_weight: self.cpu_weight,
            memory_mb: self.memory_mb,
            disk_mb: self.disk_mb,
            ports: self.ports,
            no_monitor: self.no_monitor,
            monitor_port: self.monitor_port.filter(|p| *p > 0),
            monitor_url: self.monitor_url,
            monitor_timeout: self.monitor_timeout,
            routes: self.routes,
            no_routes: self.no_routes,
            instances: self.instances,
            timeout: self.timeout,
            domain,
        }
    }
}

/// Run the create command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or output cannot be
/// serialized. Workflow failures are reported and mapped to exit codes.
pub async fn run(app: &AppContext, args: CreateArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let domain = match config_service::require_target(&config) {
        Ok(domain) => domain.to_string(),
        Err(e) => return app.fail(&e),
    };

    let ambient_env = std::env::vars()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    let opts = args.into_options(domain.clone(), ambient_env);

    let metadata = DockerMetadataFetcher::new(TokioCommandRunner::default());
    let cluster = ReceptorClient::new(&domain, &config);

    let result = if app.is_json() {
        create_app(&metadata, &cluster, &NoopLogTailer, &SystemClock, &SilentReporter, opts).await
    } else {
        let tailer = ReceptorLogTailer::new(&domain);
        create_app(&metadata, &cluster, &tailer, &SystemClock, &app.reporter(), opts).await
    };

    match result {
        Ok(outcome) => report_outcome(app, &outcome),
        Err(e) => app.fail(&e),
    }
}

fn report_outcome(app: &AppContext, outcome: &CreateOutcome) -> Result<ExitCode> {
    if outcome.poll == PollOutcome::PlacementFailed {
        // The narrative already carried the message.
        if app.is_json() {
            return app.fail_with(ExitCategory::PlacementError, PLACEMENT_ERROR_MESSAGE);
        }
        return Ok(ExitCode::from(ExitCategory::PlacementError.code()));
    }
    if app.is_json() {
        println!(
            "{}",
            json::format_app_status(
                &outcome.name,
                outcome.poll.is_running(),
                outcome.instances,
                &outcome.urls,
                outcome.no_routes,
            )?
        );
    }
    Ok(ExitCode::SUCCESS)
}
