//! Application service: create an application and wait for it to run.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::time::Duration;

use tracing::{debug, info};

use crate::application::ports::{
    Cluster, Clock, ImageMetadataSource, LogTailer, ProgressReporter,
};
use crate::application::services::poll::{PollRequest, poll_until_all_instances_running};
use crate::domain::app::{CreationRequest, ResourceLimits, reachable_urls};
use crate::domain::create::validate_create_args;
use crate::domain::env::build_environment;
use crate::domain::exposed_ports::resolve_exposed_ports;
use crate::domain::monitor::{MonitorFlags, resolve_monitor_config};
use crate::domain::routes::parse_route_overrides;
use crate::domain::{AppError, MonitorConfig, PollAction, PollOutcome};

/// Inputs of `ltc create`, as given by the user.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct CreateOptions {
    /// Positional arguments, including a `--` before any start command.
    pub args: Vec<String>,
    /// `--working-dir`; empty means "from image metadata".
    pub working_dir: String,
    pub run_as_root: bool,
    /// `--env` tokens, `NAME=VALUE` or `NAME`.
    pub env: Vec<String>,
    /// The invoking shell's environment as `NAME=VALUE` strings.
    pub ambient_env: Vec<String>,
    /// `--cpu-weight` as typed; range checked by [`validate_create_args`].
    pub cpu_weight: i64,
    pub memory_mb: u64,
    pub disk_mb: u64,
    /// `--ports`, comma separated.
    pub ports: String,
    pub no_monitor: bool,
    pub monitor_port: Option<u16>,
    pub monitor_url: String,
    pub monitor_timeout: Duration,
    /// `--routes`, `PORT:PREFIX` clauses.
    pub routes: String,
    pub no_routes: bool,
    pub instances: u32,
    /// Poll timeout.
    pub timeout: Duration,
    /// Target domain used for reported URLs.
    pub domain: String,
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
    pub name: String,
    pub instances: u32,
    pub poll: PollOutcome,
    /// URLs the app is (or will be) reachable at; empty when `no_routes`.
    pub urls: Vec<String>,
    pub no_routes: bool,
}

/// Stops log tailing when dropped.
struct TailGuard<'a, T: LogTailer>(&'a T);

impl<T: LogTailer> Drop for TailGuard<'_, T> {
    fn drop(&mut self) {
        self.0.stop();
    }
}

/// Create an application and wait for its instances to run.
///
/// Every resolver runs before anything is submitted; the first failure aborts
/// the workflow. Log tailing runs for the duration of the poll and is stopped
/// on every exit path.
///
/// # Errors
///
/// Returns an [`AppError`] when validation, metadata lookup, resolution or
/// submission fails. A timed-out or unplaceable poll is not an error; it is
/// reported in [`CreateOutcome::poll`].
pub async fn create_app(
    metadata: &impl ImageMetadataSource,
    cluster: &impl Cluster,
    tailer: &impl LogTailer,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    opts: CreateOptions,
) -> Result<CreateOutcome, AppError> {
    let positionals = validate_create_args(&opts.args, opts.cpu_weight)?;
    let name = positionals.name;

    let image = metadata
        .fetch(&positionals.image)
        .await
        .map_err(|e| AppError::ImageMetadata(format!("{e:#}")))?;
    debug!(image = %positionals.image, ?image, "fetched image metadata");

    let resolved = resolve_exposed_ports(&opts.ports, &image)?;
    if let Some(notice) = resolved.notice() {
        reporter.step(&notice);
    }

    let monitor = resolve_monitor_config(
        &resolved.ports,
        &MonitorFlags {
            no_monitor: opts.no_monitor,
            port: opts.monitor_port,
            url: &opts.monitor_url,
            timeout: opts.monitor_timeout,
        },
    )?;

    let mut working_dir = opts.working_dir;
    if working_dir.is_empty() {
        reporter.step("No working directory specified, using working directory from the image metadata...");
        if image.working_dir.is_empty() {
            working_dir = "/".to_string();
        } else {
            working_dir = image.working_dir.clone();
            reporter.step("Working directory is:");
            reporter.detail(&working_dir);
        }
    }

    match &monitor {
        MonitorConfig::None => reporter.step("No ports will be monitored."),
        MonitorConfig::Port { port, .. } | MonitorConfig::Url { port, .. } => {
            reporter.step(&format!("Monitoring the app on port {port}..."));
        }
    }

    let (start_command, app_args) = match positionals.start_command {
        Some(command) => (command, positionals.app_args),
        None => {
            let Some((first, rest)) = image.start_command.split_first() else {
                return Err(AppError::NoStartCommand);
            };
            reporter.step("No start command specified, using start command from the image metadata...");
            reporter.step("Start command is:");
            reporter.detail(&image.start_command.join(" "));
            (first.clone(), rest.to_vec())
        }
    };

    let route_overrides = parse_route_overrides(&opts.routes)?;
    let environment = build_environment(&opts.env, &name, &opts.ambient_env);

    let request = CreationRequest {
        name: name.clone(),
        image: positionals.image,
        start_command,
        app_args,
        environment,
        privileged: opts.run_as_root,
        monitor,
        instances: opts.instances,
        limits: ResourceLimits {
            // Only app args can let an out-of-range weight through; the cluster
            // applies its default for 0.
            cpu_weight: u32::try_from(opts.cpu_weight).unwrap_or(0),
            memory_mb: opts.memory_mb,
            disk_mb: opts.disk_mb,
        },
        working_dir,
        exposed_ports: resolved.ports,
        route_overrides: route_overrides.clone(),
        no_routes: opts.no_routes,
        timeout: opts.timeout,
    };
    info!(app = %name, instances = request.instances, "submitting creation request");

    cluster
        .submit(request)
        .await
        .map_err(|e| AppError::SubmitFailed(format!("{e:#}")))?;
    reporter.step(&format!("Creating App: {name}"));

    let poll = {
        tailer.start(&name);
        let _tail = TailGuard(tailer);
        poll_until_all_instances_running(
            cluster,
            clock,
            reporter,
            PollRequest {
                app_name: &name,
                instances: opts.instances,
                timeout: opts.timeout,
                action: PollAction::Start,
            },
        )
        .await
    };

    let urls = if opts.no_routes {
        Vec::new()
    } else {
        reachable_urls(&name, &route_overrides, &opts.domain)
    };
    report_reachability(reporter, &name, poll, opts.no_routes, &urls);

    Ok(CreateOutcome {
        name,
        instances: opts.instances,
        poll,
        urls,
        no_routes: opts.no_routes,
    })
}

fn report_reachability(
    reporter: &impl ProgressReporter,
    name: &str,
    poll: PollOutcome,
    no_routes: bool,
    urls: &[String],
) {
    match poll {
        PollOutcome::PlacementFailed => return,
        _ if no_routes => {
            reporter.success(&format!("{name} is now running."));
            return;
        }
        PollOutcome::Running(_) => {
            reporter.success(&format!("{name} is now running."));
            reporter.step("App is reachable at:");
        }
        PollOutcome::TimedOut => reporter.step("App will be reachable at:"),
    }
    for url in urls {
        reporter.detail(url);
    }
}
