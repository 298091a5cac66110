//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::domain::{CreationRequest, ImageMetadata, InstanceStatus, LtcConfig};

// ── Cluster Ports ─────────────────────────────────────────────────────────────

/// Resolves container image metadata from a registry or local daemon.
#[allow(async_fn_in_trait)]
pub trait ImageMetadataSource {
    /// Fetch working directory, start command and exposed ports for `image`.
    async fn fetch(&self, image: &str) -> Result<ImageMetadata>;
}

/// Submits application creation requests to the scheduler.
#[allow(async_fn_in_trait)]
pub trait AppSubmitter {
    /// Create the application described by `request`.
    async fn submit(&self, request: CreationRequest) -> Result<()>;
}

/// Changes the desired instance count of an existing application.
#[allow(async_fn_in_trait)]
pub trait AppScaler {
    /// Set the desired instance count for `name`.
    async fn scale(&self, name: &str, instances: u32) -> Result<()>;
}

/// Reports per-application instance state.
#[allow(async_fn_in_trait)]
pub trait InstanceStatusQuery {
    /// Running instance count and whether placement failed for `name`.
    async fn instances_status(&self, name: &str) -> Result<InstanceStatus>;
}

/// Composite of the three cluster ports.
pub trait Cluster: AppSubmitter + AppScaler + InstanceStatusQuery {}

/// Blanket implementation: any type implementing all three cluster ports is a `Cluster`.
impl<T> Cluster for T where T: AppSubmitter + AppScaler + InstanceStatusQuery {}

/// Streams application logs to the user while a command waits.
///
/// `start` begins an independent background stream; `stop` releases it and
/// must be idempotent.
pub trait LogTailer {
    /// Begin streaming logs for `app_name`.
    fn start(&self, app_name: &str);
    /// Stop streaming. Safe to call when nothing is streaming.
    fn stop(&self);
}

// ── Time Port ─────────────────────────────────────────────────────────────────

/// Time source for retry loops, replaceable with a virtual clock in tests.
#[allow(async_fn_in_trait)]
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;
    /// Suspend for `duration`.
    async fn sleep(&self, duration: Duration);
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(&self, program: &str, args: &[&str], timeout: Duration)
    -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an informational notice.
    fn step(&self, message: &str);
    /// Emit an indented continuation line (paths, commands, URLs).
    fn detail(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit an error message.
    fn error(&self, message: &str);
    /// Emit one progress marker on the current line.
    fn tick(&self);
    /// Terminate the current progress line.
    fn end_line(&self);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when none is stored.
    fn load(&self) -> Result<LtcConfig>;
    /// Persist the configuration.
    fn save(&self, config: &LtcConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}
