//! Application data model for the create and scale workflows.
//!
//! Every value here is built fresh per invocation and never mutated after
//! construction.

use std::collections::BTreeMap;
use std::time::Duration;

/// Environment key always seeded with the application name.
pub const PROCESS_GUID: &str = "PROCESS_GUID";

/// Port exposed when neither the flags nor the image declare any.
pub const DEFAULT_EXPOSED_PORT: u16 = 8080;

/// Container ports to expose, in resolution order.
pub type ExposedPorts = Vec<u16>;

/// Environment variables passed to every instance; keys are unique.
pub type EnvironmentMap = BTreeMap<String, String>;

/// Route clauses in the order they were given on the command line.
pub type RouteOverrides = Vec<RouteOverride>;

/// An explicit hostname-prefix-to-port mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOverride {
    pub hostname_prefix: String,
    pub port: u16,
}

/// Health-check strategy for application instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorConfig {
    /// No health check.
    None,
    /// Healthy once the port accepts connections.
    Port { port: u16, timeout: Duration },
    /// Healthy once `GET uri` on the port succeeds.
    Url {
        port: u16,
        uri: String,
        timeout: Duration,
    },
}

impl MonitorConfig {
    /// The monitored port, if any.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        match self {
            Self::None => None,
            Self::Port { port, .. } | Self::Url { port, .. } => Some(*port),
        }
    }
}

/// Metadata resolved for a container image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Working directory declared by the image (empty when unset).
    pub working_dir: String,
    /// Entrypoint followed by command, as declared by the image.
    pub start_command: Vec<String>,
    /// Ports declared with `EXPOSE`.
    pub exposed_ports: Vec<u16>,
}

/// Per-instance resource limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Relative CPU weight, 1-100.
    pub cpu_weight: u32,
    pub memory_mb: u64,
    pub disk_mb: u64,
}

/// Everything the scheduler needs to create an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationRequest {
    pub name: String,
    pub image: String,
    pub start_command: String,
    pub app_args: Vec<String>,
    pub environment: EnvironmentMap,
    pub privileged: bool,
    pub monitor: MonitorConfig,
    pub instances: u32,
    pub limits: ResourceLimits,
    pub working_dir: String,
    pub exposed_ports: ExposedPorts,
    pub route_overrides: RouteOverrides,
    pub no_routes: bool,
    pub timeout: Duration,
}

/// Instance counts reported by the cluster for one application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceStatus {
    pub running: u32,
    pub placement_error: bool,
}

/// Public URL for a hostname prefix on the target domain.
#[must_use]
pub fn app_url(hostname_prefix: &str, domain: &str) -> String {
    format!("http://{hostname_prefix}.{domain}")
}

/// URLs reported to the user: one per route override, or the default
/// app-name hostname when there are none.
#[must_use]
pub fn reachable_urls(name: &str, overrides: &[RouteOverride], domain: &str) -> Vec<String> {
    if overrides.is_empty() {
        return vec![app_url(name, domain)];
    }
    overrides
        .iter()
        .map(|route| app_url(&route.hostname_prefix, domain))
        .collect()
}
