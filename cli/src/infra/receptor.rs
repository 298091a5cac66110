//! HTTP client for the receptor scheduler API.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ports::{AppScaler, AppSubmitter, InstanceStatusQuery};
use crate::domain::app::app_url;
use crate::domain::config::receptor_url_for;
use crate::domain::{CreationRequest, InstanceStatus, LtcConfig, MonitorConfig};

/// Scheduling domain every desired LRP is created in.
pub const LRP_DOMAIN: &str = "lattice";

/// Actual LRP state counted as running.
const RUNNING_STATE: &str = "RUNNING";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DesiredLrp {
    pub process_guid: String,
    pub domain: &'static str,
    pub root_fs: String,
    pub instances: u32,
    pub cpu_weight: u32,
    pub memory_mb: u64,
    pub disk_mb: u64,
    pub privileged: bool,
    pub ports: Vec<u16>,
    pub routes: Vec<RouteEntry>,
    pub env: Vec<EnvVar>,
    pub action: RunAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<MonitorSpec>,
    pub start_timeout: u64,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RouteEntry {
    pub port: u16,
    pub hostnames: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RunAction {
    pub path: String,
    pub args: Vec<String>,
    pub dir: String,
    pub user: &'static str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MonitorSpec {
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub timeout_ms: u64,
}

#[derive(Debug, Serialize)]
struct ScaleBody {
    instances: u32,
}

#[derive(Debug, Deserialize)]
struct ActualLrp {
    #[serde(default)]
    state: String,
    #[serde(default)]
    placement_error: String,
}

/// Build the desired LRP body for `request` on the `domain` target.
///
/// Without overrides, the app name routes to the lowest exposed port and every
/// port also gets a `{name}-{port}` hostname.
#[must_use]
pub fn desired_lrp_body(request: &CreationRequest, domain: &str) -> DesiredLrp {
    let routes = if request.no_routes {
        Vec::new()
    } else {
        route_entries(request, domain)
    };

    let monitor = match &request.monitor {
        MonitorConfig::None => None,
        MonitorConfig::Port { port, timeout } => Some(MonitorSpec {
            port: *port,
            uri: None,
            timeout_ms: duration_ms(*timeout),
        }),
        MonitorConfig::Url { port, uri, timeout } => Some(MonitorSpec {
            port: *port,
            uri: Some(uri.clone()),
            timeout_ms: duration_ms(*timeout),
        }),
    };

    DesiredLrp {
        process_guid: request.name.clone(),
        domain: LRP_DOMAIN,
        root_fs: format!("docker:///{}", request.image),
        instances: request.instances,
        cpu_weight: request.limits.cpu_weight,
        memory_mb: request.limits.memory_mb,
        disk_mb: request.limits.disk_mb,
        privileged: request.privileged,
        ports: request.exposed_ports.clone(),
        routes,
        env: request
            .environment
            .iter()
            .map(|(name, value)| EnvVar {
                name: name.clone(),
                value: value.clone(),
            })
            .collect(),
        action: RunAction {
            path: request.start_command.clone(),
            args: request.app_args.clone(),
            dir: request.working_dir.clone(),
            user: if request.privileged { "root" } else { "vcap" },
        },
        monitor,
        start_timeout: request.timeout.as_secs(),
    }
}

fn route_entries(request: &CreationRequest, domain: &str) -> Vec<RouteEntry> {
    let mut by_port: BTreeMap<u16, Vec<String>> = BTreeMap::new();
    let host = |prefix: &str| {
        app_url(prefix, domain)
            .trim_start_matches("http://")
            .to_string()
    };

    if request.route_overrides.is_empty() {
        if let Some(primary) = request.exposed_ports.iter().min() {
            by_port.entry(*primary).or_default().push(host(&request.name));
        }
        for port in &request.exposed_ports {
            by_port
                .entry(*port)
                .or_default()
                .push(host(&format!("{}-{port}", request.name)));
        }
    } else {
        for route in &request.route_overrides {
            by_port
                .entry(route.port)
                .or_default()
                .push(host(&route.hostname_prefix));
        }
    }

    by_port
        .into_iter()
        .map(|(port, hostnames)| RouteEntry { port, hostnames })
        .collect()
}

fn duration_ms(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Receptor API client implementing the cluster ports.
pub struct ReceptorClient {
    http: reqwest::Client,
    base_url: String,
    domain: String,
    credentials: Option<(String, String)>,
}

impl ReceptorClient {
    /// Client for the receptor of the configured target.
    #[must_use]
    pub fn new(domain: &str, config: &LtcConfig) -> Self {
        let credentials = config
            .username
            .clone()
            .map(|user| (user, config.password.clone().unwrap_or_default()));
        Self {
            http: reqwest::Client::new(),
            base_url: receptor_url_for(domain),
            domain: domain.to_string(),
            credentials,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match &self.credentials {
            Some((user, password)) => builder.basic_auth(user, Some(password)),
            None => builder,
        }
    }
}

impl AppSubmitter for ReceptorClient {
    async fn submit(&self, request: CreationRequest) -> Result<()> {
        let body = desired_lrp_body(&request, &self.domain);
        debug!(app = %request.name, "submitting desired LRP");
        self.request(reqwest::Method::POST, "/v1/desired_lrps")
            .json(&body)
            .send()
            .await
            .context("contacting receptor")?
            .error_for_status()
            .context("receptor rejected desired LRP")?;
        Ok(())
    }
}

impl AppScaler for ReceptorClient {
    async fn scale(&self, name: &str, instances: u32) -> Result<()> {
        debug!(app = name, instances, "updating desired LRP");
        self.request(reqwest::Method::PUT, &format!("/v1/desired_lrps/{name}"))
            .json(&ScaleBody { instances })
            .send()
            .await
            .context("contacting receptor")?
            .error_for_status()
            .context("receptor rejected instance update")?;
        Ok(())
    }
}

impl InstanceStatusQuery for ReceptorClient {
    async fn instances_status(&self, name: &str) -> Result<InstanceStatus> {
        let actual: Vec<ActualLrp> = self
            .request(reqwest::Method::GET, &format!("/v1/actual_lrps/{name}"))
            .send()
            .await
            .context("contacting receptor")?
            .error_for_status()
            .context("querying actual LRPs")?
            .json()
            .await
            .context("parsing actual LRPs")?;
        Ok(summarize_actual(&actual))
    }
}

fn summarize_actual(actual: &[ActualLrp]) -> InstanceStatus {
    let running = actual.iter().filter(|lrp| lrp.state == RUNNING_STATE).count();
    InstanceStatus {
        running: u32::try_from(running).unwrap_or(u32::MAX),
        placement_error: actual.iter().any(|lrp| !lrp.placement_error.is_empty()),
    }
}
