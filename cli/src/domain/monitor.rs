//! Health-check (monitor) resolution.

use std::time::Duration;

use crate::domain::app::MonitorConfig;
use crate::domain::error::MonitorError;

/// Monitor-related flags as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct MonitorFlags<'a> {
    /// `--no-monitor`.
    pub no_monitor: bool,
    /// `--monitor-port`; `None` or `Some(0)` means unset.
    pub port: Option<u16>,
    /// `--monitor-url` as `PORT:URI`; empty means unset.
    pub url: &'a str,
    /// `--monitor-timeout`.
    pub timeout: Duration,
}

/// Resolve the monitor configuration against the exposed ports.
///
/// First match wins: `--no-monitor`, then `--monitor-url`, then a port
/// monitor on `--monitor-port` or the lowest exposed port.
///
/// # Errors
///
/// - [`MonitorError::InvalidPort`] when the URL is not exactly `PORT:URI` or
///   its port is not an integer in 0-65535.
/// - [`MonitorError::PortNotExposed`] when the chosen port is not exposed.
/// - [`MonitorError::NoExposedPorts`] when a port monitor is needed and
///   `exposed` is empty.
pub fn resolve_monitor_config(
    exposed: &[u16],
    flags: &MonitorFlags<'_>,
) -> Result<MonitorConfig, MonitorError> {
    if flags.no_monitor {
        return Ok(MonitorConfig::None);
    }

    if !flags.url.is_empty() {
        let fields: Vec<&str> = flags.url.split(':').collect();
        let [port, uri] = fields.as_slice() else {
            return Err(MonitorError::InvalidPort);
        };
        let port = port.parse::<u16>().map_err(|_| MonitorError::InvalidPort)?;
        check_port_exposed(exposed, port)?;
        return Ok(MonitorConfig::Url {
            port,
            uri: (*uri).to_string(),
            timeout: flags.timeout,
        });
    }

    let lowest = exposed.iter().copied().min().ok_or(MonitorError::NoExposedPorts)?;
    let port = flags.port.filter(|p| *p > 0).unwrap_or(lowest);
    check_port_exposed(exposed, port)?;

    Ok(MonitorConfig::Port {
        port,
        timeout: flags.timeout,
    })
}

fn check_port_exposed(exposed: &[u16], port: u16) -> Result<(), MonitorError> {
    if exposed.contains(&port) {
        Ok(())
    } else {
        Err(MonitorError::PortNotExposed(port))
    }
}
