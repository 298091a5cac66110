//! Exposed-port resolution.
//!
//! Precedence: `--ports`, then the image's `EXPOSE` list, then 8080.

use crate::domain::app::{DEFAULT_EXPOSED_PORT, ExposedPorts, ImageMetadata};
use crate::domain::error::PortError;

/// Where the resolved ports came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSource {
    Flag,
    Metadata,
    Default,
}

/// Result of exposed-port resolution. The port list is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPorts {
    pub ports: ExposedPorts,
    pub source: PortSource,
}

impl ResolvedPorts {
    /// User notice for ports that were not given explicitly.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        match self.source {
            PortSource::Flag => None,
            PortSource::Metadata => {
                let listed: Vec<String> = self.ports.iter().map(u16::to_string).collect();
                Some(format!(
                    "No port specified, using exposed ports from the image metadata.\n\tExposed Ports: {}",
                    listed.join(", ")
                ))
            }
            PortSource::Default => Some(format!(
                "No port specified, image metadata did not contain exposed ports. Defaulting to {DEFAULT_EXPOSED_PORT}."
            )),
        }
    }
}

/// Resolve the ports to expose.
///
/// Tokens of `ports_flag` are sorted as strings before conversion, so
/// `"9,10"` resolves to `[10, 9]`. Metadata ports are used verbatim.
///
/// # Errors
///
/// Returns [`PortError::Invalid`] if any token of a non-empty `ports_flag` is
/// not an integer in 0-65535.
pub fn resolve_exposed_ports(
    ports_flag: &str,
    metadata: &ImageMetadata,
) -> Result<ResolvedPorts, PortError> {
    if !ports_flag.is_empty() {
        let mut tokens: Vec<&str> = ports_flag.split(',').collect();
        tokens.sort_unstable();
        let ports = tokens
            .into_iter()
            .map(|token| token.parse::<u16>().map_err(|_| PortError::Invalid))
            .collect::<Result<ExposedPorts, _>>()?;
        return Ok(ResolvedPorts {
            ports,
            source: PortSource::Flag,
        });
    }

    if !metadata.exposed_ports.is_empty() {
        return Ok(ResolvedPorts {
            ports: metadata.exposed_ports.clone(),
            source: PortSource::Metadata,
        });
    }

    Ok(ResolvedPorts {
        ports: vec![DEFAULT_EXPOSED_PORT],
        source: PortSource::Default,
    })
}
