//! Domain types and validators for ltc configuration.
//!
//! Pure functions only, no I/O, no async, no filesystem access.

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

/// Configuration stored in `~/.lattice/config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LtcConfig {
    /// Cluster domain, e.g. `192.168.11.11.xip.io`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Receptor basic-auth username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Receptor basic-auth password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Receptor API endpoint for a cluster domain.
#[must_use]
pub fn receptor_url_for(domain: &str) -> String {
    format!("http://receptor.{domain}")
}

/// Validate a target domain.
///
/// # Errors
///
/// Returns an error if the domain is empty, contains whitespace, a scheme,
/// or a path.
pub fn validate_target(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() || domain.contains(char::is_whitespace) || domain.contains('/') {
        return Err(ConfigError::InvalidTarget(domain.to_string()));
    }
    Ok(())
}
