//! Typed domain error enums and exit categories.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Messages ──────────────────────────────────────────────────────────────────

pub const INVALID_PORT_MESSAGE: &str =
    "Invalid port specified. Ports must be a comma-delimited list of integers between 0-65535.";
pub const MALFORMED_ROUTE_MESSAGE: &str =
    "Malformed route. Routes must be of the format port:route";
pub const MONITOR_PORT_NOT_EXPOSED_MESSAGE: &str =
    "Must have an exposed port that matches the monitored port";
pub const PLACEMENT_ERROR_MESSAGE: &str = "Error, could not place all instances: insufficient resources. Try requesting fewer instances or reducing the requested memory or disk capacity.";

// ── Exit categories ───────────────────────────────────────────────────────────

/// Process exit category for a failed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCategory {
    InvalidSyntax,
    OperationFailed,
    BadTarget,
    BadImage,
    PlacementError,
}

impl ExitCategory {
    /// Numeric process exit code.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::InvalidSyntax => 3,
            Self::OperationFailed => 4,
            Self::BadTarget => 5,
            Self::BadImage => 7,
            Self::PlacementError => 8,
        }
    }

    /// Stable kebab-case name used in JSON error objects.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidSyntax => "invalid-syntax",
            Self::OperationFailed => "operation-failed",
            Self::BadTarget => "bad-target",
            Self::BadImage => "bad-image",
            Self::PlacementError => "placement-error",
        }
    }
}

// ── Resolver errors ───────────────────────────────────────────────────────────

/// Errors from parsing `--routes`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("{}", MALFORMED_ROUTE_MESSAGE)]
    Malformed,
}

/// Errors from resolving the exposed port set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("{}", INVALID_PORT_MESSAGE)]
    Invalid,
}

/// Errors from resolving the health-check configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    #[error("{}", INVALID_PORT_MESSAGE)]
    InvalidPort,

    #[error("{}", MONITOR_PORT_NOT_EXPOSED_MESSAGE)]
    PortNotExposed(u16),

    #[error("No exposed ports available to monitor")]
    NoExposedPorts,
}

// ── Workflow errors ───────────────────────────────────────────────────────────

/// Errors that abort the create or scale workflow.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Incorrect Usage: {0}")]
    IncorrectUsage(String),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Monitor(#[from] MonitorError),

    #[error("Error fetching image metadata: {0}")]
    ImageMetadata(String),

    #[error("Unable to determine start command from image metadata.")]
    NoStartCommand,

    #[error("Error creating app: {0}")]
    SubmitFailed(String),

    #[error("Error scaling app: {0}")]
    ScaleFailed(String),

    #[error("No target set. Run 'ltc target <domain>' first.")]
    NoTarget,
}

impl AppError {
    /// Exit category the CLI reports for this error.
    #[must_use]
    pub fn category(&self) -> ExitCategory {
        match self {
            Self::IncorrectUsage(_)
            | Self::Port(_)
            | Self::Route(_)
            | Self::Monitor(MonitorError::InvalidPort) => ExitCategory::InvalidSyntax,
            Self::Monitor(MonitorError::PortNotExposed(_) | MonitorError::NoExposedPorts)
            | Self::SubmitFailed(_)
            | Self::ScaleFailed(_) => ExitCategory::OperationFailed,
            Self::ImageMetadata(_) | Self::NoStartCommand => ExitCategory::BadImage,
            Self::NoTarget => ExitCategory::BadTarget,
        }
    }
}

/// Errors related to configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid target '{0}': expected a bare domain such as 192.168.11.11.xip.io")]
    InvalidTarget(String),
}
