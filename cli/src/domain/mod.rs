//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod app;
pub mod config;
pub mod create;
pub mod env;
pub mod error;
pub mod exposed_ports;
pub mod monitor;
pub mod poll;
pub mod routes;

pub use app::{
    CreationRequest, EnvironmentMap, ExposedPorts, ImageMetadata, InstanceStatus, MonitorConfig,
    ResourceLimits, RouteOverride, RouteOverrides,
};
pub use config::LtcConfig;
pub use error::{AppError, ConfigError, ExitCategory, MonitorError, PortError, RouteError};
pub use poll::{PollAction, PollOutcome};
