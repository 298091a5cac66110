//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::AppError;
use crate::domain::config::{LtcConfig, validate_target};

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the stored configuration cannot be read or parsed.
pub fn load_config(store: &impl ConfigStore) -> Result<LtcConfig> {
    store.load()
}

/// Save configuration.
///
/// # Errors
///
/// Returns an error if the configuration cannot be written.
pub fn save_config(store: &impl ConfigStore, config: &LtcConfig) -> Result<()> {
    store.save(config)
}

/// Validate `domain` and store it as the target, keeping other settings.
///
/// # Errors
///
/// Returns an error if the domain is invalid or the configuration cannot be
/// loaded or saved.
pub fn set_target(store: &impl ConfigStore, domain: &str) -> Result<LtcConfig> {
    validate_target(domain)?;
    let mut config = load_config(store)?;
    config.target = Some(domain.to_string());
    save_config(store, &config)?;
    Ok(config)
}

/// The configured target domain.
///
/// # Errors
///
/// Returns [`AppError::NoTarget`] when no target has been set.
pub fn require_target(config: &LtcConfig) -> Result<&str, AppError> {
    config
        .target
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(AppError::NoTarget)
}
