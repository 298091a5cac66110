//! JSON output helpers.
//!
//! Provides the error-object formatter used by all `--json` code paths when
//! a command fails, plus the success objects for each command.

use anyhow::{Context, Result};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format the result of `create`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_app_status(
    name: &str,
    running: bool,
    instances: u32,
    urls: &[String],
    no_routes: bool,
) -> Result<String> {
    let obj = serde_json::json!({
        "name": name,
        "running": running,
        "instances": instances,
        "urls": urls,
        "no_routes": no_routes,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format the result of `scale`. Routes are not known here, so the object
/// carries no URLs.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_scale_status(name: &str, running: bool, instances: u32) -> Result<String> {
    let obj = serde_json::json!({
        "name": name,
        "running": running,
        "instances": instances,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format the `version` object.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_version(version: &str) -> Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({ "version": version }))
        .context("JSON serialization failed")
}
