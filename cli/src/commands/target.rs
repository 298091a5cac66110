//! `ltc target`: show or set the cluster domain.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;
use crate::domain::ExitCategory;

/// Arguments for the target command.
#[derive(Args)]
pub struct TargetArgs {
    /// Cluster domain, e.g. 192.168.11.11.xip.io
    pub domain: Option<String>,
}

/// Run the target command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or written.
pub fn run(app: &AppContext, args: TargetArgs) -> Result<ExitCode> {
    match args.domain {
        Some(domain) => set_target(app, &domain),
        None => show_target(app),
    }
}

fn set_target(app: &AppContext, domain: &str) -> Result<ExitCode> {
    match config_service::set_target(&app.config_store, domain) {
        Ok(_) => {
            if app.is_json() {
                println!("{}", serde_json::json!({ "target": domain }));
            } else {
                app.output.success(&format!("Api Location Set: {domain}"));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is::<crate::domain::ConfigError>() => {
            app.fail_with(ExitCategory::InvalidSyntax, &e.to_string())
        }
        Err(e) => Err(e),
    }
}

fn show_target(app: &AppContext) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    match config_service::require_target(&config) {
        Ok(domain) if app.is_json() => {
            println!("{}", serde_json::json!({ "target": domain }));
        }
        Ok(domain) => {
            app.output.kv("Target:", domain);
            app.output.kv("Config:", &app.config_store.path()?.display().to_string());
        }
        Err(e) if app.is_json() => return app.fail(&e),
        Err(_) => app.output.warn("No target set. Run 'ltc target <domain>' to set one."),
    }
    Ok(ExitCode::SUCCESS)
}
