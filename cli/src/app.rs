//! Application context: unified state passed to every command handler.
//!
//! Constructed once in `Cli::run()` from the global flags so handlers share
//! one `OutputContext` and one configuration store.

use std::process::ExitCode;

use anyhow::Result;

use crate::domain::{AppError, ExitCategory};
use crate::infra::config::YamlConfigStore;
use crate::output::{OutputContext, TerminalReporter, json};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Configuration store (`~/.lattice/config.yaml` or `LTC_CONFIG`).
    pub config_store: YamlConfigStore,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            config_store: YamlConfigStore::default(),
        }
    }

    /// Whether `--json` was given.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Reporter rendering narrative to the terminal.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Report a categorized failure and return its exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON error object cannot be serialized.
    pub fn fail(&self, error: &AppError) -> Result<ExitCode> {
        self.fail_with(error.category(), &error.to_string())
    }

    /// Report `message` under `category` and return the matching exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON error object cannot be serialized.
    pub fn fail_with(&self, category: ExitCategory, message: &str) -> Result<ExitCode> {
        if self.is_json() {
            println!("{}", json::format_error(message, category.as_str())?);
        } else {
            self.output.error(message);
        }
        Ok(ExitCode::from(category.code()))
    }
}
