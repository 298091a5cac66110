//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Command line interface for Lattice clusters
#[derive(Parser)]
#[command(
    name = "ltc",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR", value_parser = clap::builder::BoolishValueParser::new())]
    pub no_color: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a docker app on lattice
    #[command(visible_alias = "cr")]
    Create(commands::create::CreateArgs),

    /// Scale a docker app on lattice
    Scale(commands::scale::ScaleArgs),

    /// Show or set the lattice target domain
    Target(commands::target::TargetArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error that has no exit category of its own (configuration
    /// I/O, serialization).
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            no_color,
            quiet,
            json,
        });

        match command {
            Command::Create(args) => commands::create::run(&app, args).await,
            Command::Scale(args) => commands::scale::run(&app, args).await,
            Command::Target(args) => commands::target::run(&app, args),
            Command::Version => {
                commands::version::run(json)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
