//! Positional-argument guards for `ltc create`.
//!
//! The guards run top to bottom and only the first applicable one fires.
//! When there are app arguments after the start command, the CPU weight
//! check is skipped entirely; callers rely on that precedence.

use crate::domain::error::AppError;

/// Token that must precede a custom start command.
pub const TERMINATOR: &str = "--";

/// Valid range for `--cpu-weight`.
pub const CPU_WEIGHT_RANGE: std::ops::RangeInclusive<i64> = 1..=100;

/// Positional arguments after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePositionals {
    pub name: String,
    pub image: String,
    /// Custom start command, when one follows `--`.
    pub start_command: Option<String>,
    /// Arguments after the custom start command.
    pub app_args: Vec<String>,
}

/// Validate `APP_NAME DOCKER_IMAGE [-- START_COMMAND [ARGS...]]`.
///
/// # Errors
///
/// Returns [`AppError::IncorrectUsage`] when fewer than two positionals are
/// given, when a start command is not preceded by `--`, or when the CPU
/// weight is outside 1-100.
pub fn validate_create_args(args: &[String], cpu_weight: i64) -> Result<CreatePositionals, AppError> {
    let arg = |i: usize| args.get(i).map_or("", String::as_str);
    let start_command = Some(arg(3)).filter(|c| !c.is_empty());
    let mut app_args = Vec::new();

    if args.len() < 2 {
        return Err(AppError::IncorrectUsage(
            "APP_NAME and DOCKER_IMAGE are required".to_string(),
        ));
    } else if start_command.is_some() && arg(2) != TERMINATOR {
        return Err(AppError::IncorrectUsage(
            "'--' Required before start command".to_string(),
        ));
    } else if args.len() > 4 {
        app_args = args[4..].to_vec();
    } else if !CPU_WEIGHT_RANGE.contains(&cpu_weight) {
        return Err(AppError::IncorrectUsage("Invalid CPU Weight".to_string()));
    }

    Ok(CreatePositionals {
        name: arg(0).to_string(),
        image: arg(1).to_string(),
        start_command: start_command.map(str::to_string),
        app_args,
    })
}
