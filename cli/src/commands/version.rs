//! Version command

use anyhow::Result;

use crate::output::json;

/// Run the version command.
///
/// # Errors
///
/// Returns an error if the JSON object cannot be serialized.
pub fn run(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    if json {
        println!("{}", json::format_version(version)?);
    } else {
        println!("ltc {version}");
    }
    Ok(())
}
