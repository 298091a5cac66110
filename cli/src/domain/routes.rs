//! Route override parsing for `--routes`.

use crate::domain::app::{RouteOverride, RouteOverrides};
use crate::domain::error::RouteError;

/// Parse `PORT:PREFIX[,PORT:PREFIX...]` into route overrides.
///
/// Empty clauses are skipped, so an empty string yields no overrides. The
/// first malformed clause aborts parsing. Fields after the prefix are ignored.
///
/// # Errors
///
/// Returns [`RouteError::Malformed`] when a clause has no `:` or its port is
/// not an integer in 0-65535.
pub fn parse_route_overrides(routes: &str) -> Result<RouteOverrides, RouteError> {
    let mut overrides = RouteOverrides::new();

    for clause in routes.split(',').filter(|c| !c.is_empty()) {
        let mut fields = clause.split(':');
        let port = fields.next().and_then(|p| p.parse::<u16>().ok());
        let (Some(port), Some(prefix)) = (port, fields.next()) else {
            return Err(RouteError::Malformed);
        };
        overrides.push(RouteOverride {
            hostname_prefix: prefix.to_string(),
            port,
        });
    }

    Ok(overrides)
}
