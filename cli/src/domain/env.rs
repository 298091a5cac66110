//! Environment variable assembly for application instances.

use crate::domain::app::{EnvironmentMap, PROCESS_GUID};

/// Build the instance environment from `--env` tokens.
///
/// `PROCESS_GUID` is seeded with `app_name` first, so an explicit
/// `PROCESS_GUID=...` token replaces it. A token without a value (`NAME` or
/// `NAME=`) takes its value from `ambient`, the invoking shell's environment
/// as `NAME=VALUE` strings. The lookup matches the first entry whose raw string
/// starts with `NAME`, so `FOO` can pick up `FOOBAR=x`. Unresolved names get an
/// empty value. Later tokens for the same name win.
#[must_use]
pub fn build_environment(env_vars: &[String], app_name: &str, ambient: &[String]) -> EnvironmentMap {
    let mut environment = EnvironmentMap::new();
    environment.insert(PROCESS_GUID.to_string(), app_name.to_string());

    for pair in env_vars {
        let (name, value) = split_env_pair(pair);
        let value = if value.is_empty() {
            lookup_ambient(ambient, name)
        } else {
            value
        };
        environment.insert(name.to_string(), value.to_string());
    }

    environment
}

/// Split on the first `=`; a missing value is empty.
#[must_use]
pub fn split_env_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

fn lookup_ambient<'a>(ambient: &'a [String], name: &str) -> &'a str {
    ambient
        .iter()
        .find(|entry| entry.starts_with(name))
        .map_or("", |entry| split_env_pair(entry).1)
}
