//! Integration tests for the ltc command tree and global flags.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

pub fn ltc() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ltc"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("LTC_LOG");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    ltc().assert().code(2).stderr(predicate::str::contains(
        "Command line interface for Lattice clusters",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    ltc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("scale"))
        .stdout(predicate::str::contains("target"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    ltc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command_shows_version() {
    ltc()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "ltc {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = ltc()
        .args(["version", "--json"])
        .output()
        .expect("run ltc");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_create_help_lists_flags() {
    ltc()
        .args(["create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--working-dir"))
        .stdout(predicate::str::contains("--monitor-url"))
        .stdout(predicate::str::contains("--no-routes"))
        .stdout(predicate::str::contains("--timeout"));
}

#[test]
fn test_create_alias_cr_is_accepted() {
    ltc()
        .args(["cr", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--cpu-weight"));
}

#[test]
fn test_unknown_command_exits_two() {
    ltc().arg("launch").assert().code(2);
}

#[test]
fn test_create_rejects_bad_duration() {
    ltc()
        .args(["create", "app", "image", "--timeout", "soon"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid duration"));
}
