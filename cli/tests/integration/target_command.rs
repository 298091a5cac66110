//! Integration tests for `ltc target`.

#![allow(clippy::expect_used)]

use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

use crate::cli_tests::ltc;

fn config_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("lattice").join("config.yaml")
}

#[test]
#[serial]
fn test_target_set_then_show() {
    let dir = TempDir::new().expect("tempdir");
    let path = config_path(&dir);

    ltc()
        .env("LTC_CONFIG", &path)
        .args(["target", "192.168.11.11.xip.io"])
        .assert()
        .success()
        .stdout(predicate::str::contains("192.168.11.11.xip.io"));

    let content = std::fs::read_to_string(&path).expect("config written");
    assert!(content.contains("target: 192.168.11.11.xip.io"));

    ltc()
        .env("LTC_CONFIG", &path)
        .arg("target")
        .assert()
        .success()
        .stdout(predicate::str::contains("192.168.11.11.xip.io"));
}

#[cfg(unix)]
#[test]
#[serial]
fn test_target_config_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().expect("tempdir");
    let path = config_path(&dir);
    ltc()
        .env("LTC_CONFIG", &path)
        .args(["target", "xip.io"])
        .assert()
        .success();

    let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
#[serial]
fn test_target_show_without_target_warns() {
    let dir = TempDir::new().expect("tempdir");
    ltc()
        .env("LTC_CONFIG", config_path(&dir))
        .arg("target")
        .assert()
        .success()
        .stdout(predicate::str::contains("No target set"));
}

#[test]
#[serial]
fn test_target_json_without_target_is_bad_target() {
    let dir = TempDir::new().expect("tempdir");
    let output = ltc()
        .env("LTC_CONFIG", config_path(&dir))
        .args(["target", "--json"])
        .output()
        .expect("run ltc");
    assert_eq!(output.status.code(), Some(5));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["code"], "bad-target");
}

#[test]
#[serial]
fn test_target_rejects_url() {
    let dir = TempDir::new().expect("tempdir");
    ltc()
        .env("LTC_CONFIG", config_path(&dir))
        .args(["target", "http://receptor.xip.io"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid target"));
}
