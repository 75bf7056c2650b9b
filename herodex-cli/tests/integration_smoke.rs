//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_serve() {
    let mut cmd = Command::cargo_bin("herodex").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("herodex").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("MongoDB connection string"))
        .stdout(predicate::str::contains("--memory"));
}

#[test]
fn test_invalid_port_env_fails() {
    let mut cmd = Command::cargo_bin("herodex").unwrap();
    cmd.env("PORT", "not-a-port").arg("serve").arg("--memory");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid server configuration"));
}

#[test]
fn test_unknown_log_format_rejected() {
    let mut cmd = Command::cargo_bin("herodex").unwrap();
    cmd.arg("--log-format").arg("xml").arg("serve");

    cmd.assert().failure();
}
