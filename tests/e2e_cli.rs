//! CLI end-to-end tests
//!
//! Tests for the audiogate command-line interface surface. None of these
//! reach the download pipeline; batch behavior is covered in e2e_batch.rs
//! against stub tools.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

/// Get a command for the audiogate binary
#[allow(deprecated)]
fn audiogate_cmd() -> Command {
    let mut cmd = Command::cargo_bin("audiogate").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = audiogate_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("audiogate"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = audiogate_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("audiogate"));
}

#[test]
fn test_cli_help_mentions_flags() {
    let mut cmd = audiogate_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_cli_unknown_flag_exits_one() {
    let mut cmd = audiogate_cmd();
    cmd.arg("--bogus")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage").or(predicate::str::contains("usage")));
}

#[test]
fn test_cli_unknown_short_flag_exits_one() {
    let mut cmd = audiogate_cmd();
    cmd.arg("-z").assert().failure().code(1);
}

#[test]
fn test_cli_missing_input_file_fails() {
    // Fails at startup either on tool detection or on the missing URL
    // list, depending on the host; both are exit 1.
    let mut cmd = audiogate_cmd();
    cmd.arg("/nonexistent/urls.txt").assert().failure().code(1);
}
