//! CLI argument parsing tests for reflect

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a command instance with the reflect binary
fn reflect() -> Command {
    Command::new(env!("CARGO_BIN_EXE_reflect"))
}

#[test]
fn test_help_flag() {
    reflect()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reflection agent"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--version"));
}

#[test]
fn test_version_flag() {
    reflect()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_no_args_shows_usage() {
    reflect()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_subcommand_fails() {
    reflect()
        .arg("engage")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_run_command_help() {
    reflect()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Run the reflection loop"))
        .stdout(predicate::str::contains("-m, --message"))
        .stdout(predicate::str::contains("-n, --steps"))
        .stdout(predicate::str::contains("-v, --verbose"));
}

#[test]
fn test_run_rejects_negative_steps() {
    reflect()
        .args(["run", "-m", "hi", "-n", "-1"])
        .assert()
        .failure();
}

#[test]
fn test_run_rejects_non_numeric_steps() {
    reflect()
        .args(["run", "-m", "hi", "--steps", "many"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_init_command_help() {
    reflect()
        .args(["init", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialize"));
}

#[test]
fn test_status_command_help() {
    reflect()
        .args(["status", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration status"));
}
