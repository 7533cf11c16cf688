//! `trackerd` help and version specs.
//!
//! Verify `trackerd --help`/`--version` and related flags work without
//! ever attempting to bind the control socket.

use crate::prelude::*;
use std::process::Command;

fn trackerd() -> Command {
    Command::new(trackerd_binary())
}

#[test]
fn version_shows_version() {
    let output = trackerd().arg("--version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("trackerd 0.1.0"),
        "expected version line, got: {stdout}"
    );
}

#[test]
fn short_version_flag_shows_version() {
    let output = trackerd().arg("-v").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("trackerd 0.1.0"));
}

#[test]
fn capital_v_shows_version() {
    let output = trackerd().arg("-V").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("trackerd 0.1.0"));
}

#[test]
fn help_shows_usage() {
    let output = trackerd().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("USAGE:"), "expected USAGE section, got: {stdout}");
    assert!(stdout.contains("TRACKER_CONFIG_PATH"));
    assert!(stdout.contains("TRACKER_SOCKET_PATH"));
}

#[test]
fn short_help_shows_usage() {
    let output = trackerd().arg("-h").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("USAGE:"));
}

#[test]
fn help_subcommand_shows_usage() {
    let output = trackerd().arg("help").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("USAGE:"));
}

#[test]
fn unknown_arg_fails() {
    let output = trackerd().arg("--bogus").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unexpected argument"),
        "expected error message, got: {stderr}"
    );
}
