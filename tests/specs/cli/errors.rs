//! `trackerctl` error-path specs.

use crate::prelude::trackerctl;

#[test]
fn missing_subcommand_fails() {
    let output = trackerctl().output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn unknown_subcommand_fails() {
    let output = trackerctl().arg("bogus").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized") || stderr.contains("error"));
}

#[test]
fn power_without_action_fails() {
    let output = trackerctl().arg("power").output().unwrap();
    assert!(!output.status.success());
}
