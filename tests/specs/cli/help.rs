//! `trackerctl` help/version specs (clap-derived; no daemon required).

use crate::prelude::trackerctl;

#[test]
fn help_lists_subcommands() {
    let output = trackerctl().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("power"));
    assert!(stdout.contains("status"));
}

#[test]
fn version_flag_reports_version() {
    let output = trackerctl().arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("0.1.0"));
}

#[test]
fn power_help_lists_sample_subcommand() {
    let output = trackerctl().args(["power", "--help"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("sample"));
}

#[test]
fn status_help_lists_json_flag() {
    let output = trackerctl().args(["status", "--help"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--json"));
}
