//! End-to-end daemon lifecycle: boot and serve the control surface.

use crate::prelude::Daemon;

#[test]
fn status_reports_initial_buffer_mode_sampling_state() {
    let daemon = Daemon::start();

    let output = daemon.trackerctl().args(["status"]).output().unwrap();
    assert!(output.status.success(), "status query should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("state:"), "missing state line: {stdout}");
    assert!(
        stdout.contains("storage mode:"),
        "missing storage mode line: {stdout}"
    );
    assert!(stdout.contains("batch session id:"));
}

#[test]
fn status_json_round_trips_through_serde() {
    let daemon = Daemon::start();

    let output = daemon
        .trackerctl()
        .args(["status", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value.get("state").is_some());
    assert!(value.get("storage_mode").is_some());
    assert_eq!(value["sample_interval_sec"], 300);
    assert_eq!(value["data_send_interval_sec"], 1800);
}

#[test]
fn power_sample_acks() {
    let daemon = Daemon::start();

    let output = daemon
        .trackerctl()
        .args(["power", "sample"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "power sample should ack, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    similar_asserts::assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "ok");
}

#[test]
fn ctl_fails_fast_when_no_daemon_is_listening() {
    let socket = tempfile::tempdir().unwrap().path().join("no-such.sock");
    let output = crate::prelude::trackerctl()
        .env("TRACKER_SOCKET_PATH", socket)
        .args(["status"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn two_concurrent_status_queries_both_succeed() {
    // Regression guard for the listener's per-connection `tokio::spawn`:
    // one slow/odd client must not block another's request.
    let daemon = Daemon::start();

    let first = daemon.trackerctl().args(["status"]).spawn().unwrap();
    let second = daemon.trackerctl().args(["status"]).spawn().unwrap();

    assert!(first.wait_with_output().unwrap().status.success());
    assert!(second.wait_with_output().unwrap().status.success());
}
