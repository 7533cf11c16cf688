//! Test helpers for black-box `trackerd`/`trackerctl` specs.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::time::{Duration, Instant};

pub const SPEC_WAIT_MAX_MS: u64 = 2000;
pub const SPEC_POLL_INTERVAL_MS: u64 = 10;

/// Poll a condition until it returns true or the timeout is reached.
pub fn wait_for<F>(timeout_ms: u64, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let start = Instant::now();
    let timeout = Duration::from_millis(timeout_ms);
    let poll = Duration::from_millis(SPEC_POLL_INTERVAL_MS);
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(poll);
    }
    false
}

/// A running `trackerd` bound to an isolated socket and config for one test.
pub struct Daemon {
    child: Child,
    socket_path: PathBuf,
    _config_dir: tempfile::TempDir,
}

impl Daemon {
    /// Start `trackerd` against a fresh temp socket and default config
    /// (no config file on disk means built-in defaults, per
    /// `Config::load`'s documented fallback).
    pub fn start() -> Self {
        let config_dir = tempfile::tempdir().expect("tempdir");
        let socket_path = config_dir.path().join("trackerd.sock");
        let config_path = config_dir.path().join("nonexistent-config.toml");

        let child = Command::new(trackerd_binary())
            .env("TRACKER_SOCKET_PATH", &socket_path)
            .env("TRACKER_CONFIG_PATH", &config_path)
            .env("RUST_LOG", "warn")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .expect("trackerd should spawn");

        let daemon = Self {
            child,
            socket_path,
            _config_dir: config_dir,
        };

        assert!(
            wait_for(SPEC_WAIT_MAX_MS, || daemon.socket_path.exists()),
            "trackerd did not bind its control socket in time"
        );
        daemon
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    pub fn trackerctl(&self) -> Command {
        let mut cmd = Command::new(trackerctl_binary());
        cmd.env("TRACKER_SOCKET_PATH", &self.socket_path);
        cmd
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Resolve the path to a workspace binary, falling back to resolving
/// relative to this test binary itself when `CARGO_MANIFEST_DIR` points at
/// a stale build directory (shared `target/` across worktrees).
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

pub fn trackerd_binary() -> PathBuf {
    binary_path("trackerd")
}

pub fn trackerctl_binary() -> PathBuf {
    binary_path("trackerctl")
}

pub fn trackerctl() -> Command {
    Command::new(trackerctl_binary())
}
