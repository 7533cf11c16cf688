//! Behavioral specifications for trackerd / trackerctl.
//!
//! These tests are black-box: they invoke the built binaries and verify
//! stdout, stderr, exit codes, and IPC responses over the real control
//! socket. No crate internals are reached into.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// daemon/
#[path = "specs/daemon/help.rs"]
mod daemon_help;
#[path = "specs/daemon/lifecycle.rs"]
mod daemon_lifecycle;

// cli/
#[path = "specs/cli/help.rs"]
mod cli_help;
#[path = "specs/cli/errors.rs"]
mod cli_errors;
