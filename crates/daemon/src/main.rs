// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Asset Tracker Daemon (trackerd)
//!
//! Background process that owns the bus, the liveness supervisor, the
//! storage engine, the application state machine, and every collaborator
//! adapter, then serves the control surface (`power sample`, `status`) over
//! a Unix socket until told to stop.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::path::PathBuf;
use std::sync::Arc;

use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

use tracker_adapters::JsonShadowParser;
use tracker_core::{Config, SystemClock};
use tracker_daemon::listener::Listener;
use tracker_daemon::runtime::{self, Adapters};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("trackerd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: trackerd [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    setup_logging();

    let config_path = config_path();
    let config = Config::load(&config_path)?;
    info!(path = %config_path.display(), "loaded configuration");

    let clock = SystemClock::new();
    let handle = Arc::new(runtime::boot(
        config,
        clock,
        Box::new(JsonShadowParser),
        Adapters::noop(),
    )?);

    let control_socket = tracker_daemon::listener::default_socket_path();
    let listener = Listener::bind(&control_socket, Arc::clone(&handle))?;
    tokio::spawn(listener.run());
    info!(path = %control_socket.display(), "control surface listening");

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = handle.reboot.notified() => {
            let reason = handle.reboot.reason().unwrap_or_else(|| "unknown".to_string());
            info!(%reason, "reboot effect triggered, shutting down");
        }
        _ = sigterm.recv() => {
            info!("received SIGTERM, shutting down");
        }
        _ = sigint.recv() => {
            info!("received SIGINT, shutting down");
        }
    }

    let _ = std::fs::remove_file(&control_socket);
    info!("trackerd stopped");
    Ok(())
}

fn print_help() {
    println!("trackerd {}", env!("CARGO_PKG_VERSION"));
    println!("Asset Tracker Daemon - owns the bus, supervisor, storage engine,");
    println!("state machine, and collaborator adapters for one device.");
    println!();
    println!("USAGE:");
    println!("    trackerd");
    println!();
    println!("The daemon is typically started once per device boot and should");
    println!("not be invoked directly outside of testing. `trackerctl` talks to");
    println!("it over a local Unix socket.");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -v, --version    Print version information");
    println!();
    println!("ENVIRONMENT:");
    println!("    TRACKER_CONFIG_PATH   path to the TOML config file (default: /etc/trackerd/config.toml)");
    println!("    TRACKER_SOCKET_PATH   control socket path (default: /tmp/trackerd.sock)");
}

fn config_path() -> PathBuf {
    std::env::var_os("TRACKER_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/etc/trackerd/config.toml"))
}

fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
