// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! trackerctl - control surface client for `trackerd`

mod client;
mod commands;
mod env;

use anyhow::Result;
use clap::{Parser, Subcommand};

use client::DaemonClient;
use commands::{run_power, run_status, PowerArgs, StatusArgs};

#[derive(Parser)]
#[command(name = "trackerctl", version, about = "Control surface client for trackerd")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Power-related commands.
    Power(PowerArgs),
    /// Read the daemon's current state machine and storage status.
    Status(StatusArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = DaemonClient::new(env::socket_path());

    match cli.command {
        Commands::Power(args) => run_power(&client, args).await,
        Commands::Status(args) => run_status(&client, args).await,
    }
}
