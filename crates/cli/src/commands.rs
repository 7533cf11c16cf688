// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `trackerctl power` / `trackerctl status` - control surface commands.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};

use tracker_daemon::protocol::{Request, Response};

use crate::client::DaemonClient;

#[derive(Args)]
pub struct PowerArgs {
    #[command(subcommand)]
    pub command: PowerCommand,
}

#[derive(Subcommand)]
pub enum PowerCommand {
    /// Ask the daemon for a battery reading right now.
    Sample,
}

pub async fn run_power(client: &DaemonClient, args: PowerArgs) -> Result<()> {
    match args.command {
        PowerCommand::Sample => match client.send(Request::PowerSample).await? {
            Response::Ack => {
                println!("ok");
                Ok(())
            }
            Response::Error { message } => Err(anyhow!("daemon rejected power sample: {message}")),
            other => Err(anyhow!("unexpected response to power sample: {other:?}")),
        },
    }
}

#[derive(Args)]
pub struct StatusArgs {
    /// Print the raw JSON response instead of a human-readable summary.
    #[arg(long)]
    pub json: bool,
}

pub async fn run_status(client: &DaemonClient, args: StatusArgs) -> Result<()> {
    match client.send(Request::Status).await? {
        Response::Status(status) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("state:                  {}", status.state);
                println!("storage mode:           {}", status.storage_mode);
                println!("sample interval (s):    {}", status.sample_interval_sec);
                println!("data send interval (s): {}", status.data_send_interval_sec);
                println!("running history:        {}", status.running_history);
                println!("batch session id:       {}", status.batch_session_id);
            }
            Ok(())
        }
        Response::Error { message } => Err(anyhow!("daemon rejected status query: {message}")),
        other => Err(anyhow!("unexpected response to status: {other:?}")),
    }
}
