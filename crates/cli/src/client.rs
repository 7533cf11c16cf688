// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A thin client for `trackerd`'s control socket.
//!
//! Grounded on the teacher's `oj-cli::client::DaemonClient`: connect, send
//! one request, read one response, map a missing socket to a distinct error
//! so `main` can print something more useful than a raw IO error.

use std::path::PathBuf;

use thiserror::Error;
use tokio::net::UnixStream;

use tracker_daemon::protocol::{self, Request, Response, DEFAULT_TIMEOUT};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("trackerd is not running (no socket at {0})")]
    DaemonNotRunning(PathBuf),
    #[error("protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct DaemonClient {
    socket_path: PathBuf,
}

impl DaemonClient {
    pub fn new(socket_path: PathBuf) -> Self {
        Self { socket_path }
    }

    pub async fn send(&self, request: Request) -> Result<Response, ClientError> {
        if !self.socket_path.exists() {
            return Err(ClientError::DaemonNotRunning(self.socket_path.clone()));
        }

        let mut stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(|_| ClientError::DaemonNotRunning(self.socket_path.clone()))?;

        let (mut reader, mut writer) = stream.split();
        let bytes = protocol::encode(&request)?;
        protocol::write_message(&mut writer, &bytes).await?;

        let response_bytes = tokio::time::timeout(DEFAULT_TIMEOUT, protocol::read_message(&mut reader))
            .await
            .map_err(|_| protocol::ProtocolError::Timeout)??;
        Ok(protocol::decode(&response_bytes)?)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
