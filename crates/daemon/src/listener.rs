// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener task for the control surface's Unix socket.
//!
//! Grounded on `oj-daemon::listener`: runs in its own spawned task,
//! accepting connections and handling each on its own task without blocking
//! anything else the daemon is doing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::net::{UnixListener, UnixStream};
use tracing::{debug, error, warn};
use tracker_core::Clock;

use crate::protocol::{self, Request, Response, DEFAULT_TIMEOUT};
use crate::runtime::RuntimeHandle;

pub struct Listener<C: Clock + Clone + 'static> {
    socket: UnixListener,
    runtime: Arc<RuntimeHandle<C>>,
}

impl<C: Clock + Clone + Send + Sync + 'static> Listener<C> {
    /// Binds the control socket at `path`, removing a stale socket file left
    /// behind by a daemon that did not shut down cleanly.
    pub fn bind(path: &Path, runtime: Arc<RuntimeHandle<C>>) -> std::io::Result<Self> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let socket = UnixListener::bind(path)?;
        Ok(Self { socket, runtime })
    }

    pub async fn run(self) {
        loop {
            match self.socket.accept().await {
                Ok((stream, _)) => {
                    let runtime = Arc::clone(&self.runtime);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, &runtime).await {
                            match e {
                                protocol::ProtocolError::ConnectionClosed => {
                                    debug!("control client disconnected");
                                }
                                protocol::ProtocolError::Timeout => {
                                    warn!("control connection timed out");
                                }
                                other => error!(error = %other, "control connection error"),
                            }
                        }
                    });
                }
                Err(e) => error!(error = %e, "control socket accept error"),
            }
        }
    }
}

async fn handle_connection<C: Clock + Clone + Send + Sync + 'static>(
    stream: UnixStream,
    runtime: &RuntimeHandle<C>,
) -> Result<(), protocol::ProtocolError> {
    let (mut reader, mut writer) = stream.into_split();
    let request = protocol::read_request(&mut reader, DEFAULT_TIMEOUT).await?;
    debug!(?request, "received control request");

    let response = match request {
        Request::PowerSample => match runtime.sample_power().await {
            Ok(()) => Response::Ack,
            Err(e) => Response::Error { message: e.to_string() },
        },
        Request::Status => Response::Status(runtime.status()),
    };

    protocol::write_response(&mut writer, &response).await
}

/// Default control socket path, overridable via `TRACKER_SOCKET_PATH`.
pub fn default_socket_path() -> PathBuf {
    std::env::var_os("TRACKER_SOCKET_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp/trackerd.sock"))
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
