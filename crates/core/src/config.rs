// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Device configuration.
//!
//! Mirrors the teacher's `oj-daemon::Config::load()` shape: read from TOML
//! on disk, fall back to built-in defaults for anything missing or if the
//! file itself is absent. A missing config file is never a hard boot
//! failure — only a malformed one is.

use crate::record::DataType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageInitialMode {
    Buffer,
    Passthrough,
}

impl Default for StorageInitialMode {
    fn default() -> Self {
        Self::Buffer
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffStrategy {
    Linear,
    Exponential,
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Exponential
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    pub strategy: BackoffStrategy,
    pub initial_sec: u32,
    pub max_sec: u32,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            strategy: BackoffStrategy::Exponential,
            initial_sec: 5,
            max_sec: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sample_interval_sec: u32,
    pub cloud_sync_interval_sec: u32,
    pub storage_initial_mode: StorageInitialMode,
    pub storage_max_records_per_type: usize,
    pub storage_batch_buffer_size: usize,
    pub watchdog_timeout_sec: u32,
    pub msg_processing_timeout_sec: u32,
    pub backoff: BackoffConfig,
    pub enabled_sensors: Vec<DataType>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_interval_sec: 300,
            cloud_sync_interval_sec: 1800,
            storage_initial_mode: StorageInitialMode::Buffer,
            storage_max_records_per_type: 64,
            storage_batch_buffer_size: 16,
            watchdog_timeout_sec: 120,
            msg_processing_timeout_sec: 30,
            backoff: BackoffConfig::default(),
            enabled_sensors: vec![DataType::Battery, DataType::Environmental, DataType::Location],
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist. A present-but-malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
