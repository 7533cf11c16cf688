// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON shadow parser: extracts `interval_sec` and
//! `command_type` from a cloud shadow response buffer. The wire shape is a
//! JSON object since this exercise has no CBOR shadow library available;
//! absent fields parse to `UINT32_MAX`-equivalent `None`, exactly as §6
//! specifies, and any buffer that isn't valid JSON-of-the-expected-shape is
//! a parse failure, never a panic.

use serde::Deserialize;
use tracker_statemachine::{ShadowCommand, ShadowFields, ShadowParseError, ShadowParser};

#[derive(Debug, Deserialize)]
struct ShadowWire {
    #[serde(default)]
    interval_sec: Option<u32>,
    #[serde(default)]
    command_type: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonShadowParser;

impl ShadowParser for JsonShadowParser {
    fn parse(&self, buf: &[u8]) -> Result<ShadowFields, ShadowParseError> {
        let wire: ShadowWire = serde_json::from_slice(buf).map_err(|_| ShadowParseError)?;
        Ok(ShadowFields {
            interval_sec: wire.interval_sec,
            command: wire.command_type.and_then(ShadowCommand::from_code),
        })
    }
}

#[cfg(test)]
#[path = "shadow_json_tests.rs"]
mod tests;
