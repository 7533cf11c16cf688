// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shadow response parsing.
//!
//! The buffer format itself is opaque to the core; `ShadowParser` is the
//! seam a real CBOR/JSON decoder plugs into (`tracker-adapters` ships one).
//! Parser failure is logged and discarded (§7): state is never altered by
//! a bad buffer.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowCommand {
    Provision,
    Reboot,
}

impl ShadowCommand {
    /// `1 = PROVISION`, `2 = REBOOT`; unknown values parse to
    /// `None` rather than an error, since they're an unrecognized command,
    /// not a malformed buffer.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(ShadowCommand::Provision),
            2 => Some(ShadowCommand::Reboot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadowFields {
    pub interval_sec: Option<u32>,
    pub command: Option<ShadowCommand>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to parse shadow response buffer")]
pub struct ShadowParseError;

pub trait ShadowParser: Send + Sync {
    fn parse(&self, buf: &[u8]) -> Result<ShadowFields, ShadowParseError>;
}

#[cfg(test)]
#[path = "shadow_tests.rs"]
mod tests;
