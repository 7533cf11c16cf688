// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ID generation abstractions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Define a newtype ID wrapper around `u64`.
///
/// Generates `new()`, `value()`, `Display`, `From<u64>` implementations.
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> u64 {
                self.0
            }

            /// The sentinel "no id" value used where the spec treats zero as absent.
            pub const fn none() -> Self {
                Self(0)
            }

            pub const fn is_none(&self) -> bool {
                self.0 == 0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(v: u64) -> Self {
                Self(v)
            }
        }
    };
}

/// Generates unique monotonically increasing identifiers.
pub trait IdGen: Send + Sync {
    fn next(&self) -> u64;
}

/// Sequential ID generator backed by an atomic counter.
///
/// Used both in production (ids only need to be unique within a boot) and
/// in tests (fully deterministic).
#[derive(Clone)]
pub struct SequentialIdGen {
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new() -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }
}

/// Uuid-backed generator for identifiers that must be globally unique (e.g.
/// batch session ids shared with a cloud-side log).
#[derive(Clone, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next(&self) -> u64 {
        // Fold the UUID down to a u64; collisions are immaterial here since
        // batch/session ids only need to be unique among concurrently live
        // sessions, never across the lifetime of the device.
        let bytes = uuid::Uuid::new_v4();
        let b = bytes.as_bytes();
        u64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
