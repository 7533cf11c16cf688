// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage record types.

use serde::{Deserialize, Serialize};

/// Tag identifying the payload type of a `Record`. Each variant owns an
/// independent ring buffer in the storage engine. Extending the system with
/// a new sensor means adding a variant here plus a matching payload struct —
/// no other module needs to change shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Battery,
    Environmental,
    Location,
}

impl DataType {
    pub const ALL: [DataType; 3] = [DataType::Battery, DataType::Environmental, DataType::Location];
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DataType::Battery => "battery",
            DataType::Environmental => "environmental",
            DataType::Location => "location",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryRecord {
    pub millivolts: u16,
    pub state_of_charge_pct: u8,
    pub timestamp_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalRecord {
    pub temperature_centi_c: i32,
    pub humidity_centi_pct: u32,
    pub pressure_pa: u32,
    pub timestamp_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub latitude_e7: i32,
    pub longitude_e7: i32,
    pub accuracy_m: u32,
    pub timestamp_secs: u64,
}

/// A tagged storage record: `{type, payload}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    Battery(BatteryRecord),
    Environmental(EnvironmentalRecord),
    Location(LocationRecord),
}

impl Record {
    pub fn data_type(&self) -> DataType {
        match self {
            Record::Battery(_) => DataType::Battery,
            Record::Environmental(_) => DataType::Environmental,
            Record::Location(_) => DataType::Location,
        }
    }

    pub fn timestamp_secs(&self) -> u64 {
        match self {
            Record::Battery(r) => r.timestamp_secs,
            Record::Environmental(r) => r.timestamp_secs,
            Record::Location(r) => r.timestamp_secs,
        }
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
