// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Configuration values read by the frame builders.
//!
//! Builders only see the `ConfigProvider` trait. `ConfigStore` is an in-memory provider backed by
//! a descriptor table of defaults and bounds, with optional JSON overrides of the form
//! `{"beacon_interval": 200, "probe_rsp_addn_ie_data1": [221, 4, 0, 80, 242, 4]}`.

use {
    serde::Deserialize,
    std::{collections::HashMap, convert::TryFrom},
    thiserror::Error,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CfgKey {
    BeaconInterval,
    WpsEnable,
    WpsState,
    ProbeRspAddnIeFlag,
    ProbeRspAddnIeData1,
    ProbeRspAddnIeData2,
    ProbeRspAddnIeData3,
    AssocRspAddnIeFlag,
    AssocRspAddnIeData,
    Dot11Mode,
    SupportedRates11a,
    SupportedRates11b,
    HtCapInfo,
    HtAmpduParams,
    SupportedMcsSet,
    ExtHtCapInfo,
    TxBfCap,
    AselCap,
    VhtCapInfo,
    VhtRxMcsMap,
    VhtTxMcsMap,
    RrmEnabledCaps,
    WmmUapsdMask,
    MaxSpLength,
    LocalPowerConstraint,
    MaxTxPower,
    MinTxPower,
    ListenInterval,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no value for {0:?}")]
    NotFound(CfgKey),
    #[error("{key:?} is not a {expected} parameter")]
    WrongType { key: CfgKey, expected: &'static str },
    #[error("{value} is out of range [{min}, {max}] for {key:?}")]
    OutOfRange { key: CfgKey, value: u32, min: u32, max: u32 },
    #[error("{len} bytes exceed the maximum of {max} for {key:?}")]
    TooLong { key: CfgKey, len: usize, max: usize },
    #[error("invalid configuration overrides: {0}")]
    Parse(String),
}

/// Typed access to configuration values by key.
pub trait ConfigProvider {
    fn get_int(&self, key: CfgKey) -> Result<u32, ConfigError>;

    fn get_str(&self, key: CfgKey) -> Result<Vec<u8>, ConfigError>;

    fn get_u8(&self, key: CfgKey) -> Result<u8, ConfigError> {
        narrow(key, self.get_int(key)?, u8::MAX.into())
    }

    fn get_u16(&self, key: CfgKey) -> Result<u16, ConfigError> {
        narrow(key, self.get_int(key)?, u16::MAX.into())
    }

    /// Values above `i8::MAX` are rejected rather than read as negative.
    fn get_i8(&self, key: CfgKey) -> Result<i8, ConfigError> {
        narrow(key, self.get_int(key)?, i8::MAX as u32)
    }
}

fn narrow<T: TryFrom<u32>>(key: CfgKey, value: u32, max: u32) -> Result<T, ConfigError> {
    T::try_from(value).map_err(|_| ConfigError::OutOfRange { key, value, min: 0, max })
}

enum Param {
    Int { default: u32, min: u32, max: u32 },
    Str { default: &'static [u8], max_len: usize },
}

const RATES_11A: &[u8] = &[12, 18, 24, 36, 48, 72, 96, 108];
const RATES_11B: &[u8] = &[2, 4, 11, 22];
const MCS_SET: &[u8] = &[0xFF, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
const RRM_ENABLED_CAPS: &[u8] = &[0x73, 0, 0, 0, 0];

#[rustfmt::skip]
const DESCRIPTORS: &[(CfgKey, Param)] = &[
    (CfgKey::BeaconInterval, Param::Int { default: 100, min: 1, max: 65535 }),
    (CfgKey::WpsEnable, Param::Int { default: 0, min: 0, max: 1 }),
    (CfgKey::WpsState, Param::Int { default: 1, min: 1, max: 2 }),
    (CfgKey::ProbeRspAddnIeFlag, Param::Int { default: 0, min: 0, max: 1 }),
    (CfgKey::ProbeRspAddnIeData1, Param::Str { default: &[], max_len: 255 }),
    (CfgKey::ProbeRspAddnIeData2, Param::Str { default: &[], max_len: 255 }),
    (CfgKey::ProbeRspAddnIeData3, Param::Str { default: &[], max_len: 255 }),
    (CfgKey::AssocRspAddnIeFlag, Param::Int { default: 0, min: 0, max: 1 }),
    (CfgKey::AssocRspAddnIeData, Param::Str { default: &[], max_len: 255 }),
    (CfgKey::Dot11Mode, Param::Int { default: 0, min: 0, max: 11 }),
    (CfgKey::SupportedRates11a, Param::Str { default: RATES_11A, max_len: 12 }),
    (CfgKey::SupportedRates11b, Param::Str { default: RATES_11B, max_len: 4 }),
    (CfgKey::HtCapInfo, Param::Int { default: 0x016E, min: 0, max: 0xFFFF }),
    (CfgKey::HtAmpduParams, Param::Int { default: 0x17, min: 0, max: 0xFF }),
    (CfgKey::SupportedMcsSet, Param::Str { default: MCS_SET, max_len: 16 }),
    (CfgKey::ExtHtCapInfo, Param::Int { default: 0, min: 0, max: 0xFFFF }),
    (CfgKey::TxBfCap, Param::Int { default: 0, min: 0, max: u32::MAX }),
    (CfgKey::AselCap, Param::Int { default: 0, min: 0, max: 0xFF }),
    (CfgKey::VhtCapInfo, Param::Int { default: 0x0380_71B0, min: 0, max: u32::MAX }),
    (CfgKey::VhtRxMcsMap, Param::Int { default: 0xFFFE, min: 0, max: 0xFFFF }),
    (CfgKey::VhtTxMcsMap, Param::Int { default: 0xFFFE, min: 0, max: 0xFFFF }),
    (CfgKey::RrmEnabledCaps, Param::Str { default: RRM_ENABLED_CAPS, max_len: 5 }),
    (CfgKey::WmmUapsdMask, Param::Int { default: 0, min: 0, max: 0x0F }),
    (CfgKey::MaxSpLength, Param::Int { default: 0, min: 0, max: 3 }),
    (CfgKey::LocalPowerConstraint, Param::Int { default: 0, min: 0, max: 255 }),
    (CfgKey::MaxTxPower, Param::Int { default: 20, min: 0, max: 30 }),
    (CfgKey::MinTxPower, Param::Int { default: 6, min: 0, max: 30 }),
    (CfgKey::ListenInterval, Param::Int { default: 1, min: 0, max: 65535 }),
];

fn descriptor(key: CfgKey) -> Option<&'static Param> {
    DESCRIPTORS.iter().find(|(k, _)| *k == key).map(|(_, param)| param)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OverrideValue {
    Int(u32),
    Str(Vec<u8>),
}

/// In-memory configuration. Values that were never set read as their table default.
#[derive(Debug, Default)]
pub struct ConfigStore {
    ints: HashMap<CfgKey, u32>,
    strs: HashMap<CfgKey, Vec<u8>>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with the given JSON overrides applied on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut store = Self::new();
        store.apply_json(json)?;
        Ok(store)
    }

    pub fn set_int(&mut self, key: CfgKey, value: u32) -> Result<(), ConfigError> {
        match descriptor(key) {
            Some(Param::Int { min, max, .. }) => {
                if value < *min || value > *max {
                    return Err(ConfigError::OutOfRange { key, value, min: *min, max: *max });
                }
                self.ints.insert(key, value);
                Ok(())
            }
            Some(Param::Str { .. }) => Err(ConfigError::WrongType { key, expected: "integer" }),
            None => Err(ConfigError::NotFound(key)),
        }
    }

    pub fn set_str(&mut self, key: CfgKey, value: &[u8]) -> Result<(), ConfigError> {
        match descriptor(key) {
            Some(Param::Str { max_len, .. }) => {
                if value.len() > *max_len {
                    return Err(ConfigError::TooLong { key, len: value.len(), max: *max_len });
                }
                self.strs.insert(key, value.to_vec());
                Ok(())
            }
            Some(Param::Int { .. }) => Err(ConfigError::WrongType { key, expected: "string" }),
            None => Err(ConfigError::NotFound(key)),
        }
    }

    /// Applies every override in `json`. On error, overrides before the failing one may
    /// already have been applied.
    pub fn apply_json(&mut self, json: &str) -> Result<(), ConfigError> {
        let overrides: HashMap<CfgKey, OverrideValue> =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        for (key, value) in overrides {
            match value {
                OverrideValue::Int(value) => self.set_int(key, value)?,
                OverrideValue::Str(value) => self.set_str(key, &value[..])?,
            }
        }
        Ok(())
    }
}

impl ConfigProvider for ConfigStore {
    fn get_int(&self, key: CfgKey) -> Result<u32, ConfigError> {
        match descriptor(key) {
            Some(Param::Int { default, .. }) => Ok(*self.ints.get(&key).unwrap_or(default)),
            Some(Param::Str { .. }) => Err(ConfigError::WrongType { key, expected: "integer" }),
            None => Err(ConfigError::NotFound(key)),
        }
    }

    fn get_str(&self, key: CfgKey) -> Result<Vec<u8>, ConfigError> {
        match descriptor(key) {
            Some(Param::Str { default, .. }) => {
                Ok(self.strs.get(&key).map_or_else(|| default.to_vec(), Clone::clone))
            }
            Some(Param::Int { .. }) => Err(ConfigError::WrongType { key, expected: "string" }),
            None => Err(ConfigError::NotFound(key)),
        }
    }
}
