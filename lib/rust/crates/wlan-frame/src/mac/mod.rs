// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

mod action;
mod fields;
mod mgmt;

pub use {action::*, fields::*, mgmt::*};

#[macro_export]
macro_rules! frame_len {
    () => { 0 };
    ($only:ty) => { std::mem::size_of::<$only>() };
    ($first:ty, $($tail:ty),*) => {
        std::mem::size_of::<$first>() + $crate::frame_len!($($tail),*)
    };
}

pub type MacAddr = [u8; 6];
pub const BCAST_ADDR: MacAddr = [0xFF; 6];

// IEEE Std 802.11-2016, 9.2.4.1.3
pub const FRAME_TYPE_MGMT: u16 = 0;
pub const FRAME_TYPE_CTRL: u16 = 1;
pub const FRAME_TYPE_DATA: u16 = 2;

// IEEE Std 802.11-2016, 9.2.4.1.3, Table 9-1
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MgmtSubtype(pub u16);

impl MgmtSubtype {
    pub const ASSOC_REQ: Self = Self(0x00);
    pub const ASSOC_RESP: Self = Self(0x01);
    pub const REASSOC_REQ: Self = Self(0x02);
    pub const REASSOC_RESP: Self = Self(0x03);
    pub const PROBE_REQ: Self = Self(0x04);
    pub const PROBE_RESP: Self = Self(0x05);
    pub const BEACON: Self = Self(0x08);
    pub const ATIM: Self = Self(0x09);
    pub const DISASSOC: Self = Self(0x0A);
    pub const AUTH: Self = Self(0x0B);
    pub const DEAUTH: Self = Self(0x0C);
    pub const ACTION: Self = Self(0x0D);
    pub const ACTION_NO_ACK: Self = Self(0x0E);
}

// IEEE Std 802.11-2016, 9.4.1.9, Table 9-46
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const SUCCESS: Self = Self(0);
    pub const REFUSED: Self = Self(1);
    pub const UNSUPPORTED_CAPABILITIES: Self = Self(10);
    pub const REASSOCIATION_DENIED: Self = Self(11);
    pub const DENIED_OTHER_REASON: Self = Self(12);
    pub const UNSUPPORTED_AUTH_ALGORITHM: Self = Self(13);
    pub const TRANSACTION_SEQUENCE_ERROR: Self = Self(14);
    pub const CHALLENGE_FAILURE: Self = Self(15);
    pub const REJECTED_SEQUENCE_TIMEOUT: Self = Self(16);
    pub const DENIED_NO_MORE_STAS: Self = Self(17);
    pub const REFUSED_BASIC_RATES_MISMATCH: Self = Self(18);
    pub const REJECTED_TEMPORARILY: Self = Self(30);
    pub const ROBUST_MANAGEMENT_POLICY_VIOLATION: Self = Self(31);
    pub const UNSPECIFIED_QOS_FAILURE: Self = Self(32);
    pub const INVALID_PARAMETERS: Self = Self(38);
    pub const REJECTED_WITH_SUGGESTED_CHANGES: Self = Self(39);
    pub const REQUESTED_TCLAS_NOT_SUPPORTED: Self = Self(56);
}

// IEEE Std 802.11-2016, 9.4.1.7, Table 9-45
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ReasonCode(pub u16);

impl ReasonCode {
    pub const UNSPECIFIED_REASON: Self = Self(1);
    pub const INVALID_AUTHENTICATION: Self = Self(2);
    pub const LEAVING_NETWORK_DEAUTH: Self = Self(3);
    pub const REASON_INACTIVITY: Self = Self(4);
    pub const NO_MORE_STAS: Self = Self(5);
    pub const INVALID_CLASS2_FRAME: Self = Self(6);
    pub const INVALID_CLASS3_FRAME: Self = Self(7);
    pub const LEAVING_NETWORK_DISASSOC: Self = Self(8);
    pub const NOT_AUTHENTICATED: Self = Self(9);
    pub const QOS_UNSPECIFIED: Self = Self(32);
    pub const END_TS_BA_DLS: Self = Self(37);
    pub const UNKNOWN_TS_BA: Self = Self(38);
    pub const TIMEOUT: Self = Self(39);
}

// IEEE Std 802.11-2016, 9.4.1.1
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct AuthAlgorithmNumber(pub u16);

impl AuthAlgorithmNumber {
    pub const OPEN: Self = Self(0);
    pub const SHARED_KEY: Self = Self(1);
    pub const FAST_BSS_TRANSITION: Self = Self(2);
    pub const SAE: Self = Self(3);
}

/// Association identifiers are sent with the two most significant bits set.
/// IEEE Std 802.11-2016, 9.4.1.8
pub const AID_MASK: u16 = 0xC000;

pub fn is_5ghz_channel(channel: u8) -> bool {
    channel > 14
}
