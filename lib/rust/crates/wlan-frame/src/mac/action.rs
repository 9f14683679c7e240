// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{BlockAckParameters, DelbaParameters},
    byteorder::{ByteOrder, LittleEndian},
    zerocopy::{AsBytes, FromBytes, Unaligned},
};

// IEEE Std 802.11-2016, 9.4.1.11, Table 9-47
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct ActionCategory(pub u8);

impl ActionCategory {
    pub const SPECTRUM_MGMT: Self = Self(0);
    pub const QOS: Self = Self(1);
    pub const DLS: Self = Self(2);
    pub const BLOCK_ACK: Self = Self(3);
    pub const PUBLIC: Self = Self(4);
    pub const RADIO_MEASUREMENT: Self = Self(5);
    pub const FAST_BSS_TRANSITION: Self = Self(6);
    pub const HT: Self = Self(7);
    pub const SA_QUERY: Self = Self(8);
    pub const PROTECTED_DUAL_OF_PUBLIC: Self = Self(9);
    pub const WNM: Self = Self(10);
    pub const UNPROTECTED_WNM: Self = Self(11);
    pub const TDLS: Self = Self(12);
    pub const SELF_PROTECTED: Self = Self(15);
    pub const WMM: Self = Self(17);
    pub const VHT: Self = Self(21);
    pub const VENDOR_PROTECTED: Self = Self(126);
    pub const VENDOR: Self = Self(127);

    /// Robust action frames are protected once management frame protection is negotiated.
    pub fn is_robust(&self) -> bool {
        !matches!(
            *self,
            Self::PUBLIC
                | Self::HT
                | Self::UNPROTECTED_WNM
                | Self::TDLS
                | Self::SELF_PROTECTED
                | Self::VHT
                | Self::VENDOR
        )
    }
}

// IEEE Std 802.11-2016, 9.6.2.1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpectrumMgmtAction(pub u8);

impl SpectrumMgmtAction {
    pub const MEASUREMENT_REQUEST: Self = Self(0);
    pub const MEASUREMENT_REPORT: Self = Self(1);
    pub const TPC_REQUEST: Self = Self(2);
    pub const TPC_REPORT: Self = Self(3);
    pub const CHANNEL_SWITCH_ANNOUNCEMENT: Self = Self(4);
}

// IEEE Std 802.11-2016, 9.6.3.1. The WMM category reuses these codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QosAction(pub u8);

impl QosAction {
    pub const ADDTS_REQUEST: Self = Self(0);
    pub const ADDTS_RESPONSE: Self = Self(1);
    pub const DELTS: Self = Self(2);
}

// IEEE Std 802.11-2016, 9.6.5.1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockAckAction(pub u8);

impl BlockAckAction {
    pub const ADDBA_REQUEST: Self = Self(0);
    pub const ADDBA_RESPONSE: Self = Self(1);
    pub const DELBA: Self = Self(2);
}

// IEEE Std 802.11-2016, 9.6.7.1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadioMeasurementAction(pub u8);

impl RadioMeasurementAction {
    pub const RADIO_MEASUREMENT_REQUEST: Self = Self(0);
    pub const RADIO_MEASUREMENT_REPORT: Self = Self(1);
    pub const LINK_MEASUREMENT_REQUEST: Self = Self(2);
    pub const LINK_MEASUREMENT_REPORT: Self = Self(3);
    pub const NEIGHBOR_REPORT_REQUEST: Self = Self(4);
    pub const NEIGHBOR_REPORT_RESPONSE: Self = Self(5);
}

// IEEE Std 802.11-2016, 9.6.10.1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaQueryAction(pub u8);

impl SaQueryAction {
    pub const REQUEST: Self = Self(0);
    pub const RESPONSE: Self = Self(1);
}

// IEEE Std 802.11-2016, 9.3.3.14
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct ActionHdr {
    pub category: ActionCategory,
    pub action: u8,
}

// IEEE Std 802.11-2016, 9.6.5.2
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct AddbaReqHdr {
    pub dialog_token: u8,
    pub parameters: [u8; 2],
    pub timeout: [u8; 2],
    pub starting_sequence_control: [u8; 2],
}

impl AddbaReqHdr {
    pub fn parameters(&self) -> BlockAckParameters {
        BlockAckParameters::from_raw(LittleEndian::read_u16(&self.parameters))
    }

    pub fn set_parameters(&mut self, parameters: BlockAckParameters) {
        LittleEndian::write_u16(&mut self.parameters, parameters.raw())
    }

    pub fn timeout(&self) -> u16 {
        LittleEndian::read_u16(&self.timeout)
    }

    pub fn set_timeout(&mut self, timeout: u16) {
        LittleEndian::write_u16(&mut self.timeout, timeout)
    }

    pub fn starting_sequence_control(&self) -> u16 {
        LittleEndian::read_u16(&self.starting_sequence_control)
    }

    pub fn set_starting_sequence_control(&mut self, ssc: u16) {
        LittleEndian::write_u16(&mut self.starting_sequence_control, ssc)
    }
}

// IEEE Std 802.11-2016, 9.6.5.3
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct AddbaRespHdr {
    pub dialog_token: u8,
    pub status: [u8; 2],
    pub parameters: [u8; 2],
    pub timeout: [u8; 2],
}

impl AddbaRespHdr {
    pub fn status(&self) -> u16 {
        LittleEndian::read_u16(&self.status)
    }

    pub fn set_status(&mut self, status: u16) {
        LittleEndian::write_u16(&mut self.status, status)
    }

    pub fn parameters(&self) -> BlockAckParameters {
        BlockAckParameters::from_raw(LittleEndian::read_u16(&self.parameters))
    }

    pub fn set_parameters(&mut self, parameters: BlockAckParameters) {
        LittleEndian::write_u16(&mut self.parameters, parameters.raw())
    }

    pub fn timeout(&self) -> u16 {
        LittleEndian::read_u16(&self.timeout)
    }

    pub fn set_timeout(&mut self, timeout: u16) {
        LittleEndian::write_u16(&mut self.timeout, timeout)
    }
}

// IEEE Std 802.11-2016, 9.6.5.4
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct DelbaHdr {
    pub parameters: [u8; 2],
    pub reason_code: [u8; 2],
}

impl DelbaHdr {
    pub fn parameters(&self) -> DelbaParameters {
        DelbaParameters::from_raw(LittleEndian::read_u16(&self.parameters))
    }

    pub fn set_parameters(&mut self, parameters: DelbaParameters) {
        LittleEndian::write_u16(&mut self.parameters, parameters.raw())
    }

    pub fn reason_code(&self) -> u16 {
        LittleEndian::read_u16(&self.reason_code)
    }

    pub fn set_reason_code(&mut self, reason_code: u16) {
        LittleEndian::write_u16(&mut self.reason_code, reason_code)
    }
}
