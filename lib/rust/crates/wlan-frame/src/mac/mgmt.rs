// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{CapabilityInfo, FrameControl, MacAddr, SequenceControl},
    byteorder::{ByteOrder, LittleEndian},
    zerocopy::{AsBytes, FromBytes, Unaligned},
};

// IEEE Std 802.11-2016, 9.3.3.2
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct MgmtHdr {
    pub frame_ctrl: [u8; 2],
    pub duration: [u8; 2],
    pub addr1: MacAddr,
    pub addr2: MacAddr,
    pub addr3: MacAddr,
    pub seq_ctrl: [u8; 2],
}

impl MgmtHdr {
    le_accessors! {
        frame_ctrl, set_frame_ctrl: u16, read_u16, write_u16;
        duration, set_duration: u16, read_u16, write_u16;
        seq_ctrl, set_seq_ctrl: u16, read_u16, write_u16;
    }

    pub fn fc(&self) -> FrameControl {
        FrameControl::from_raw(self.frame_ctrl())
    }

    pub fn sc(&self) -> SequenceControl {
        SequenceControl::from_raw(self.seq_ctrl())
    }

    /// Length of the header including the optional HT Control field.
    pub fn len(has_ht_ctrl: bool) -> usize {
        std::mem::size_of::<Self>() + if has_ht_ctrl { HT_CONTROL_LEN } else { 0 }
    }
}

pub const HT_CONTROL_LEN: usize = 4;

// IEEE Std 802.11-2016, 9.3.3.3 and 9.3.3.11
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct BeaconHdr {
    pub timestamp: [u8; 8],
    pub beacon_interval: [u8; 2],
    pub capabilities: [u8; 2],
}

impl BeaconHdr {
    le_accessors! {
        timestamp, set_timestamp: u64, read_u64, write_u64;
        beacon_interval, set_beacon_interval: u16, read_u16, write_u16;
    }

    pub fn capabilities(&self) -> CapabilityInfo {
        CapabilityInfo::from_raw(LittleEndian::read_u16(&self.capabilities))
    }

    pub fn set_capabilities(&mut self, cap: CapabilityInfo) {
        LittleEndian::write_u16(&mut self.capabilities, cap.raw())
    }
}

// IEEE Std 802.11-2016, 9.3.3.6
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct AssocReqHdr {
    pub capabilities: [u8; 2],
    pub listen_interval: [u8; 2],
}

impl AssocReqHdr {
    le_accessors! {
        listen_interval, set_listen_interval: u16, read_u16, write_u16;
    }

    pub fn capabilities(&self) -> CapabilityInfo {
        CapabilityInfo::from_raw(LittleEndian::read_u16(&self.capabilities))
    }

    pub fn set_capabilities(&mut self, cap: CapabilityInfo) {
        LittleEndian::write_u16(&mut self.capabilities, cap.raw())
    }
}

// IEEE Std 802.11-2016, 9.3.3.8
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct ReassocReqHdr {
    pub capabilities: [u8; 2],
    pub listen_interval: [u8; 2],
    pub current_ap: MacAddr,
}

impl ReassocReqHdr {
    le_accessors! {
        listen_interval, set_listen_interval: u16, read_u16, write_u16;
    }

    pub fn capabilities(&self) -> CapabilityInfo {
        CapabilityInfo::from_raw(LittleEndian::read_u16(&self.capabilities))
    }

    pub fn set_capabilities(&mut self, cap: CapabilityInfo) {
        LittleEndian::write_u16(&mut self.capabilities, cap.raw())
    }
}

// IEEE Std 802.11-2016, 9.3.3.7 and 9.3.3.9
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct AssocRespHdr {
    pub capabilities: [u8; 2],
    pub status_code: [u8; 2],
    pub aid: [u8; 2],
}

impl AssocRespHdr {
    le_accessors! {
        status_code, set_status_code: u16, read_u16, write_u16;
        aid, set_aid: u16, read_u16, write_u16;
    }

    pub fn capabilities(&self) -> CapabilityInfo {
        CapabilityInfo::from_raw(LittleEndian::read_u16(&self.capabilities))
    }

    pub fn set_capabilities(&mut self, cap: CapabilityInfo) {
        LittleEndian::write_u16(&mut self.capabilities, cap.raw())
    }
}

// IEEE Std 802.11-2016, 9.3.3.12
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct AuthHdr {
    pub auth_alg_num: [u8; 2],
    pub auth_txn_seq_num: [u8; 2],
    pub status_code: [u8; 2],
}

impl AuthHdr {
    le_accessors! {
        auth_alg_num, set_auth_alg_num: u16, read_u16, write_u16;
        auth_txn_seq_num, set_auth_txn_seq_num: u16, read_u16, write_u16;
        status_code, set_status_code: u16, read_u16, write_u16;
    }
}

// IEEE Std 802.11-2016, 9.3.3.13 and 9.3.3.5
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct ReasonHdr {
    pub reason_code: [u8; 2],
}

impl ReasonHdr {
    le_accessors! {
        reason_code, set_reason_code: u16, read_u16, write_u16;
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::buffer_reader::BufferReader, std::mem::size_of};

    #[test]
    fn header_sizes() {
        assert_eq!(size_of::<MgmtHdr>(), 24);
        assert_eq!(size_of::<BeaconHdr>(), 12);
        assert_eq!(size_of::<AssocReqHdr>(), 4);
        assert_eq!(size_of::<ReassocReqHdr>(), 10);
        assert_eq!(size_of::<AssocRespHdr>(), 6);
        assert_eq!(size_of::<AuthHdr>(), 6);
        assert_eq!(size_of::<ReasonHdr>(), 2);
        assert_eq!(MgmtHdr::len(true), 28);
    }

    #[test]
    fn mgmt_hdr_fields_are_little_endian() {
        #[rustfmt::skip]
        let bytes = [
            0b01010000, 0b01000000, // frame control
            0x02, 0x01, // duration
            1, 1, 1, 1, 1, 1, // addr1
            2, 2, 2, 2, 2, 2, // addr2
            3, 3, 3, 3, 3, 3, // addr3
            0x30, 0x12, // sequence control
        ];
        let mut reader = BufferReader::new(&bytes[..]);
        let hdr = reader.read::<MgmtHdr>().expect("header");
        assert_eq!(hdr.frame_ctrl(), 0x4050);
        assert!(hdr.fc().protected());
        assert_eq!(hdr.fc().frame_subtype(), 5);
        assert_eq!(hdr.duration(), 0x0102);
        assert_eq!(hdr.addr3, [3; 6]);
        assert_eq!(hdr.sc().seq_num(), 0x123);
    }

    #[test]
    fn assoc_resp_hdr_accessors() {
        let mut hdr = AssocRespHdr::default();
        hdr.set_aid(0xC001);
        hdr.set_status_code(30);
        let mut cap = CapabilityInfo::default();
        cap.set_ess(true);
        hdr.set_capabilities(cap);
        assert_eq!(hdr.as_bytes(), &[0x01, 0x00, 30, 0, 0x01, 0xC0]);
        assert!(hdr.capabilities().ess());
    }
}
