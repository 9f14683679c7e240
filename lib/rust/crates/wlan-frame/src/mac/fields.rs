// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use bitfield::bitfield;

// IEEE Std 802.11-2016, 9.2.4.1.1
bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct FrameControl(u16);
    impl Debug;
    pub u8, protocol_version, set_protocol_version: 1, 0;
    pub u16, frame_type, set_frame_type: 3, 2;
    pub u16, frame_subtype, set_frame_subtype: 7, 4;
    pub to_ds, set_to_ds: 8;
    pub from_ds, set_from_ds: 9;
    pub more_fragments, set_more_fragments: 10;
    pub retry, set_retry: 11;
    pub power_mgmt, set_power_mgmt: 12;
    pub more_data, set_more_data: 13;
    pub protected, set_protected: 14;
    pub htc_order, set_htc_order: 15;
}

impl FrameControl {
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }
}

// IEEE Std 802.11-2016, 9.2.4.4
bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct SequenceControl(u16);
    impl Debug;
    pub u8, frag_num, set_frag_num: 3, 0;
    pub u16, seq_num, set_seq_num: 15, 4;
}

impl SequenceControl {
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }
}

// IEEE Std 802.11-2016, 9.4.1.4
bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct CapabilityInfo(u16);
    impl Debug;
    pub ess, set_ess: 0;
    pub ibss, set_ibss: 1;
    pub cf_pollable, set_cf_pollable: 2;
    pub cf_poll_req, set_cf_poll_req: 3;
    pub privacy, set_privacy: 4;
    pub short_preamble, set_short_preamble: 5;
    pub spectrum_mgmt, set_spectrum_mgmt: 8;
    pub qos, set_qos: 9;
    pub short_slot_time, set_short_slot_time: 10;
    pub apsd, set_apsd: 11;
    pub radio_measurement, set_radio_measurement: 12;
    pub delayed_block_ack, set_delayed_block_ack: 14;
    pub immediate_block_ack, set_immediate_block_ack: 15;
}

impl CapabilityInfo {
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }
}

// IEEE Std 802.11-2016, 9.4.1.14
bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct BlockAckParameters(u16);
    impl Debug;
    pub amsdu, set_amsdu: 0;
    pub u8, policy, set_policy: 1, 1;
    pub u8, tid, set_tid: 5, 2;
    pub u16, buffer_size, set_buffer_size: 15, 6;
}

impl BlockAckParameters {
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }
}

// IEEE Std 802.11-2016, 9.4.1.16
bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct DelbaParameters(u16);
    impl Debug;
    pub initiator, set_initiator: 11;
    pub u8, tid, set_tid: 15, 12;
}

impl DelbaParameters {
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }
}

// IEEE Std 802.11-2016, 9.4.2.30, Figure 9-266. Only the low 24 bits are sent.
bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct TsInfo(u32);
    impl Debug;
    pub traffic_type, set_traffic_type: 0;
    pub u8, tsid, set_tsid: 4, 1;
    pub u8, direction, set_direction: 6, 5;
    pub u8, access_policy, set_access_policy: 8, 7;
    pub aggregation, set_aggregation: 9;
    pub apsd, set_apsd: 10;
    pub u8, user_priority, set_user_priority: 13, 11;
    pub u8, ack_policy, set_ack_policy: 15, 14;
    pub schedule, set_schedule: 16;
}

impl TsInfo {
    pub const WIRE_LEN: usize = 3;

    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self(u32::from(bytes[0]) | u32::from(bytes[1]) << 8 | u32::from(bytes[2]) << 16)
    }

    pub fn to_bytes(&self) -> [u8; 3] {
        [self.0 as u8, (self.0 >> 8) as u8, (self.0 >> 16) as u8]
    }
}

// WMM QoS Info field sent by a non-AP station, WMM Specification 2.2.1.
bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct StaQosInfo(u8);
    impl Debug;
    pub ac_vo_uapsd, set_ac_vo_uapsd: 0;
    pub ac_vi_uapsd, set_ac_vi_uapsd: 1;
    pub ac_bk_uapsd, set_ac_bk_uapsd: 2;
    pub ac_be_uapsd, set_ac_be_uapsd: 3;
    pub u8, max_sp_len, set_max_sp_len: 6, 5;
}

impl StaQosInfo {
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u8 {
        self.0
    }
}
