// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{invalid, Element, ElementKind, Id, IE_MAX_LEN},
    crate::{
        appendable::{Appendable, BufferTooSmall},
        buffer_reader::BufferReader,
        error::FrameParseError,
        mac::MacAddr,
    },
    zerocopy::{AsBytes, FromBytes, Unaligned},
};

pub const SSID_MAX_LEN: usize = 32;
pub const SUPPORTED_RATES_MAX_LEN: usize = 8;
pub const CHALLENGE_TEXT_MAX_LEN: usize = 253;

opaque_element!(
    /// IEEE Std 802.11-2016, 9.4.2.2
    Ssid, "SSID", ElementKind::Basic(Id::SSID), max: SSID_MAX_LEN, limit: SSID_MAX_LEN
);

opaque_element!(
    /// IEEE Std 802.11-2016, 9.4.2.3. Rates in units of 500 kb/s, with bit 7 marking a basic rate.
    SupportedRates,
    "SupportedRates",
    ElementKind::Basic(Id::SUPPORTED_RATES),
    max: SUPPORTED_RATES_MAX_LEN,
    limit: SUPPORTED_RATES_MAX_LEN
);

opaque_element!(
    /// IEEE Std 802.11-2016, 9.4.2.13
    ExtSupportedRates,
    "ExtSupportedRates",
    ElementKind::Basic(Id::EXT_SUPPORTED_RATES),
    max: IE_MAX_LEN
);

opaque_element!(
    /// IEEE Std 802.11-2016, 9.4.2.8
    ChallengeText,
    "ChallengeText",
    ElementKind::Basic(Id::CHALLENGE_TEXT),
    max: CHALLENGE_TEXT_MAX_LEN,
    limit: CHALLENGE_TEXT_MAX_LEN
);

opaque_element!(
    /// IEEE Std 802.11-2016, 9.4.2.25. Copied verbatim from the security configuration.
    Rsne, "RSNE", ElementKind::Basic(Id::RSNE), max: IE_MAX_LEN
);

opaque_element!(
    /// IEEE Std 802.11-2016, 9.4.2.48
    FastBssTransition, "FTE", ElementKind::Basic(Id::FAST_BSS_TRANSITION), max: IE_MAX_LEN
);

opaque_element!(
    /// IEEE Std 802.11-2016, 9.4.2.27
    ExtCapabilities, "ExtCapabilities", ElementKind::Basic(Id::EXT_CAPABILITIES), max: IE_MAX_LEN
);

opaque_element!(
    /// WAPI parameter set, GB 15629.11-2003.
    WapiIe, "WAPI", ElementKind::Basic(Id::WAPI), max: IE_MAX_LEN
);

// IEEE Std 802.11-2016, 9.4.2.4
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct DsParamSet {
    pub current_channel: u8,
}
fixed_element!(DsParamSet, "DsParamSet", ElementKind::Basic(Id::DSSS_PARAM_SET));

// IEEE Std 802.11-2016, 9.4.2.12
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct ErpInfo {
    pub flags: u8,
}
fixed_element!(ErpInfo, "ErpInfo", ElementKind::Basic(Id::ERP_INFO));

impl ErpInfo {
    pub const NON_ERP_PRESENT: u8 = 1 << 0;
    pub const USE_PROTECTION: u8 = 1 << 1;
    pub const BARKER_PREAMBLE_MODE: u8 = 1 << 2;
}

// IEEE Std 802.11-2016, 9.4.2.14
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct PowerConstraint {
    pub local_power_constraint: u8,
}
fixed_element!(PowerConstraint, "PowerConstraint", ElementKind::Basic(Id::POWER_CONSTRAINT));

// IEEE Std 802.11-2016, 9.4.2.15. Values in dBm.
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct PowerCapability {
    pub min_tx_power: i8,
    pub max_tx_power: i8,
}
fixed_element!(PowerCapability, "PowerCapability", ElementKind::Basic(Id::POWER_CAPABILITY));

// IEEE Std 802.11-2016, 9.4.2.17
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct TpcReport {
    pub tx_power: i8,
    pub link_margin: i8,
}
fixed_element!(TpcReport, "TpcReport", ElementKind::Basic(Id::TPC_REPORT));

#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct ChannelRange {
    pub first_channel: u8,
    pub num_channels: u8,
}

// IEEE Std 802.11-2016, 9.4.2.18
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SupportedChannels(pub Vec<ChannelRange>);

impl Element for SupportedChannels {
    const NAME: &'static str = "SupportedChannels";
    const KIND: ElementKind = ElementKind::Basic(Id::SUPPORTED_CHANNELS);
    const MAX_BODY_LEN: usize = IE_MAX_LEN - 1;

    fn body_len(&self) -> usize {
        self.0.len() * std::mem::size_of::<ChannelRange>()
    }

    fn write_body<A: Appendable>(&self, w: &mut A) -> Result<(), BufferTooSmall> {
        self.0.iter().try_for_each(|range| w.append_value(range))
    }

    fn parse_body(body: &[u8]) -> Result<Self, FrameParseError> {
        if body.len() % 2 != 0 {
            return Err(invalid(Id::SUPPORTED_CHANNELS, "odd length"));
        }
        Ok(Self(
            body.chunks(2)
                .map(|pair| ChannelRange { first_channel: pair[0], num_channels: pair[1] })
                .collect(),
        ))
    }
}

// IEEE Std 802.11-2016, 9.4.2.19
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct ChannelSwitchAnnouncement {
    pub mode: u8,
    pub new_channel: u8,
    pub count: u8,
}
fixed_element!(
    ChannelSwitchAnnouncement,
    "ChannelSwitchAnnouncement",
    ElementKind::Basic(Id::CHANNEL_SWITCH_ANNOUNCEMENT)
);

// IEEE Std 802.11-2016, 9.4.2.20
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct SecondaryChannelOffset {
    pub offset: u8,
}
fixed_element!(
    SecondaryChannelOffset,
    "SecondaryChannelOffset",
    ElementKind::Basic(Id::SECONDARY_CHANNEL_OFFSET)
);

impl SecondaryChannelOffset {
    pub const NONE: u8 = 0;
    pub const ABOVE: u8 = 1;
    pub const BELOW: u8 = 3;
}

// IEEE Std 802.11-2016, 9.4.2.161
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct WideBandwidthChannelSwitch {
    pub new_width: u8,
    pub new_center_freq_seg0: u8,
    pub new_center_freq_seg1: u8,
}
fixed_element!(
    WideBandwidthChannelSwitch,
    "WideBandwidthChannelSwitch",
    ElementKind::Basic(Id::WIDE_BANDWIDTH_CHANNEL_SWITCH)
);

// IEEE Std 802.11-2016, 9.4.2.22
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MeasurementReport {
    pub token: u8,
    pub mode: u8,
    pub measurement_type: u8,
    pub report: Vec<u8>,
}

impl MeasurementReport {
    pub const MODE_LATE: u8 = 1 << 0;
    pub const MODE_INCAPABLE: u8 = 1 << 1;
    pub const MODE_REFUSED: u8 = 1 << 2;

    pub const TYPE_BASIC: u8 = 0;
    pub const TYPE_CCA: u8 = 1;
    pub const TYPE_RPI_HISTOGRAM: u8 = 2;
    pub const TYPE_BEACON: u8 = 5;

    const FIXED_LEN: usize = 3;
}

impl Element for MeasurementReport {
    const NAME: &'static str = "MeasurementReport";
    const KIND: ElementKind = ElementKind::Basic(Id::MEASUREMENT_REPORT);
    const MAX_BODY_LEN: usize = IE_MAX_LEN;

    fn body_len(&self) -> usize {
        Self::FIXED_LEN + self.report.len()
    }

    fn write_body<A: Appendable>(&self, w: &mut A) -> Result<(), BufferTooSmall> {
        w.append_byte(self.token)?;
        w.append_byte(self.mode)?;
        w.append_byte(self.measurement_type)?;
        w.append_bytes(&self.report[..])
    }

    fn parse_body(body: &[u8]) -> Result<Self, FrameParseError> {
        if body.len() < Self::FIXED_LEN {
            return Err(invalid(Id::MEASUREMENT_REPORT, "too short"));
        }
        Ok(Self {
            token: body[0],
            mode: body[1],
            measurement_type: body[2],
            report: body[Self::FIXED_LEN..].to_vec(),
        })
    }
}

/// Body of a beacon measurement report, IEEE Std 802.11-2016, 9.4.2.22.7.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BeaconReport {
    pub operating_class: u8,
    pub channel: u8,
    pub actual_measurement_start_time: u64,
    pub measurement_duration: u16,
    pub reported_frame_info: u8,
    pub rcpi: u8,
    pub rsni: u8,
    pub bssid: MacAddr,
    pub antenna_id: u8,
    pub parent_tsf: u32,
    /// Optional subelements, such as the reported frame body.
    pub subelements: Vec<u8>,
}

impl BeaconReport {
    const FIXED_LEN: usize = 26;

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::FIXED_LEN + self.subelements.len());
        bytes.push(self.operating_class);
        bytes.push(self.channel);
        bytes.extend_from_slice(&self.actual_measurement_start_time.to_le_bytes());
        bytes.extend_from_slice(&self.measurement_duration.to_le_bytes());
        bytes.push(self.reported_frame_info);
        bytes.push(self.rcpi);
        bytes.push(self.rsni);
        bytes.extend_from_slice(&self.bssid);
        bytes.push(self.antenna_id);
        bytes.extend_from_slice(&self.parent_tsf.to_le_bytes());
        bytes.extend_from_slice(&self.subelements);
        bytes
    }

    pub fn parse(report: &[u8]) -> Result<Self, FrameParseError> {
        let too_short = || invalid(Id::MEASUREMENT_REPORT, "beacon report too short");
        let mut reader = BufferReader::new(report);
        Ok(Self {
            operating_class: reader.read_byte().ok_or_else(too_short)?,
            channel: reader.read_byte().ok_or_else(too_short)?,
            actual_measurement_start_time: reader.read_u64_le().ok_or_else(too_short)?,
            measurement_duration: reader.read_u16_le().ok_or_else(too_short)?,
            reported_frame_info: reader.read_byte().ok_or_else(too_short)?,
            rcpi: reader.read_byte().ok_or_else(too_short)?,
            rsni: reader.read_byte().ok_or_else(too_short)?,
            bssid: reader.read_array::<6>().ok_or_else(too_short)?,
            antenna_id: reader.read_byte().ok_or_else(too_short)?,
            parent_tsf: reader.read_u32_le().ok_or_else(too_short)?,
            subelements: reader.into_remaining().to_vec(),
        })
    }
}

// IEEE Std 802.11-2016, 9.4.2.56
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct HtCapabilities {
    pub ht_cap_info: [u8; 2],
    pub ampdu_params: u8,
    pub mcs_set: [u8; 16],
    pub ext_ht_cap: [u8; 2],
    pub txbf_cap: [u8; 4],
    pub asel_cap: u8,
}
fixed_element!(HtCapabilities, "HtCapabilities", ElementKind::Basic(Id::HT_CAPABILITIES));

impl HtCapabilities {
    le_accessors! {
        ht_cap_info, set_ht_cap_info: u16, read_u16, write_u16;
        ext_ht_cap, set_ext_ht_cap: u16, read_u16, write_u16;
        txbf_cap, set_txbf_cap: u32, read_u32, write_u32;
    }
}

// IEEE Std 802.11-2016, 9.4.2.57
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct HtOperation {
    pub primary_channel: u8,
    pub ht_op_info: [u8; 5],
    pub basic_mcs_set: [u8; 16],
}
fixed_element!(HtOperation, "HtOperation", ElementKind::Basic(Id::HT_OPERATION));

// IEEE Std 802.11-2016, 9.4.2.35
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct QosCapability {
    pub qos_info: u8,
}
fixed_element!(QosCapability, "QosCapability", ElementKind::Basic(Id::QOS_CAPABILITY));

// IEEE Std 802.11-2016, 9.4.2.47
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct MobilityDomain {
    pub mdid: [u8; 2],
    pub ft_capability_policy: u8,
}
fixed_element!(MobilityDomain, "MobilityDomain", ElementKind::Basic(Id::MOBILITY_DOMAIN));

impl MobilityDomain {
    le_accessors! {
        mdid, set_mdid: u16, read_u16, write_u16;
    }
}

// IEEE Std 802.11-2016, 9.4.2.49
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct TimeoutInterval {
    pub interval_type: u8,
    pub value: [u8; 4],
}
fixed_element!(TimeoutInterval, "TimeoutInterval", ElementKind::Basic(Id::TIMEOUT_INTERVAL));

impl TimeoutInterval {
    pub const REASSOCIATION_DEADLINE: u8 = 1;
    pub const KEY_LIFETIME: u8 = 2;
    pub const ASSOCIATION_COMEBACK: u8 = 3;

    le_accessors! {
        value, set_value: u32, read_u32, write_u32;
    }
}

// IEEE Std 802.11-2016, 9.4.2.45
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct RmEnabledCapabilities {
    pub caps: [u8; 5],
}
fixed_element!(
    RmEnabledCapabilities,
    "RmEnabledCapabilities",
    ElementKind::Basic(Id::RM_ENABLED_CAPABILITIES)
);

impl RmEnabledCapabilities {
    pub const LINK_MEASUREMENT: u8 = 1 << 0;
    pub const NEIGHBOR_REPORT: u8 = 1 << 1;
    pub const BEACON_PASSIVE: u8 = 1 << 4;
    pub const BEACON_ACTIVE: u8 = 1 << 5;
    pub const BEACON_TABLE: u8 = 1 << 6;
}

// IEEE Std 802.11-2016, 9.4.2.158
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct VhtCapabilities {
    pub vht_cap_info: [u8; 4],
    pub rx_mcs_map: [u8; 2],
    pub rx_highest_rate: [u8; 2],
    pub tx_mcs_map: [u8; 2],
    pub tx_highest_rate: [u8; 2],
}
fixed_element!(VhtCapabilities, "VhtCapabilities", ElementKind::Basic(Id::VHT_CAPABILITIES));

impl VhtCapabilities {
    le_accessors! {
        vht_cap_info, set_vht_cap_info: u32, read_u32, write_u32;
        rx_mcs_map, set_rx_mcs_map: u16, read_u16, write_u16;
        rx_highest_rate, set_rx_highest_rate: u16, read_u16, write_u16;
        tx_mcs_map, set_tx_mcs_map: u16, read_u16, write_u16;
        tx_highest_rate, set_tx_highest_rate: u16, read_u16, write_u16;
    }
}

// IEEE Std 802.11-2016, 9.4.2.159
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct VhtOperation {
    pub channel_width: u8,
    pub center_freq_seg0: u8,
    pub center_freq_seg1: u8,
    pub basic_mcs_set: [u8; 2],
}
fixed_element!(VhtOperation, "VhtOperation", ElementKind::Basic(Id::VHT_OPERATION));

impl VhtOperation {
    le_accessors! {
        basic_mcs_set, set_basic_mcs_set: u16, read_u16, write_u16;
    }
}
