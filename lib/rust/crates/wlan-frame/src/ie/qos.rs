// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{invalid, Element, ElementKind, Id, IE_MAX_LEN, VENDOR_HDR_LEN},
    crate::{
        appendable::{Appendable, BufferTooSmall},
        buffer_reader::BufferReader,
        error::FrameParseError,
        mac::{MacAddr, TsInfo},
        organization::Oui,
    },
    zerocopy::{AsBytes, FromBytes, Unaligned},
};

pub const WMM_OUI_TYPE: u8 = 0x02;
pub const WMM_VERSION: u8 = 0x01;

// WMM Specification 2.2.
pub const WMM_INFO_SUBTYPE: u8 = 0x00;
pub const WMM_PARAM_SUBTYPE: u8 = 0x01;
pub const WMM_TSPEC_SUBTYPE: u8 = 0x02;
pub const WMM_CAPS_SUBTYPE: u8 = 0x05;
pub const WMM_TCLAS_SUBTYPE: u8 = 0x06;
pub const WMM_TCLAS_PROCESSING_SUBTYPE: u8 = 0x07;

const fn wmm_kind(subtype: u8) -> ElementKind {
    ElementKind::Vendor { oui: Oui::MSFT, oui_type: WMM_OUI_TYPE, subtype: Some(subtype) }
}

/// Access category parameter record shared by the EDCA and WMM parameter elements.
// IEEE Std 802.11-2016, 9.4.2.29
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct AcParams {
    pub aci_aifsn: u8,
    pub ecw_min_max: u8,
    pub txop_limit: [u8; 2],
}

impl AcParams {
    pub const ACI_BE: u8 = 0;
    pub const ACI_BK: u8 = 1;
    pub const ACI_VI: u8 = 2;
    pub const ACI_VO: u8 = 3;

    pub fn new(aci: u8, aifsn: u8, acm: bool, ecw_min: u8, ecw_max: u8, txop_limit: u16) -> Self {
        let mut params = Self {
            aci_aifsn: (aifsn & 0x0F) | (acm as u8) << 4 | (aci & 0x03) << 5,
            ecw_min_max: (ecw_min & 0x0F) | (ecw_max & 0x0F) << 4,
            txop_limit: [0; 2],
        };
        params.set_txop_limit(txop_limit);
        params
    }

    pub fn aifsn(&self) -> u8 {
        self.aci_aifsn & 0x0F
    }

    pub fn acm(&self) -> bool {
        self.aci_aifsn & 0x10 != 0
    }

    pub fn aci(&self) -> u8 {
        (self.aci_aifsn >> 5) & 0x03
    }

    pub fn ecw_min(&self) -> u8 {
        self.ecw_min_max & 0x0F
    }

    pub fn ecw_max(&self) -> u8 {
        self.ecw_min_max >> 4
    }

    le_accessors! {
        txop_limit, set_txop_limit: u16, read_u16, write_u16;
    }
}

// IEEE Std 802.11-2016, 9.4.2.29
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct EdcaParamSet {
    pub qos_info: u8,
    pub reserved: u8,
    pub ac_be: AcParams,
    pub ac_bk: AcParams,
    pub ac_vi: AcParams,
    pub ac_vo: AcParams,
}
fixed_element!(EdcaParamSet, "EdcaParamSet", ElementKind::Basic(Id::EDCA_PARAM_SET));

// IEEE Std 802.11-2016, 9.4.2.30
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct Tspec {
    pub ts_info: [u8; 3],
    pub nominal_msdu_size: [u8; 2],
    pub max_msdu_size: [u8; 2],
    pub min_service_interval: [u8; 4],
    pub max_service_interval: [u8; 4],
    pub inactivity_interval: [u8; 4],
    pub suspension_interval: [u8; 4],
    pub service_start_time: [u8; 4],
    pub min_data_rate: [u8; 4],
    pub mean_data_rate: [u8; 4],
    pub peak_data_rate: [u8; 4],
    pub max_burst_size: [u8; 4],
    pub delay_bound: [u8; 4],
    pub min_phy_rate: [u8; 4],
    pub surplus_bw_allowance: [u8; 2],
    pub medium_time: [u8; 2],
}
fixed_element!(Tspec, "TSPEC", ElementKind::Basic(Id::TSPEC));

impl Tspec {
    pub fn ts_info(&self) -> TsInfo {
        TsInfo::from_bytes(self.ts_info)
    }

    pub fn set_ts_info(&mut self, ts_info: TsInfo) {
        self.ts_info = ts_info.to_bytes();
    }

    le_accessors! {
        nominal_msdu_size, set_nominal_msdu_size: u16, read_u16, write_u16;
        max_msdu_size, set_max_msdu_size: u16, read_u16, write_u16;
        min_service_interval, set_min_service_interval: u32, read_u32, write_u32;
        max_service_interval, set_max_service_interval: u32, read_u32, write_u32;
        inactivity_interval, set_inactivity_interval: u32, read_u32, write_u32;
        suspension_interval, set_suspension_interval: u32, read_u32, write_u32;
        service_start_time, set_service_start_time: u32, read_u32, write_u32;
        min_data_rate, set_min_data_rate: u32, read_u32, write_u32;
        mean_data_rate, set_mean_data_rate: u32, read_u32, write_u32;
        peak_data_rate, set_peak_data_rate: u32, read_u32, write_u32;
        max_burst_size, set_max_burst_size: u32, read_u32, write_u32;
        delay_bound, set_delay_bound: u32, read_u32, write_u32;
        min_phy_rate, set_min_phy_rate: u32, read_u32, write_u32;
        surplus_bw_allowance, set_surplus_bw_allowance: u16, read_u16, write_u16;
        medium_time, set_medium_time: u16, read_u16, write_u16;
    }
}

/// Frame classifier of a TCLAS element, IEEE Std 802.11-2016, 9.4.2.31.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameClassifier {
    Ethernet { mask: u8, src: MacAddr, dst: MacAddr, ether_type: u16 },
    Ipv4 {
        mask: u8,
        src: [u8; 4],
        dst: [u8; 4],
        src_port: u16,
        dst_port: u16,
        dscp: u8,
        protocol: u8,
    },
    Ipv6 {
        mask: u8,
        src: [u8; 16],
        dst: [u8; 16],
        src_port: u16,
        dst_port: u16,
        flow_label: [u8; 3],
    },
    Dot1q { mask: u8, tag: u16 },
    Other(OtherClassifier),
}

/// A classifier of a type this crate does not decode. Its parameters are carried as raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtherClassifier {
    classifier_type: u8,
    mask: u8,
    params: Vec<u8>,
}

impl OtherClassifier {
    /// Returns `None` for the types `FrameClassifier` decodes itself and for parameters that do
    /// not fit in a TCLAS element.
    pub fn new(classifier_type: u8, mask: u8, params: Vec<u8>) -> Option<Self> {
        if classifier_type <= FrameClassifier::TYPE_DOT1Q
            || params.len() > IE_MAX_LEN - Tclas::FIXED_LEN
        {
            return None;
        }
        Some(Self { classifier_type, mask, params })
    }

    pub fn classifier_type(&self) -> u8 {
        self.classifier_type
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    pub fn params(&self) -> &[u8] {
        &self.params[..]
    }
}

impl FrameClassifier {
    const TYPE_ETHERNET: u8 = 0;
    const TYPE_IP: u8 = 1;
    const TYPE_DOT1Q: u8 = 2;

    fn classifier_type(&self) -> u8 {
        match self {
            FrameClassifier::Ethernet { .. } => Self::TYPE_ETHERNET,
            FrameClassifier::Ipv4 { .. } | FrameClassifier::Ipv6 { .. } => Self::TYPE_IP,
            FrameClassifier::Dot1q { .. } => Self::TYPE_DOT1Q,
            FrameClassifier::Other(other) => other.classifier_type,
        }
    }

    fn mask(&self) -> u8 {
        match self {
            FrameClassifier::Ethernet { mask, .. }
            | FrameClassifier::Ipv4 { mask, .. }
            | FrameClassifier::Ipv6 { mask, .. }
            | FrameClassifier::Dot1q { mask, .. } => *mask,
            FrameClassifier::Other(other) => other.mask,
        }
    }

    /// Length of the classifier parameters following the type and mask bytes.
    fn params_len(&self) -> usize {
        match self {
            FrameClassifier::Ethernet { .. } => 14,
            FrameClassifier::Ipv4 { .. } => 16,
            FrameClassifier::Ipv6 { .. } => 40,
            FrameClassifier::Dot1q { .. } => 2,
            FrameClassifier::Other(other) => other.params.len(),
        }
    }

    fn write_params<A: Appendable>(&self, w: &mut A) -> Result<(), BufferTooSmall> {
        match self {
            FrameClassifier::Ethernet { src, dst, ether_type, .. } => {
                w.append_bytes(&src[..])?;
                w.append_bytes(&dst[..])?;
                w.append_u16_le(*ether_type)
            }
            FrameClassifier::Ipv4 { src, dst, src_port, dst_port, dscp, protocol, .. } => {
                w.append_byte(4)?;
                w.append_bytes(&src[..])?;
                w.append_bytes(&dst[..])?;
                w.append_u16_le(*src_port)?;
                w.append_u16_le(*dst_port)?;
                w.append_byte(*dscp)?;
                w.append_byte(*protocol)?;
                w.append_byte(0)
            }
            FrameClassifier::Ipv6 { src, dst, src_port, dst_port, flow_label, .. } => {
                w.append_byte(6)?;
                w.append_bytes(&src[..])?;
                w.append_bytes(&dst[..])?;
                w.append_u16_le(*src_port)?;
                w.append_u16_le(*dst_port)?;
                w.append_bytes(&flow_label[..])
            }
            FrameClassifier::Dot1q { tag, .. } => w.append_u16_le(*tag),
            FrameClassifier::Other(other) => w.append_bytes(&other.params[..]),
        }
    }

    fn parse(
        id: Id,
        classifier_type: u8,
        mask: u8,
        params: &[u8],
    ) -> Result<Self, FrameParseError> {
        let bad_len = || invalid(id, "classifier parameters do not match their type");
        let mut r = BufferReader::new(params);
        let classifier = match classifier_type {
            Self::TYPE_ETHERNET => FrameClassifier::Ethernet {
                mask,
                src: r.read_array::<6>().ok_or_else(bad_len)?,
                dst: r.read_array::<6>().ok_or_else(bad_len)?,
                ether_type: r.read_u16_le().ok_or_else(bad_len)?,
            },
            Self::TYPE_IP => match r.read_byte().ok_or_else(bad_len)? {
                4 => {
                    let classifier = FrameClassifier::Ipv4 {
                        mask,
                        src: r.read_array::<4>().ok_or_else(bad_len)?,
                        dst: r.read_array::<4>().ok_or_else(bad_len)?,
                        src_port: r.read_u16_le().ok_or_else(bad_len)?,
                        dst_port: r.read_u16_le().ok_or_else(bad_len)?,
                        dscp: r.read_byte().ok_or_else(bad_len)?,
                        protocol: r.read_byte().ok_or_else(bad_len)?,
                    };
                    r.read_byte().ok_or_else(bad_len)?;
                    classifier
                }
                6 => FrameClassifier::Ipv6 {
                    mask,
                    src: r.read_array::<16>().ok_or_else(bad_len)?,
                    dst: r.read_array::<16>().ok_or_else(bad_len)?,
                    src_port: r.read_u16_le().ok_or_else(bad_len)?,
                    dst_port: r.read_u16_le().ok_or_else(bad_len)?,
                    flow_label: r.read_array::<3>().ok_or_else(bad_len)?,
                },
                _ => return Err(invalid(id, "unknown IP version")),
            },
            Self::TYPE_DOT1Q => {
                FrameClassifier::Dot1q { mask, tag: r.read_u16_le().ok_or_else(bad_len)? }
            }
            _ => {
                return Ok(FrameClassifier::Other(OtherClassifier {
                    classifier_type,
                    mask,
                    params: params.to_vec(),
                }))
            }
        };
        if r.bytes_remaining() != 0 {
            return Err(bad_len());
        }
        Ok(classifier)
    }
}

// IEEE Std 802.11-2016, 9.4.2.31
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tclas {
    pub user_priority: u8,
    pub classifier: FrameClassifier,
}

impl Tclas {
    const FIXED_LEN: usize = 3;

    fn len(&self) -> usize {
        Self::FIXED_LEN + self.classifier.params_len()
    }

    fn write<A: Appendable>(&self, w: &mut A) -> Result<(), BufferTooSmall> {
        w.append_byte(self.user_priority)?;
        w.append_byte(self.classifier.classifier_type())?;
        w.append_byte(self.classifier.mask())?;
        self.classifier.write_params(w)
    }

    fn parse(id: Id, body: &[u8]) -> Result<Self, FrameParseError> {
        if body.len() < Self::FIXED_LEN {
            return Err(invalid(id, "too short"));
        }
        Ok(Self {
            user_priority: body[0],
            classifier: FrameClassifier::parse(id, body[1], body[2], &body[Self::FIXED_LEN..])?,
        })
    }
}

impl Element for Tclas {
    const NAME: &'static str = "TCLAS";
    const KIND: ElementKind = ElementKind::Basic(Id::TCLAS);
    const MAX_BODY_LEN: usize = IE_MAX_LEN;

    fn body_len(&self) -> usize {
        self.len()
    }

    fn write_body<A: Appendable>(&self, w: &mut A) -> Result<(), BufferTooSmall> {
        self.write(w)
    }

    fn parse_body(body: &[u8]) -> Result<Self, FrameParseError> {
        Self::parse(Id::TCLAS, body)
    }
}

// IEEE Std 802.11-2016, 9.4.2.33
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct TclasProcessing {
    pub processing: u8,
}
fixed_element!(TclasProcessing, "TclasProcessing", ElementKind::Basic(Id::TCLAS_PROCESSING));

// IEEE Std 802.11-2016, 9.4.2.32. Delay in TUs before a rejected request may be retried.
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct TsDelay {
    pub delay: [u8; 4],
}
fixed_element!(TsDelay, "TsDelay", ElementKind::Basic(Id::TS_DELAY));

impl TsDelay {
    le_accessors! {
        delay, set_delay: u32, read_u32, write_u32;
    }
}

// IEEE Std 802.11-2016, 9.4.2.34
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct Schedule {
    pub schedule_info: [u8; 2],
    pub service_start_time: [u8; 4],
    pub service_interval: [u8; 4],
    pub spec_interval: [u8; 2],
}
fixed_element!(Schedule, "Schedule", ElementKind::Basic(Id::SCHEDULE));

impl Schedule {
    le_accessors! {
        schedule_info, set_schedule_info: u16, read_u16, write_u16;
        service_start_time, set_service_start_time: u32, read_u32, write_u32;
        service_interval, set_service_interval: u32, read_u32, write_u32;
        spec_interval, set_spec_interval: u16, read_u16, write_u16;
    }
}

/// WMM Information element. Stations send their U-APSD flags in `qos_info`, APs their
/// parameter set count.
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct WmmInfo {
    pub version: u8,
    pub qos_info: u8,
}
fixed_element!(WmmInfo, "WmmInfo", wmm_kind(WMM_INFO_SUBTYPE));

#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct WmmParam {
    pub version: u8,
    pub qos_info: u8,
    pub reserved: u8,
    pub ac_be: AcParams,
    pub ac_bk: AcParams,
    pub ac_vi: AcParams,
    pub ac_vo: AcParams,
}
fixed_element!(WmmParam, "WmmParam", wmm_kind(WMM_PARAM_SUBTYPE));

#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct WmmTspec {
    pub version: u8,
    pub tspec: Tspec,
}
fixed_element!(WmmTspec, "WmmTspec", wmm_kind(WMM_TSPEC_SUBTYPE));

#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct WmmCaps {
    pub version: u8,
    pub caps: u8,
}
fixed_element!(WmmCaps, "WmmCaps", wmm_kind(WMM_CAPS_SUBTYPE));

impl WmmCaps {
    pub const QACK: u8 = 1 << 0;
    pub const QUEUE_REQUEST: u8 = 1 << 1;
    pub const TXOP_REQUEST: u8 = 1 << 2;
    pub const MORE_ACK: u8 = 1 << 3;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WmmTclas {
    pub version: u8,
    pub tclas: Tclas,
}

impl Element for WmmTclas {
    const NAME: &'static str = "WmmTclas";
    const KIND: ElementKind = wmm_kind(WMM_TCLAS_SUBTYPE);
    const MAX_BODY_LEN: usize = IE_MAX_LEN - VENDOR_HDR_LEN - 1;

    fn body_len(&self) -> usize {
        1 + self.tclas.len()
    }

    fn write_body<A: Appendable>(&self, w: &mut A) -> Result<(), BufferTooSmall> {
        w.append_byte(self.version)?;
        self.tclas.write(w)
    }

    fn parse_body(body: &[u8]) -> Result<Self, FrameParseError> {
        match body.split_first() {
            Some((version, rest)) => Ok(Self {
                version: *version,
                tclas: Tclas::parse(Id::VENDOR_SPECIFIC, rest)?,
            }),
            None => Err(invalid(Id::VENDOR_SPECIFIC, "empty WMM TCLAS")),
        }
    }
}

#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct WmmTclasProcessing {
    pub version: u8,
    pub processing: u8,
}
fixed_element!(WmmTclasProcessing, "WmmTclasProcessing", wmm_kind(WMM_TCLAS_PROCESSING_SUBTYPE));

#[cfg(test)]
mod tests {
    use {super::*, crate::ie::write_element, proptest::prelude::*, std::mem::size_of};

    #[test]
    fn element_body_sizes() {
        assert_eq!(size_of::<AcParams>(), 4);
        assert_eq!(size_of::<EdcaParamSet>(), 18);
        assert_eq!(size_of::<Tspec>(), 55);
        assert_eq!(size_of::<Schedule>(), 12);
        assert_eq!(size_of::<WmmParam>(), 19);
        assert_eq!(size_of::<WmmTspec>(), 56);
    }

    #[test]
    fn ac_params_bits() {
        let params = AcParams::new(AcParams::ACI_VI, 2, true, 3, 4, 94);
        assert_eq!(params.as_bytes(), &[0b0101_0010, 0x43, 94, 0]);
        assert_eq!(params.aci(), AcParams::ACI_VI);
        assert_eq!(params.aifsn(), 2);
        assert!(params.acm());
        assert_eq!(params.ecw_min(), 3);
        assert_eq!(params.ecw_max(), 4);
        assert_eq!(params.txop_limit(), 94);
    }

    #[test]
    fn wmm_param_element_prefix() {
        let mut buf = vec![];
        write_element(&mut buf, &WmmParam { version: WMM_VERSION, ..Default::default() })
            .expect("write wmm param");
        assert_eq!(buf.len(), 2 + 5 + 19);
        assert_eq!(&buf[..8], &[221, 24, 0x00, 0x50, 0xF2, 0x02, 0x01, 0x01]);
    }

    #[test]
    fn tclas_ipv4_round_trip() {
        let tclas = Tclas {
            user_priority: 6,
            classifier: FrameClassifier::Ipv4 {
                mask: 0x1F,
                src: [192, 168, 1, 2],
                dst: [192, 168, 1, 3],
                src_port: 5000,
                dst_port: 5001,
                dscp: 46,
                protocol: 17,
            },
        };
        let mut buf = vec![];
        write_element(&mut buf, &tclas).expect("write tclas");
        #[rustfmt::skip]
        assert_eq!(&buf[..], &[
            14, 19, // header
            6, 1, 0x1F, // user priority, classifier type, mask
            4, // version
            192, 168, 1, 2, // source address
            192, 168, 1, 3, // destination address
            0x88, 0x13, 0x89, 0x13, // ports
            46, 17, 0, // dscp, protocol, reserved
        ][..]);
        assert_eq!(Tclas::parse_body(&buf[2..]), Ok(tclas));
    }

    #[test]
    fn tclas_with_wrong_parameter_length() {
        assert!(Tclas::parse_body(&[0, 2, 0xFF, 1]).is_err());
        assert!(Tclas::parse_body(&[0, 2, 0xFF, 1, 2, 3]).is_err());
        assert_eq!(
            Tclas::parse_body(&[0, 9, 0xFF, 1, 2, 3]),
            Ok(Tclas {
                user_priority: 0,
                classifier: FrameClassifier::Other(
                    OtherClassifier::new(9, 0xFF, vec![1, 2, 3]).expect("valid classifier")
                ),
            })
        );
    }

    #[test]
    fn other_classifier_rejects_decoded_types() {
        for classifier_type in 0..=2 {
            assert_eq!(OtherClassifier::new(classifier_type, 0xFF, vec![1, 2, 3]), None);
        }
        assert_eq!(OtherClassifier::new(3, 0xFF, vec![0; 253]), None);
        let other = OtherClassifier::new(3, 0xFF, vec![0; 252]).expect("valid classifier");
        assert_eq!(other.classifier_type(), 3);
        assert_eq!(other.params().len(), 252);
    }

    fn arb_classifier() -> impl Strategy<Value = FrameClassifier> {
        prop_oneof![
            (any::<u8>(), any::<MacAddr>(), any::<MacAddr>(), any::<u16>()).prop_map(
                |(mask, src, dst, ether_type)| FrameClassifier::Ethernet {
                    mask,
                    src,
                    dst,
                    ether_type
                }
            ),
            (any::<u8>(), any::<[u8; 4]>(), any::<[u8; 4]>(), any::<(u16, u16, u8, u8)>())
                .prop_map(|(mask, src, dst, (src_port, dst_port, dscp, protocol))| {
                    FrameClassifier::Ipv4 { mask, src, dst, src_port, dst_port, dscp, protocol }
                }),
            (any::<u8>(), any::<[u8; 16]>(), any::<[u8; 16]>(), any::<(u16, u16, [u8; 3])>())
                .prop_map(|(mask, src, dst, (src_port, dst_port, flow_label))| {
                    FrameClassifier::Ipv6 { mask, src, dst, src_port, dst_port, flow_label }
                }),
            (any::<u8>(), any::<u16>())
                .prop_map(|(mask, tag)| FrameClassifier::Dot1q { mask, tag }),
            (3u8.., any::<u8>(), prop::collection::vec(any::<u8>(), 0..=252)).prop_map(
                |(classifier_type, mask, params)| {
                    FrameClassifier::Other(
                        OtherClassifier::new(classifier_type, mask, params)
                            .expect("valid classifier"),
                    )
                }
            ),
        ]
    }

    proptest! {
        #[test]
        fn tclas_round_trips(user_priority in 0u8..8, classifier in arb_classifier()) {
            let tclas = Tclas { user_priority, classifier };
            let mut buf = vec![];
            write_element(&mut buf, &tclas).expect("write tclas");
            prop_assert_eq!(buf.len(), 2 + tclas.len());
            prop_assert_eq!(Tclas::parse_body(&buf[2..]), Ok(tclas));
        }
    }

    #[test]
    fn tspec_fields_are_little_endian() {
        let mut tspec = Tspec::default();
        tspec.set_nominal_msdu_size(0x00D0);
        tspec.set_mean_data_rate(0x00015F90);
        assert_eq!(&tspec.as_bytes()[3..5], &[0xD0, 0x00]);
        assert_eq!(&tspec.as_bytes()[31..35], &[0x90, 0x5F, 0x01, 0x00]);
    }
}
