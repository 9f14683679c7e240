// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{ElementWriter, FrameBody},
    crate::{
        appendable::Appendable,
        buffer_reader::BufferReader,
        error::{CodecWarning, FrameParseError, FrameWriteError},
        frame_len,
        ie::*,
        mac::{BeaconHdr, CapabilityInfo},
    },
};

// IEEE Std 802.11-2016, 9.3.3.10
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ProbeRequest {
    pub ssid: Option<Ssid>,
    pub supported_rates: Option<SupportedRates>,
    pub ext_supported_rates: Option<ExtSupportedRates>,
    pub ds_params: Option<DsParamSet>,
    pub ht_cap: Option<HtCapabilities>,
    pub ext_cap: Option<ExtCapabilities>,
    pub vht_cap: Option<VhtCapabilities>,
    pub wsc: Option<WscIe>,
    pub p2p: Option<P2pIe>,
}

impl FrameBody for ProbeRequest {
    const NAME: &'static str = "ProbeRequest";
    const FIXED_LEN: usize = 0;

    fn max_len() -> usize {
        max_element_len::<Ssid>()
            + max_element_len::<SupportedRates>()
            + max_element_len::<ExtSupportedRates>()
            + max_element_len::<DsParamSet>()
            + max_element_len::<HtCapabilities>()
            + max_element_len::<ExtCapabilities>()
            + max_element_len::<VhtCapabilities>()
            + max_element_len::<WscIe>()
            + max_element_len::<P2pIe>()
    }

    fn write_fixed<A: Appendable>(&self, _w: &mut A) -> Result<(), FrameWriteError> {
        Ok(())
    }

    fn write_elements<A: Appendable>(
        &self,
        w: &mut ElementWriter<'_, A>,
    ) -> Result<(), FrameWriteError> {
        w.write_opt(&self.ssid)?;
        w.write_opt(&self.supported_rates)?;
        w.write_opt(&self.ext_supported_rates)?;
        w.write_opt(&self.ds_params)?;
        w.write_opt(&self.ht_cap)?;
        w.write_opt(&self.ext_cap)?;
        w.write_opt(&self.vht_cap)?;
        w.write_opt(&self.wsc)?;
        w.write_opt(&self.p2p)
    }

    fn parse_fixed(_r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        Ok(Self::default())
    }

    fn accept_element(&mut self, el: &RawElement<'_>) -> Disposition {
        offer_element!(
            el,
            self.ssid,
            self.supported_rates,
            self.ext_supported_rates,
            self.ds_params,
            self.ht_cap,
            self.ext_cap,
            self.vht_cap,
            self.wsc,
            self.p2p,
        )
    }
}

/// Body of a probe response. Beacons share the same layout.
// IEEE Std 802.11-2016, 9.3.3.3 and 9.3.3.11
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ProbeResponse {
    pub timestamp: u64,
    pub beacon_interval: u16,
    pub capabilities: CapabilityInfo,
    pub ssid: Option<Ssid>,
    pub supported_rates: Option<SupportedRates>,
    pub ds_params: Option<DsParamSet>,
    pub power_constraint: Option<PowerConstraint>,
    pub csa: Option<ChannelSwitchAnnouncement>,
    pub tpc_report: Option<TpcReport>,
    pub erp: Option<ErpInfo>,
    pub ext_supported_rates: Option<ExtSupportedRates>,
    pub rsne: Option<Rsne>,
    pub edca: Option<EdcaParamSet>,
    pub rm_enabled_caps: Option<RmEnabledCapabilities>,
    pub mobility_domain: Option<MobilityDomain>,
    pub ht_cap: Option<HtCapabilities>,
    pub ht_op: Option<HtOperation>,
    pub ext_cap: Option<ExtCapabilities>,
    pub vht_cap: Option<VhtCapabilities>,
    pub vht_op: Option<VhtOperation>,
    pub wapi: Option<WapiIe>,
    pub wpa: Option<WpaIe>,
    pub wmm_param: Option<WmmParam>,
    pub wmm_caps: Option<WmmCaps>,
    pub wsc: Option<WscIe>,
    pub p2p: Option<P2pIe>,
}

impl FrameBody for ProbeResponse {
    const NAME: &'static str = "ProbeResponse";
    const FIXED_LEN: usize = frame_len!(BeaconHdr);

    fn max_len() -> usize {
        Self::FIXED_LEN
            + max_element_len::<Ssid>()
            + max_element_len::<SupportedRates>()
            + max_element_len::<DsParamSet>()
            + max_element_len::<PowerConstraint>()
            + max_element_len::<ChannelSwitchAnnouncement>()
            + max_element_len::<TpcReport>()
            + max_element_len::<ErpInfo>()
            + max_element_len::<ExtSupportedRates>()
            + max_element_len::<Rsne>()
            + max_element_len::<EdcaParamSet>()
            + max_element_len::<RmEnabledCapabilities>()
            + max_element_len::<MobilityDomain>()
            + max_element_len::<HtCapabilities>()
            + max_element_len::<HtOperation>()
            + max_element_len::<ExtCapabilities>()
            + max_element_len::<VhtCapabilities>()
            + max_element_len::<VhtOperation>()
            + max_element_len::<WapiIe>()
            + max_element_len::<WpaIe>()
            + max_element_len::<WmmParam>()
            + max_element_len::<WmmCaps>()
            + max_element_len::<WscIe>()
            + max_element_len::<P2pIe>()
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        let mut hdr = BeaconHdr::default();
        hdr.set_timestamp(self.timestamp);
        hdr.set_beacon_interval(self.beacon_interval);
        hdr.set_capabilities(self.capabilities);
        w.append_value(&hdr)?;
        Ok(())
    }

    fn write_elements<A: Appendable>(
        &self,
        w: &mut ElementWriter<'_, A>,
    ) -> Result<(), FrameWriteError> {
        if self.edca.is_some() && self.wmm_param.is_some() {
            w.warn(CodecWarning::ConflictingElements {
                first: EdcaParamSet::NAME,
                second: WmmParam::NAME,
            });
        }
        w.write_opt(&self.ssid)?;
        w.write_opt(&self.supported_rates)?;
        w.write_opt(&self.ds_params)?;
        w.write_opt(&self.power_constraint)?;
        w.write_opt(&self.csa)?;
        w.write_opt(&self.tpc_report)?;
        w.write_opt(&self.erp)?;
        w.write_opt(&self.ext_supported_rates)?;
        w.write_opt(&self.rsne)?;
        w.write_opt(&self.edca)?;
        w.write_opt(&self.rm_enabled_caps)?;
        w.write_opt(&self.mobility_domain)?;
        w.write_opt(&self.ht_cap)?;
        w.write_opt(&self.ht_op)?;
        w.write_opt(&self.ext_cap)?;
        w.write_opt(&self.vht_cap)?;
        w.write_opt(&self.vht_op)?;
        w.write_opt(&self.wapi)?;
        w.write_opt(&self.wpa)?;
        w.write_opt(&self.wmm_param)?;
        w.write_opt(&self.wmm_caps)?;
        w.write_opt(&self.wsc)?;
        w.write_opt(&self.p2p)
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        let hdr = r.read::<BeaconHdr>().ok_or(FrameParseError::InvalidField("beacon header"))?;
        Ok(Self {
            timestamp: hdr.timestamp(),
            beacon_interval: hdr.beacon_interval(),
            capabilities: hdr.capabilities(),
            ..Default::default()
        })
    }

    fn accept_element(&mut self, el: &RawElement<'_>) -> Disposition {
        offer_element!(
            el,
            self.ssid,
            self.supported_rates,
            self.ds_params,
            self.power_constraint,
            self.csa,
            self.tpc_report,
            self.erp,
            self.ext_supported_rates,
            self.rsne,
            self.edca,
            self.rm_enabled_caps,
            self.mobility_domain,
            self.ht_cap,
            self.ht_op,
            self.ext_cap,
            self.vht_cap,
            self.vht_op,
            self.wapi,
            self.wpa,
            self.wmm_param,
            self.wmm_caps,
            self.wsc,
            self.p2p,
        )
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{assert_variant, frame::test_utils::pack_exact, ie::Reader, Packed},
        proptest::prelude::*,
    };

    fn probe_response() -> ProbeResponse {
        let mut capabilities = CapabilityInfo::default();
        capabilities.set_ess(true);
        capabilities.set_short_preamble(true);
        ProbeResponse {
            timestamp: 0x0102030405060708,
            beacon_interval: 100,
            capabilities,
            ssid: Some(Ssid(b"test".to_vec())),
            supported_rates: Some(SupportedRates(vec![0x82, 0x84, 0x8b, 0x96])),
            ds_params: Some(DsParamSet { current_channel: 6 }),
            ..Default::default()
        }
    }

    #[test]
    fn pack_probe_request() {
        let frame = ProbeRequest {
            ssid: Some(Ssid(b"test".to_vec())),
            supported_rates: Some(SupportedRates(vec![0x02, 0x04, 0x0b, 0x16])),
            ext_supported_rates: Some(ExtSupportedRates(vec![0x0c, 0x12])),
            ..Default::default()
        };
        #[rustfmt::skip]
        assert_eq!(pack_exact(&frame), vec![
            0, 4, b't', b'e', b's', b't', // SSID
            1, 4, 0x02, 0x04, 0x0b, 0x16, // supported rates
            50, 2, 0x0c, 0x12, // extended supported rates
        ]);
    }

    #[test]
    fn pack_probe_response() {
        #[rustfmt::skip]
        assert_eq!(pack_exact(&probe_response()), vec![
            8, 7, 6, 5, 4, 3, 2, 1, // timestamp
            100, 0, // beacon interval
            0x21, 0x00, // capabilities
            0, 4, b't', b'e', b's', b't', // SSID
            1, 4, 0x82, 0x84, 0x8b, 0x96, // supported rates
            3, 1, 6, // DSSS parameter set
        ]);
    }

    #[test]
    fn parse_probe_response() {
        let bytes = pack_exact(&probe_response());
        let (frame, summary) = ProbeResponse::parse_with_summary(&bytes[..]).expect("parse");
        assert_eq!(frame, probe_response());
        assert!(summary.is_clean());
    }

    #[test]
    fn parse_vendor_elements_by_oui() {
        let mut frame = probe_response();
        frame.wmm_param = Some(WmmParam { version: 1, ..Default::default() });
        frame.wsc = Some(WscIe(vec![0x10, 0x4A, 0x00, 0x01, 0x10]));
        frame.p2p = Some(P2pIe(vec![0x02, 0x02, 0x00, 0x21, 0x00]));
        let bytes = pack_exact(&frame);
        assert_eq!(ProbeResponse::parse(&bytes[..]), Ok(frame));
    }

    #[test]
    fn edca_and_wmm_param_conflict() {
        let mut frame = probe_response();
        frame.edca = Some(EdcaParamSet::default());
        frame.wmm_param = Some(WmmParam::default());
        let packed = frame.packed_size().expect("size");
        assert_eq!(
            packed.warnings(),
            &[CodecWarning::ConflictingElements { first: "EdcaParamSet", second: "WmmParam" }]
        );
    }

    #[test]
    fn oversized_ssid_is_a_warning() {
        let mut frame = probe_response();
        frame.ssid = Some(Ssid(vec![b'a'; 40]));
        let bytes = pack_exact(&frame);
        assert_eq!(bytes.len(), 12 + 42 + 6 + 3);
        assert_variant!(
            frame.packed_size(),
            Ok(Packed::Warned(63, warnings)) => {
                assert_eq!(
                    warnings,
                    vec![CodecWarning::BodyExceedsLimit { element: "SSID", len: 40, limit: 32 }]
                )
            }
        );
    }

    #[test]
    fn truncated_mid_element() {
        let bytes = pack_exact(&probe_response());
        // Cut inside the supported rates body.
        let truncated = &bytes[..20];
        assert_eq!(
            ProbeResponse::parse(truncated),
            Err(FrameParseError::TruncatedElement { offset: 18, id: 1, declared: 4, remaining: 0 })
        );
        let truncated = &bytes[..22];
        assert_eq!(
            ProbeResponse::parse(truncated),
            Err(FrameParseError::TruncatedElement { offset: 18, id: 1, declared: 4, remaining: 2 })
        );
    }

    #[test]
    fn element_offsets_relative_to_frame() {
        let bytes = pack_exact(&probe_response());
        let result = ProbeResponse::parse_at(&bytes[..20], 24);
        assert_variant!(result, Err(FrameParseError::TruncatedElement { offset: 42, .. }));
    }

    fn arb_probe_response() -> impl Strategy<Value = ProbeResponse> {
        (
            proptest::collection::vec(any::<u8>(), 0..=32),
            proptest::collection::vec(any::<u8>(), 1..=8),
            proptest::option::of(any::<u8>()),
            proptest::option::of(proptest::collection::vec(any::<u8>(), 0..=40)),
            any::<bool>(),
        )
            .prop_map(|(ssid, rates, channel, rsne, wmm)| ProbeResponse {
                beacon_interval: 100,
                ssid: Some(Ssid(ssid)),
                supported_rates: Some(SupportedRates(rates)),
                ds_params: channel.map(|current_channel| DsParamSet { current_channel }),
                rsne: rsne.map(Rsne),
                wmm_param: if wmm { Some(WmmParam::default()) } else { None },
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn size_matches_pack_and_parse_round_trips(frame in arb_probe_response()) {
            let bytes = pack_exact(&frame);
            prop_assert_eq!(ProbeResponse::parse(&bytes[..]), Ok(frame));
        }

        #[test]
        fn inflated_length_byte_is_rejected(frame in arb_probe_response(), excess in 1usize..16) {
            let bytes = pack_exact(&frame);
            let region = &bytes[ProbeResponse::FIXED_LEN..];
            let elements: Vec<_> =
                Reader::new(region).collect::<Result<_, _>>().expect("valid elements");
            for el in elements {
                let len_pos = ProbeResponse::FIXED_LEN + el.offset + 1;
                let remaining = bytes.len() - len_pos - 1;
                let declared = remaining + excess;
                if declared > 255 {
                    continue;
                }
                let mut corrupted = bytes.clone();
                corrupted[len_pos] = declared as u8;
                prop_assert_eq!(
                    ProbeResponse::parse(&corrupted[..]),
                    Err(FrameParseError::TruncatedElement {
                        offset: ProbeResponse::FIXED_LEN + el.offset,
                        id: el.id.0,
                        declared,
                        remaining,
                    })
                );
            }
        }

        #[test]
        fn truncated_frame_never_parses_a_partial_element(
            frame in arb_probe_response(),
            cut in any::<prop::sample::Index>(),
        ) {
            let bytes = pack_exact(&frame);
            let cut = ProbeResponse::FIXED_LEN + cut.index(bytes.len() - ProbeResponse::FIXED_LEN);
            let boundaries: Vec<usize> = Reader::new(&bytes[ProbeResponse::FIXED_LEN..])
                .map(|el| {
                    let el = el.expect("valid element");
                    ProbeResponse::FIXED_LEN + el.offset
                })
                .collect();
            let result = ProbeResponse::parse(&bytes[..cut]);
            if boundaries.contains(&cut) {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(result.is_err());
            }
        }
    }
}
