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
        mac::{AssocReqHdr, AssocRespHdr, CapabilityInfo, MacAddr, ReassocReqHdr, StatusCode},
    },
};

/// Elements shared by association and reassociation requests.
// IEEE Std 802.11-2016, 9.3.3.6 and 9.3.3.8
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AssocRequestElements {
    pub ssid: Option<Ssid>,
    pub supported_rates: Option<SupportedRates>,
    pub ext_supported_rates: Option<ExtSupportedRates>,
    pub power_cap: Option<PowerCapability>,
    pub supported_channels: Option<SupportedChannels>,
    pub rsne: Option<Rsne>,
    pub qos_cap: Option<QosCapability>,
    pub rm_enabled_caps: Option<RmEnabledCapabilities>,
    pub mobility_domain: Option<MobilityDomain>,
    /// Only sent in reassociation requests during a fast BSS transition.
    pub fte: Option<FastBssTransition>,
    pub ht_cap: Option<HtCapabilities>,
    pub ext_cap: Option<ExtCapabilities>,
    pub vht_cap: Option<VhtCapabilities>,
    pub wapi: Option<WapiIe>,
    pub wpa: Option<WpaIe>,
    pub wmm_info: Option<WmmInfo>,
    pub wmm_caps: Option<WmmCaps>,
    pub wsc: Option<WscIe>,
    pub p2p: Option<P2pIe>,
    pub ccx_version: Option<CcxVersion>,
    pub ccx_radio_mgmt: Option<CcxRadioMgmtCap>,
}

impl AssocRequestElements {
    fn max_len() -> usize {
        max_element_len::<Ssid>()
            + max_element_len::<SupportedRates>()
            + max_element_len::<ExtSupportedRates>()
            + max_element_len::<PowerCapability>()
            + max_element_len::<SupportedChannels>()
            + max_element_len::<Rsne>()
            + max_element_len::<QosCapability>()
            + max_element_len::<RmEnabledCapabilities>()
            + max_element_len::<MobilityDomain>()
            + max_element_len::<FastBssTransition>()
            + max_element_len::<HtCapabilities>()
            + max_element_len::<ExtCapabilities>()
            + max_element_len::<VhtCapabilities>()
            + max_element_len::<WapiIe>()
            + max_element_len::<WpaIe>()
            + max_element_len::<WmmInfo>()
            + max_element_len::<WmmCaps>()
            + max_element_len::<WscIe>()
            + max_element_len::<P2pIe>()
            + max_element_len::<CcxVersion>()
            + max_element_len::<CcxRadioMgmtCap>()
    }

    fn write<A: Appendable>(&self, w: &mut ElementWriter<'_, A>) -> Result<(), FrameWriteError> {
        w.write_opt(&self.ssid)?;
        w.write_opt(&self.supported_rates)?;
        w.write_opt(&self.ext_supported_rates)?;
        w.write_opt(&self.power_cap)?;
        w.write_opt(&self.supported_channels)?;
        w.write_opt(&self.rsne)?;
        w.write_opt(&self.qos_cap)?;
        w.write_opt(&self.rm_enabled_caps)?;
        w.write_opt(&self.mobility_domain)?;
        w.write_opt(&self.fte)?;
        w.write_opt(&self.ht_cap)?;
        w.write_opt(&self.ext_cap)?;
        w.write_opt(&self.vht_cap)?;
        w.write_opt(&self.wapi)?;
        w.write_opt(&self.wpa)?;
        w.write_opt(&self.wmm_info)?;
        w.write_opt(&self.wmm_caps)?;
        w.write_opt(&self.wsc)?;
        w.write_opt(&self.p2p)?;
        w.write_opt(&self.ccx_version)?;
        w.write_opt(&self.ccx_radio_mgmt)
    }

    fn accept(&mut self, el: &RawElement<'_>) -> Disposition {
        offer_element!(
            el,
            self.ssid,
            self.supported_rates,
            self.ext_supported_rates,
            self.power_cap,
            self.supported_channels,
            self.rsne,
            self.qos_cap,
            self.rm_enabled_caps,
            self.mobility_domain,
            self.fte,
            self.ht_cap,
            self.ext_cap,
            self.vht_cap,
            self.wapi,
            self.wpa,
            self.wmm_info,
            self.wmm_caps,
            self.wsc,
            self.p2p,
            self.ccx_version,
            self.ccx_radio_mgmt,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AssocRequest {
    pub capabilities: CapabilityInfo,
    pub listen_interval: u16,
    pub elements: AssocRequestElements,
}

impl FrameBody for AssocRequest {
    const NAME: &'static str = "AssocRequest";
    const FIXED_LEN: usize = frame_len!(AssocReqHdr);

    fn max_len() -> usize {
        Self::FIXED_LEN + AssocRequestElements::max_len()
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        let mut hdr = AssocReqHdr::default();
        hdr.set_capabilities(self.capabilities);
        hdr.set_listen_interval(self.listen_interval);
        w.append_value(&hdr)?;
        Ok(())
    }

    fn write_elements<A: Appendable>(
        &self,
        w: &mut ElementWriter<'_, A>,
    ) -> Result<(), FrameWriteError> {
        self.elements.write(w)
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        let hdr = r.read::<AssocReqHdr>().ok_or(FrameParseError::InvalidField("assoc header"))?;
        Ok(Self {
            capabilities: hdr.capabilities(),
            listen_interval: hdr.listen_interval(),
            elements: Default::default(),
        })
    }

    fn accept_element(&mut self, el: &RawElement<'_>) -> Disposition {
        self.elements.accept(el)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ReassocRequest {
    pub capabilities: CapabilityInfo,
    pub listen_interval: u16,
    pub current_ap: MacAddr,
    pub elements: AssocRequestElements,
}

impl FrameBody for ReassocRequest {
    const NAME: &'static str = "ReassocRequest";
    const FIXED_LEN: usize = frame_len!(ReassocReqHdr);

    fn max_len() -> usize {
        Self::FIXED_LEN + AssocRequestElements::max_len()
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        let mut hdr = ReassocReqHdr::default();
        hdr.set_capabilities(self.capabilities);
        hdr.set_listen_interval(self.listen_interval);
        hdr.current_ap = self.current_ap;
        w.append_value(&hdr)?;
        Ok(())
    }

    fn write_elements<A: Appendable>(
        &self,
        w: &mut ElementWriter<'_, A>,
    ) -> Result<(), FrameWriteError> {
        self.elements.write(w)
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        let hdr =
            r.read::<ReassocReqHdr>().ok_or(FrameParseError::InvalidField("reassoc header"))?;
        Ok(Self {
            capabilities: hdr.capabilities(),
            listen_interval: hdr.listen_interval(),
            current_ap: hdr.current_ap,
            elements: Default::default(),
        })
    }

    fn accept_element(&mut self, el: &RawElement<'_>) -> Disposition {
        self.elements.accept(el)
    }
}

/// Body of an association response. Reassociation responses share the same layout.
// IEEE Std 802.11-2016, 9.3.3.7 and 9.3.3.9
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AssocResponse {
    pub capabilities: CapabilityInfo,
    pub status_code: StatusCode,
    /// Association ID as sent on the wire, with the two most significant bits set.
    pub aid: u16,
    pub supported_rates: Option<SupportedRates>,
    pub ext_supported_rates: Option<ExtSupportedRates>,
    pub edca: Option<EdcaParamSet>,
    pub rm_enabled_caps: Option<RmEnabledCapabilities>,
    pub mobility_domain: Option<MobilityDomain>,
    pub fte: Option<FastBssTransition>,
    pub rsne: Option<Rsne>,
    pub timeout_interval: Option<TimeoutInterval>,
    pub ht_cap: Option<HtCapabilities>,
    pub ht_op: Option<HtOperation>,
    pub ext_cap: Option<ExtCapabilities>,
    pub vht_cap: Option<VhtCapabilities>,
    pub vht_op: Option<VhtOperation>,
    pub wmm_param: Option<WmmParam>,
    pub wmm_caps: Option<WmmCaps>,
    pub wsc: Option<WscIe>,
    pub p2p: Option<P2pIe>,
    pub ccx_version: Option<CcxVersion>,
}

impl FrameBody for AssocResponse {
    const NAME: &'static str = "AssocResponse";
    const FIXED_LEN: usize = frame_len!(AssocRespHdr);

    fn max_len() -> usize {
        Self::FIXED_LEN
            + max_element_len::<SupportedRates>()
            + max_element_len::<ExtSupportedRates>()
            + max_element_len::<EdcaParamSet>()
            + max_element_len::<RmEnabledCapabilities>()
            + max_element_len::<MobilityDomain>()
            + max_element_len::<FastBssTransition>()
            + max_element_len::<Rsne>()
            + max_element_len::<TimeoutInterval>()
            + max_element_len::<HtCapabilities>()
            + max_element_len::<HtOperation>()
            + max_element_len::<ExtCapabilities>()
            + max_element_len::<VhtCapabilities>()
            + max_element_len::<VhtOperation>()
            + max_element_len::<WmmParam>()
            + max_element_len::<WmmCaps>()
            + max_element_len::<WscIe>()
            + max_element_len::<P2pIe>()
            + max_element_len::<CcxVersion>()
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        let mut hdr = AssocRespHdr::default();
        hdr.set_capabilities(self.capabilities);
        hdr.set_status_code(self.status_code.0);
        hdr.set_aid(self.aid);
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
        w.write_opt(&self.supported_rates)?;
        w.write_opt(&self.ext_supported_rates)?;
        w.write_opt(&self.edca)?;
        w.write_opt(&self.rm_enabled_caps)?;
        w.write_opt(&self.mobility_domain)?;
        w.write_opt(&self.fte)?;
        w.write_opt(&self.rsne)?;
        w.write_opt(&self.timeout_interval)?;
        w.write_opt(&self.ht_cap)?;
        w.write_opt(&self.ht_op)?;
        w.write_opt(&self.ext_cap)?;
        w.write_opt(&self.vht_cap)?;
        w.write_opt(&self.vht_op)?;
        w.write_opt(&self.wmm_param)?;
        w.write_opt(&self.wmm_caps)?;
        w.write_opt(&self.wsc)?;
        w.write_opt(&self.p2p)?;
        w.write_opt(&self.ccx_version)
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        let hdr =
            r.read::<AssocRespHdr>().ok_or(FrameParseError::InvalidField("assoc resp header"))?;
        Ok(Self {
            capabilities: hdr.capabilities(),
            status_code: StatusCode(hdr.status_code()),
            aid: hdr.aid(),
            ..Default::default()
        })
    }

    fn accept_element(&mut self, el: &RawElement<'_>) -> Disposition {
        offer_element!(
            el,
            self.supported_rates,
            self.ext_supported_rates,
            self.edca,
            self.rm_enabled_caps,
            self.mobility_domain,
            self.fte,
            self.rsne,
            self.timeout_interval,
            self.ht_cap,
            self.ht_op,
            self.ext_cap,
            self.vht_cap,
            self.vht_op,
            self.wmm_param,
            self.wmm_caps,
            self.wsc,
            self.p2p,
            self.ccx_version,
        )
    }
}
