// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Element population shared by the frame builders. Each function fills one element from the
//! configuration, the session or both.

use {
    crate::{
        config::{CfgKey, ConfigProvider},
        error::Error,
        session::PeSession,
    },
    wlan_frame::{
        ie::{
            lenient_reader, CcxRadioMgmtCap, CcxVersion, ChannelRange, DsParamSet,
            EdcaParamSet, ErpInfo, HtCapabilities, HtOperation, PowerCapability,
            PowerConstraint, QosCapability, RmEnabledCapabilities, Rsne, SupportedChannels,
            VhtCapabilities, VhtOperation, WapiIe, WmmCaps, WmmInfo, WmmParam, WpaIe,
            WMM_VERSION,
        },
        mac::StaQosInfo,
    },
};

const CCX_VERSION: u8 = 4;

pub fn ht_caps(config: &dyn ConfigProvider) -> Result<HtCapabilities, Error> {
    let mut ht_caps = HtCapabilities::default();
    ht_caps.set_ht_cap_info(config.get_u16(CfgKey::HtCapInfo)?);
    ht_caps.ampdu_params = config.get_u8(CfgKey::HtAmpduParams)?;
    let mcs_set = config.get_str(CfgKey::SupportedMcsSet)?;
    let n = mcs_set.len().min(ht_caps.mcs_set.len());
    ht_caps.mcs_set[..n].copy_from_slice(&mcs_set[..n]);
    ht_caps.set_ext_ht_cap(config.get_u16(CfgKey::ExtHtCapInfo)?);
    ht_caps.set_txbf_cap(config.get_int(CfgKey::TxBfCap)?);
    ht_caps.asel_cap = config.get_u8(CfgKey::AselCap)?;
    Ok(ht_caps)
}

/// HT operation of a BSS started on the session's channel. Basic MCS set is left empty.
pub fn ht_operation(session: &PeSession) -> HtOperation {
    HtOperation { primary_channel: session.channel, ..Default::default() }
}

pub fn vht_caps(config: &dyn ConfigProvider) -> Result<VhtCapabilities, Error> {
    let mut vht_caps = VhtCapabilities::default();
    vht_caps.set_vht_cap_info(config.get_int(CfgKey::VhtCapInfo)?);
    vht_caps.set_rx_mcs_map(config.get_u16(CfgKey::VhtRxMcsMap)?);
    vht_caps.set_tx_mcs_map(config.get_u16(CfgKey::VhtTxMcsMap)?);
    Ok(vht_caps)
}

/// VHT operation for a 20/40 MHz BSS.
pub fn vht_operation(config: &dyn ConfigProvider) -> Result<VhtOperation, Error> {
    let mut vht_op = VhtOperation::default();
    vht_op.set_basic_mcs_set(config.get_u16(CfgKey::VhtRxMcsMap)?);
    Ok(vht_op)
}

pub fn ds_params(channel: u8) -> DsParamSet {
    DsParamSet { current_channel: channel }
}

/// ERP information is only advertised on 2.4 GHz by BSSs that are not 11b only.
pub fn erp(session: &PeSession) -> Option<ErpInfo> {
    if session.is_5ghz() || session.dot11_mode.is_11b_only() {
        None
    } else {
        Some(ErpInfo::default())
    }
}

pub fn edca(session: &PeSession) -> EdcaParamSet {
    let [ac_be, ac_bk, ac_vi, ac_vo] = session.ac_params;
    EdcaParamSet { qos_info: 0, reserved: 0, ac_be, ac_bk, ac_vi, ac_vo }
}

pub fn wmm_param(session: &PeSession) -> WmmParam {
    let [ac_be, ac_bk, ac_vi, ac_vo] = session.ac_params;
    WmmParam { version: WMM_VERSION, qos_info: 0, reserved: 0, ac_be, ac_bk, ac_vi, ac_vo }
}

/// QoS info a station advertises: per-AC U-APSD flags and the max service period length.
pub fn sta_qos_info(config: &dyn ConfigProvider) -> Result<StaQosInfo, Error> {
    let mut qos_info = StaQosInfo::from_raw(config.get_u8(CfgKey::WmmUapsdMask)? & 0x0F);
    qos_info.set_max_sp_len(config.get_u8(CfgKey::MaxSpLength)?);
    Ok(qos_info)
}

pub fn wmm_info(config: &dyn ConfigProvider) -> Result<WmmInfo, Error> {
    Ok(WmmInfo { version: WMM_VERSION, qos_info: sta_qos_info(config)?.raw() })
}

pub fn wmm_caps() -> WmmCaps {
    WmmCaps { version: WMM_VERSION, caps: WmmCaps::QUEUE_REQUEST }
}

pub fn qos_cap(config: &dyn ConfigProvider) -> Result<QosCapability, Error> {
    Ok(QosCapability { qos_info: sta_qos_info(config)?.raw() })
}

pub fn power_cap(config: &dyn ConfigProvider) -> Result<PowerCapability, Error> {
    Ok(PowerCapability {
        min_tx_power: config.get_i8(CfgKey::MinTxPower)?,
        max_tx_power: config.get_i8(CfgKey::MaxTxPower)?,
    })
}

pub fn power_constraint(config: &dyn ConfigProvider) -> Result<PowerConstraint, Error> {
    Ok(PowerConstraint {
        local_power_constraint: config.get_u8(CfgKey::LocalPowerConstraint)?,
    })
}

/// Channels of the band the session operates in.
pub fn supported_channels(session: &PeSession) -> SupportedChannels {
    let range = |first_channel, num_channels| ChannelRange { first_channel, num_channels };
    if session.is_5ghz() {
        SupportedChannels(vec![range(36, 8), range(100, 11), range(149, 5)])
    } else {
        SupportedChannels(vec![range(1, 13)])
    }
}

pub fn rm_enabled_caps(config: &dyn ConfigProvider) -> Result<RmEnabledCapabilities, Error> {
    let mut rm_caps = RmEnabledCapabilities::default();
    let caps = config.get_str(CfgKey::RrmEnabledCaps)?;
    let n = caps.len().min(rm_caps.caps.len());
    rm_caps.caps[..n].copy_from_slice(&caps[..n]);
    Ok(rm_caps)
}

pub fn ccx_version() -> CcxVersion {
    CcxVersion { version: CCX_VERSION }
}

pub fn ccx_radio_mgmt() -> CcxRadioMgmtCap {
    CcxRadioMgmtCap { mgmt_state: 1, mbssid_mask: 0 }
}

/// Security elements found in a session's opaque security blob.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SecurityIes {
    pub rsne: Option<Rsne>,
    pub wpa: Option<WpaIe>,
    pub wapi: Option<WapiIe>,
}

/// Splits the session's security blob into its RSN, WPA and WAPI elements. Anything else in the
/// blob is ignored, as is everything past a malformed element.
pub fn security_ies(blob: &[u8]) -> SecurityIes {
    let mut ies = SecurityIes::default();
    for el in lenient_reader(blob) {
        if el.offer(&mut ies.rsne).is_none() && el.offer(&mut ies.wpa).is_none() {
            el.offer(&mut ies.wapi);
        }
    }
    ies
}
