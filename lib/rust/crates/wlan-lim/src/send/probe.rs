// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{mgmt_tx_flags, submit, MissingSessionPolicy, SendOutcome},
    crate::{
        additional_ie,
        buffer::MgmtTx,
        capabilities::{Dot11Mode, Features, Role},
        config::CfgKey,
        context::LimContext,
        device::{TxFlags, TxSink},
        error::Error,
        populate, rates,
        session::PeSession,
    },
    log::debug,
    wlan_frame::{
        frame::{ProbeRequest, ProbeResponse},
        ie::{p2p::NoticeOfAbsence, wsc, RatesWriter, Ssid},
        mac::{self, MacAddr, MgmtSubtype},
    },
};

/// What a scan asks to probe for.
#[derive(Clone, Copy, Debug)]
pub struct ProbeRequestParams<'a> {
    pub ssid: &'a [u8],
    /// Receiver of the probe. Broadcast unless a single BSS is probed.
    pub bssid: MacAddr,
    pub channel: u8,
    pub dot11_mode: Dot11Mode,
    /// Raw elements from the upper layer, such as a P2P or WSC element.
    pub additional_ies: &'a [u8],
}

impl<'a> ProbeRequestParams<'a> {
    pub fn new(ssid: &'a [u8], channel: u8, dot11_mode: Dot11Mode) -> Self {
        Self { ssid, bssid: mac::BCAST_ADDR, channel, dot11_mode, additional_ies: &[] }
    }

    pub fn bssid(self, bssid: MacAddr) -> Self {
        Self { bssid, ..self }
    }

    pub fn additional_ies(self, additional_ies: &'a [u8]) -> Self {
        Self { additional_ies, ..self }
    }
}

/// Builds a probe request and the transmit flags it is sent with.
///
/// Scans run with or without a session. HT capability is taken from the session if there is
/// one and from the device otherwise, never from both.
pub fn build_probe_request(
    ctx: &LimContext,
    params: &ProbeRequestParams<'_>,
    session: Option<&PeSession>,
) -> Result<(ProbeRequest, TxFlags), Error> {
    let config = &*ctx.config;
    let p2p = additional_ie::has_p2p(params.additional_ies);
    let rates = rates::probe_request_rates(config, params.channel, params.dot11_mode, p2p)?;
    let mut frame = ProbeRequest {
        ssid: Some(Ssid(params.ssid.to_vec())),
        supported_rates: Some(rates.supported),
        ext_supported_rates: rates.extended,
        ..Default::default()
    };

    if ctx.features.contains(Features::DOT11K) {
        frame.ds_params = Some(populate::ds_params(params.channel));
    }
    let ht_enabled = match session {
        Some(session) => session.ht_enabled,
        None => ctx.ht_capable,
    };
    if ht_enabled && params.dot11_mode.supports_ht() {
        frame.ht_cap = Some(populate::ht_caps(config)?);
    }
    if params.dot11_mode.supports_vht() && ctx.features.contains(Features::DOT11AC) {
        frame.vht_cap = Some(populate::vht_caps(config)?);
    }

    let flags = if mac::is_5ghz_channel(params.channel) || ctx.p2p_search_active {
        TxFlags::USE_RATE2
    } else {
        TxFlags::NONE
    };
    Ok((frame, flags))
}

pub fn send_probe_request(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    params: &ProbeRequestParams<'_>,
    session: Option<&PeSession>,
) -> Result<SendOutcome, Error> {
    let (frame, flags) = build_probe_request(ctx, params, session)?;
    let sa = session.map_or(ctx.self_addr, |session| session.self_addr);
    let tx = MgmtTx::new(MgmtSubtype::PROBE_REQ, params.bssid, sa)
        .flags(flags)
        .additional_ies(params.additional_ies);
    submit(ctx, sink, &frame, &tx)
}

/// Builds the probe response of a BSS started by `session`. `additional_ies` are the elements
/// that will follow the body; a WSC element among them replaces the one built from
/// configuration.
pub fn build_probe_response(
    ctx: &LimContext,
    session: &PeSession,
    additional_ies: &[u8],
) -> Result<ProbeResponse, Error> {
    let config = &*ctx.config;
    let features = ctx.features;
    let rates = RatesWriter::try_new(&session.rates[..])?;
    let security = populate::security_ies(&session.security_ies[..]);
    let mut frame = ProbeResponse {
        beacon_interval: config.get_u16(CfgKey::BeaconInterval)?,
        capabilities: session.capabilities,
        ssid: Some(Ssid(session.ssid.clone())),
        supported_rates: Some(rates.supported_rates()),
        ext_supported_rates: rates.ext_supported_rates(),
        ds_params: Some(populate::ds_params(session.channel)),
        erp: populate::erp(session),
        rsne: security.rsne,
        wpa: security.wpa,
        ..Default::default()
    };

    if features.contains(Features::DOT11H) && session.spectrum_mgmt {
        frame.power_constraint = Some(populate::power_constraint(config)?);
    }
    if session.ht_enabled {
        frame.ht_cap = Some(populate::ht_caps(config)?);
        frame.ht_op = Some(populate::ht_operation(session));
    }
    if session.vht_enabled && features.contains(Features::DOT11AC) {
        frame.vht_cap = Some(populate::vht_caps(config)?);
        frame.vht_op = Some(populate::vht_operation(config)?);
    }
    if features.contains(Features::WAPI) {
        frame.wapi = security.wapi;
    }

    if session.qos.lle_enabled {
        frame.edca = Some(populate::edca(session));
    } else if session.qos.wme_enabled {
        frame.wmm_param = Some(populate::wmm_param(session));
    }
    if session.qos.wsm_enabled {
        frame.wmm_caps = Some(populate::wmm_caps());
    }
    if features.contains(Features::DOT11K) && session.rm_enabled {
        frame.rm_enabled_caps = Some(populate::rm_enabled_caps(config)?);
    }
    if features.contains(Features::DOT11R) {
        frame.mobility_domain = session.mobility_domain;
    }

    if config.get_int(CfgKey::WpsEnable)? != 0 {
        if additional_ie::has_wsc(additional_ies) {
            debug!("WSC element supplied by configuration; not building one");
        } else {
            let wps_state = config.get_u8(CfgKey::WpsState)?;
            frame.wsc = Some(wsc::probe_resp_wsc_ie(wps_state, false));
        }
    }
    Ok(frame)
}

/// Answers a probe request from `peer`. A P2P group owner appends its Notice of Absence when the
/// probe request carried a P2P element.
pub fn send_probe_response(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    probe_req_has_p2p: bool,
    noa: Option<&NoticeOfAbsence>,
) -> Result<SendOutcome, Error> {
    let session =
        session_or_return!(session, MissingSessionPolicy::Drop, "probe response", Some(peer));
    let additional_ies =
        additional_ie::probe_resp_additional_ies(&*ctx.config, probe_req_has_p2p)?;
    let frame = build_probe_response(ctx, session, &additional_ies[..])?;
    let noa_ie = match noa {
        Some(noa) if session.role == Role::P2pGo && probe_req_has_p2p => {
            additional_ie::noa_ie(noa)?
        }
        _ => vec![],
    };
    let tx = MgmtTx::new(MgmtSubtype::PROBE_RESP, peer, session.self_addr)
        .bssid(session.bssid)
        .flags(mgmt_tx_flags(session))
        .additional_ies(&additional_ies[..])
        .trailer(&noa_ie[..]);
    submit(ctx, sink, &frame, &tx)
}
