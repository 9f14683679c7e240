// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! (Re)association request and response builders.

use {
    super::{mgmt_tx_flags, submit, submit_and_inspect, MissingSessionPolicy, SendOutcome},
    crate::{
        additional_ie,
        buffer::MgmtTx,
        capabilities::Features,
        context::LimContext,
        device::TxSink,
        error::Error,
        populate,
        session::{PeSession, PeerSta},
    },
    log::{debug, warn},
    wlan_frame::{
        frame::{AssocRequest, AssocRequestElements, AssocResponse, FrameBody, ReassocRequest},
        ie::{FastBssTransition, RatesWriter, Ssid, TimeoutInterval},
        mac::{MacAddr, MgmtSubtype, StatusCode, AID_MASK},
    },
};

/// Time in TUs a temporarily rejected station waits before associating again.
pub const ASSOC_COMEBACK_TUS: u32 = 1000;

fn assoc_request_elements(
    ctx: &LimContext,
    session: &PeSession,
    additional_ies: &[u8],
    reassoc: bool,
) -> Result<AssocRequestElements, Error> {
    let config = &*ctx.config;
    let features = ctx.features;
    let rates = RatesWriter::try_new(&session.rates[..])?;
    let mut elements = AssocRequestElements {
        ssid: Some(Ssid(session.ssid.clone())),
        supported_rates: Some(rates.supported_rates()),
        ext_supported_rates: rates.ext_supported_rates(),
        ..Default::default()
    };

    let spectrum_mgmt = features.contains(Features::DOT11H) && session.spectrum_mgmt;
    let rrm = features.contains(Features::DOT11K) && session.rm_enabled;
    if spectrum_mgmt || rrm {
        elements.power_cap = Some(populate::power_cap(config)?);
    }
    if spectrum_mgmt {
        elements.supported_channels = Some(populate::supported_channels(session));
    }
    if session.qos.lle_enabled && !session.bss.ani_11e_qos {
        elements.qos_cap = Some(populate::qos_cap(config)?);
    }

    // WPS association carries no security elements of its own.
    if additional_ie::has_wsc(additional_ies) {
        debug!("session {}: WSC association, not adding RSN, WPA or WAPI", session.session_id);
    } else {
        let security = populate::security_ies(&session.security_ies[..]);
        elements.rsne = security.rsne;
        elements.wpa = security.wpa;
        if features.contains(Features::WAPI) {
            elements.wapi = security.wapi;
        }
    }

    if rrm {
        elements.rm_enabled_caps = Some(populate::rm_enabled_caps(config)?);
    }
    if session.qos.wme_enabled {
        elements.wmm_info = Some(populate::wmm_info(config)?);
    }
    if session.qos.wsm_enabled {
        elements.wmm_caps = Some(populate::wmm_caps());
    }
    if session.ht_enabled && session.bss.ht_cap {
        elements.ht_cap = Some(populate::ht_caps(config)?);
    }
    if session.vht_enabled && session.bss.vht_cap && features.contains(Features::DOT11AC) {
        elements.vht_cap = Some(populate::vht_caps(config)?);
    }
    if features.contains(Features::DOT11R) {
        elements.mobility_domain = session.mobility_domain;
        if reassoc {
            elements.fte = session.fte.clone().map(FastBssTransition);
        }
    }
    if features.contains(Features::CCX) && session.ccx_enabled {
        elements.ccx_version = Some(populate::ccx_version());
        elements.ccx_radio_mgmt = Some(populate::ccx_radio_mgmt());
    }
    Ok(elements)
}

pub fn build_assoc_request(
    ctx: &LimContext,
    session: &PeSession,
    additional_ies: &[u8],
) -> Result<AssocRequest, Error> {
    Ok(AssocRequest {
        capabilities: session.capabilities,
        listen_interval: session.listen_interval,
        elements: assoc_request_elements(ctx, session, additional_ies, false)?,
    })
}

pub fn build_reassoc_request(
    ctx: &LimContext,
    session: &PeSession,
    current_ap: MacAddr,
    additional_ies: &[u8],
) -> Result<ReassocRequest, Error> {
    Ok(ReassocRequest {
        capabilities: session.capabilities,
        listen_interval: session.listen_interval,
        current_ap,
        elements: assoc_request_elements(ctx, session, additional_ies, true)?,
    })
}

/// Sends a (re)association request and keeps its body on the session. If no buffer could be
/// allocated, the session returns to the MLM state it was in before the request.
fn send_request<F: FrameBody>(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: &mut PeSession,
    frame: &F,
    tx: &MgmtTx<'_>,
) -> Result<SendOutcome, Error> {
    let result = submit_and_inspect(ctx, sink, frame, tx, |body| session.store_assoc_req(body));
    if let Err(Error::NoResources(_)) = &result {
        warn!("session {}: no buffer for {}", session.session_id, F::NAME);
        session.restore_prev_mlm_state();
    }
    result
}

pub fn send_assoc_request(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&mut PeSession>,
    additional_ies: &[u8],
) -> Result<SendOutcome, Error> {
    let session = session_or_return!(session, MissingSessionPolicy::Drop, "assoc request", None);
    let frame = build_assoc_request(ctx, session, additional_ies)?;
    let tx = MgmtTx::new(MgmtSubtype::ASSOC_REQ, session.bssid, session.self_addr)
        .flags(mgmt_tx_flags(session))
        .additional_ies(additional_ies);
    send_request(ctx, sink, session, &frame, &tx)
}

/// Reassociates with the BSS of `session`, coming from `current_ap`.
pub fn send_reassoc_request(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&mut PeSession>,
    current_ap: MacAddr,
    additional_ies: &[u8],
) -> Result<SendOutcome, Error> {
    let session =
        session_or_return!(session, MissingSessionPolicy::Drop, "reassoc request", None);
    let frame = build_reassoc_request(ctx, session, current_ap, additional_ies)?;
    let tx = MgmtTx::new(MgmtSubtype::REASSOC_REQ, session.bssid, session.self_addr)
        .flags(mgmt_tx_flags(session))
        .additional_ies(additional_ies);
    send_request(ctx, sink, session, &frame, &tx)
}

/// Outcome of an association request, decided by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssocResponseParams {
    pub peer_addr: MacAddr,
    pub status_code: StatusCode,
    /// Association ID without the two most significant bits.
    pub aid: u16,
}

impl AssocResponseParams {
    pub fn accept(peer_addr: MacAddr, aid: u16) -> Self {
        Self { peer_addr, status_code: StatusCode::SUCCESS, aid }
    }

    pub fn reject(peer_addr: MacAddr, status_code: StatusCode) -> Self {
        Self { peer_addr, status_code, aid: 0 }
    }
}

/// Builds an association response for any role that answers association requests.
///
/// QoS elements depend on what the peer asked for: EDCA parameters for an 802.11e peer that is
/// not running the vendor QoS extension, WMM parameters for a WMM peer that is not an 802.11e
/// peer. Never both.
pub fn build_assoc_response(
    ctx: &LimContext,
    session: &PeSession,
    peer: Option<&PeerSta>,
    params: &AssocResponseParams,
) -> Result<AssocResponse, Error> {
    let config = &*ctx.config;
    let rates = RatesWriter::try_new(&session.rates[..])?;
    let mut frame = AssocResponse {
        capabilities: session.capabilities,
        status_code: params.status_code,
        aid: params.aid | AID_MASK,
        supported_rates: Some(rates.supported_rates()),
        ext_supported_rates: rates.ext_supported_rates(),
        ..Default::default()
    };

    if let Some(peer) = peer {
        if peer.lle_enabled && !peer.ani_peer {
            frame.edca = Some(populate::edca(session));
        } else if !peer.lle_enabled && session.qos.wme_enabled && peer.wme_enabled {
            frame.wmm_param = Some(populate::wmm_param(session));
        }
        if peer.wsm_enabled {
            frame.wmm_caps = Some(populate::wmm_caps());
        }
        if session.ht_enabled && peer.ht_capable {
            frame.ht_cap = Some(populate::ht_caps(config)?);
            frame.ht_op = Some(populate::ht_operation(session));
        }
        if session.vht_enabled && peer.vht_capable && ctx.features.contains(Features::DOT11AC) {
            frame.vht_cap = Some(populate::vht_caps(config)?);
            frame.vht_op = Some(populate::vht_operation(config)?);
        }
    }
    if ctx.features.contains(Features::DOT11K) && session.rm_enabled {
        frame.rm_enabled_caps = Some(populate::rm_enabled_caps(config)?);
    }
    if params.status_code == StatusCode::REJECTED_TEMPORARILY {
        let mut timeout = TimeoutInterval {
            interval_type: TimeoutInterval::ASSOCIATION_COMEBACK,
            ..Default::default()
        };
        timeout.set_value(ASSOC_COMEBACK_TUS);
        frame.timeout_interval = Some(timeout);
    }
    Ok(frame)
}

/// Answers an association or, if `reassoc` is set, a reassociation request. Sessions of an
/// access point also append the configured association response elements.
pub fn send_assoc_response(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: Option<&PeerSta>,
    params: &AssocResponseParams,
    reassoc: bool,
) -> Result<SendOutcome, Error> {
    let session = session_or_return!(
        session,
        MissingSessionPolicy::Drop,
        "assoc response",
        Some(params.peer_addr)
    );
    let frame = build_assoc_response(ctx, session, peer, params)?;
    let additional_ies = if session.role.is_ap() {
        additional_ie::assoc_resp_additional_ies(&*ctx.config)?
    } else {
        vec![]
    };
    let subtype = if reassoc { MgmtSubtype::REASSOC_RESP } else { MgmtSubtype::ASSOC_RESP };
    let tx = MgmtTx::new(subtype, params.peer_addr, session.self_addr)
        .bssid(session.bssid)
        .flags(mgmt_tx_flags(session))
        .additional_ies(&additional_ies[..]);
    submit(ctx, sink, &frame, &tx)
}
