// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{mgmt_tx_flags, pmf_active, submit, MissingSessionPolicy, SendOutcome},
    crate::{
        buffer::MgmtTx,
        capabilities::Features,
        context::LimContext,
        device::TxSink,
        error::Error,
        populate,
        session::PeSession,
    },
    wlan_frame::{
        frame::{Auth, Deauth, Disassoc},
        ie::{ChallengeText, FastBssTransition},
        mac::{AuthAlgorithmNumber, MacAddr, MgmtSubtype, ReasonCode, StatusCode},
    },
};

/// Shared key authentication frame carrying the encrypted challenge text.
const SHARED_KEY_CHALLENGE_RESPONSE_SEQ: u16 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthParams<'a> {
    pub algorithm: AuthAlgorithmNumber,
    pub transaction_seq: u16,
    pub status_code: StatusCode,
    pub challenge_text: Option<&'a [u8]>,
}

impl<'a> AuthParams<'a> {
    pub fn open(transaction_seq: u16) -> Self {
        Self {
            algorithm: AuthAlgorithmNumber::OPEN,
            transaction_seq,
            status_code: StatusCode::SUCCESS,
            challenge_text: None,
        }
    }

    pub fn shared_key(transaction_seq: u16, challenge_text: Option<&'a [u8]>) -> Self {
        Self {
            algorithm: AuthAlgorithmNumber::SHARED_KEY,
            transaction_seq,
            status_code: StatusCode::SUCCESS,
            challenge_text,
        }
    }

    pub fn fast_bss_transition(transaction_seq: u16) -> Self {
        Self {
            algorithm: AuthAlgorithmNumber::FAST_BSS_TRANSITION,
            transaction_seq,
            status_code: StatusCode::SUCCESS,
            challenge_text: None,
        }
    }

    pub fn status_code(self, status_code: StatusCode) -> Self {
        Self { status_code, ..self }
    }

    /// The third frame of a shared key exchange is sent encrypted.
    fn is_protected(&self) -> bool {
        self.algorithm == AuthAlgorithmNumber::SHARED_KEY
            && self.transaction_seq == SHARED_KEY_CHALLENGE_RESPONSE_SEQ
    }
}

/// Builds an authentication frame. Fast BSS transition frames also carry the session's RSNE,
/// mobility domain and FT elements.
pub fn build_auth(ctx: &LimContext, session: &PeSession, params: &AuthParams<'_>) -> Auth {
    let mut frame = Auth {
        algorithm: params.algorithm,
        transaction_seq: params.transaction_seq,
        status_code: params.status_code,
        challenge_text: params.challenge_text.map(|text| ChallengeText(text.to_vec())),
        ..Default::default()
    };
    if params.algorithm == AuthAlgorithmNumber::FAST_BSS_TRANSITION
        && ctx.features.contains(Features::DOT11R)
    {
        frame.rsne = populate::security_ies(&session.security_ies[..]).rsne;
        frame.mobility_domain = session.mobility_domain;
        frame.fte = session.fte.clone().map(FastBssTransition);
    }
    frame
}

pub fn send_auth(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    params: &AuthParams<'_>,
) -> Result<SendOutcome, Error> {
    let session = session_or_return!(session, MissingSessionPolicy::Drop, "auth", Some(peer));
    let frame = build_auth(ctx, session, params);
    let tx = MgmtTx::new(MgmtSubtype::AUTH, peer, session.self_addr)
        .bssid(session.bssid)
        .flags(mgmt_tx_flags(session))
        .protected(params.is_protected());
    submit(ctx, sink, &frame, &tx)
}

pub fn send_deauth(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    reason_code: ReasonCode,
) -> Result<SendOutcome, Error> {
    let session = session_or_return!(session, MissingSessionPolicy::Drop, "deauth", Some(peer));
    let tx = MgmtTx::new(MgmtSubtype::DEAUTH, peer, session.self_addr)
        .bssid(session.bssid)
        .flags(mgmt_tx_flags(session))
        .protected(pmf_active(ctx, session));
    submit(ctx, sink, &Deauth { reason_code }, &tx)
}

pub fn send_disassoc(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    reason_code: ReasonCode,
) -> Result<SendOutcome, Error> {
    let session =
        session_or_return!(session, MissingSessionPolicy::Drop, "disassoc", Some(peer));
    let tx = MgmtTx::new(MgmtSubtype::DISASSOC, peer, session.self_addr)
        .bssid(session.bssid)
        .flags(mgmt_tx_flags(session))
        .protected(pmf_active(ctx, session));
    submit(ctx, sink, &Disassoc { reason_code }, &tx)
}
