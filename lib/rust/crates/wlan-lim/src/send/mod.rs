// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Frame descriptor builders and the `send_*` entry points of the MLME.
//!
//! Each `build_*` function populates one frame descriptor from its parameters, the session and
//! the driver context. The matching `send_*` function hands the descriptor to the transmit
//! buffer manager. Sessions are looked up by the caller; what a `send_*` function does without
//! one is given by its `MissingSessionPolicy`.

/// Unwraps a session or returns from the enclosing `send_*` function as its policy demands.
macro_rules! session_or_return {
    ($session:expr, $policy:expr, $frame:expr, $peer:expr) => {
        match $session {
            Some(session) => session,
            None => return $crate::send::no_session($frame, $policy, $peer),
        }
    };
}

mod assoc;
mod auth;
mod block_ack;
mod probe;
mod qos;
mod rrm;
mod sa_query;
mod spectrum;

pub use {
    assoc::*, auth::*, block_ack::*, probe::*, qos::*, rrm::*, sa_query::*, spectrum::*,
};

use {
    crate::{
        buffer::{self, MgmtTx},
        capabilities::Features,
        context::LimContext,
        device::{TxFlags, TxSink},
        error::Error,
        session::PeSession,
    },
    log::{debug, error},
    wlan_frame::{
        frame::FrameBody,
        mac::{ActionCategory, MacAddr, MgmtSubtype},
    },
};

/// Result of a send request that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// The frame was handed to the transmit sink. `len` includes the MAC header.
    Submitted { len: usize },
    /// The frame was not sent, and the caller is not expected to act on it.
    Dropped,
}

/// What a `send_*` function does when called without a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingSessionPolicy {
    /// Return `SendOutcome::Dropped`.
    Drop,
    /// Return `Error::MissingSession`.
    Error,
    /// The frame is built without session state.
    Optional,
}

/// `peer` is the addressee of the frame, if known without a session. Frames whose policy is
/// `Error` always know it.
pub(crate) fn no_session(
    frame: &'static str,
    policy: MissingSessionPolicy,
    peer: Option<MacAddr>,
) -> Result<SendOutcome, Error> {
    match (policy, peer) {
        (MissingSessionPolicy::Error, Some(peer)) => {
            error!("{}: no session for {:02x?}", frame, peer);
            Err(Error::MissingSession(peer))
        }
        _ => {
            debug!("{}: no session, not sending", frame);
            Ok(SendOutcome::Dropped)
        }
    }
}

/// Sends `frame` and counts it on the context.
pub(crate) fn submit<F: FrameBody>(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    frame: &F,
    tx: &MgmtTx<'_>,
) -> Result<SendOutcome, Error> {
    submit_and_inspect(ctx, sink, frame, tx, |_| ())
}

/// Like `submit`, handing the packed body to `inspect` before it is transmitted.
pub(crate) fn submit_and_inspect<F: FrameBody, I: FnOnce(&[u8])>(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    frame: &F,
    tx: &MgmtTx<'_>,
    inspect: I,
) -> Result<SendOutcome, Error> {
    let len = buffer::send_frame(sink, frame, tx, inspect)?;
    ctx.record_tx(tx.subtype);
    Ok(SendOutcome::Submitted { len })
}

/// Management frames of sessions on 5 GHz, and of P2P sessions, never use 11b rates.
pub fn mgmt_tx_flags(session: &PeSession) -> TxFlags {
    if session.is_5ghz() || session.role.is_p2p() {
        TxFlags::USE_RATE2
    } else {
        TxFlags::NONE
    }
}

/// Whether robust management frames of `session` are sent protected.
pub fn pmf_active(ctx: &LimContext, session: &PeSession) -> bool {
    session.pmf_enabled && ctx.features.contains(Features::DOT11W)
}

/// Addressing of an action frame sent by `session` to `peer`.
pub(crate) fn action_tx(
    ctx: &LimContext,
    session: &PeSession,
    peer: MacAddr,
    category: ActionCategory,
) -> MgmtTx<'static> {
    MgmtTx::new(MgmtSubtype::ACTION, peer, session.self_addr)
        .bssid(session.bssid)
        .flags(mgmt_tx_flags(session))
        .protected(category.is_robust() && pmf_active(ctx, session))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            capabilities::{Dot11Mode, Role},
            test_utils::{fake_context, fake_sta_session, FakeTxSink, PEER_ADDR},
        },
        wlan_frame::{
            assert_variant,
            ie::MeasurementReport,
            mac::{ReasonCode, StatusCode},
        },
    };

    #[test]
    fn tx_flags_by_band_and_persona() {
        let mut session = fake_sta_session();
        assert_eq!(mgmt_tx_flags(&session), TxFlags::NONE);
        session.channel = 36;
        assert_eq!(mgmt_tx_flags(&session), TxFlags::USE_RATE2);
        session.channel = 6;
        session.role = Role::P2pClient;
        assert_eq!(mgmt_tx_flags(&session), TxFlags::USE_RATE2);
    }

    #[test]
    fn robust_action_protection() {
        let mut ctx = fake_context(Features::DOT11W);
        let mut session = fake_sta_session();
        let tx = action_tx(&ctx, &session, PEER_ADDR, ActionCategory::BLOCK_ACK);
        assert!(!tx.protected);
        session.pmf_enabled = true;
        assert!(action_tx(&ctx, &session, PEER_ADDR, ActionCategory::BLOCK_ACK).protected);
        assert!(!action_tx(&ctx, &session, PEER_ADDR, ActionCategory::PUBLIC).protected);
        ctx.features = Features::empty();
        assert!(!action_tx(&ctx, &session, PEER_ADDR, ActionCategory::SA_QUERY).protected);
    }

    #[test]
    fn missing_session_drops_silently() {
        let mut ctx = fake_context(Features::all());
        let mut sink = FakeTxSink::new();
        let dropped = vec![
            send_probe_response(&mut ctx, &mut sink, None, PEER_ADDR, false, None),
            send_assoc_request(&mut ctx, &mut sink, None, &[]),
            send_reassoc_request(&mut ctx, &mut sink, None, PEER_ADDR, &[]),
            send_assoc_response(
                &mut ctx,
                &mut sink,
                None,
                None,
                &AssocResponseParams::accept(PEER_ADDR, 1),
                false,
            ),
            send_auth(&mut ctx, &mut sink, None, PEER_ADDR, &AuthParams::open(1)),
            send_deauth(&mut ctx, &mut sink, None, PEER_ADDR, ReasonCode::LEAVING_NETWORK_DEAUTH),
            send_disassoc(
                &mut ctx,
                &mut sink,
                None,
                PEER_ADDR,
                ReasonCode::LEAVING_NETWORK_DISASSOC,
            ),
            send_addts_request(&mut ctx, &mut sink, None, PEER_ADDR, &AddTsParams::default()),
            send_addts_response(
                &mut ctx,
                &mut sink,
                None,
                PEER_ADDR,
                &AddTsResponseParams::default(),
            ),
            send_delts(&mut ctx, &mut sink, None, PEER_ADDR, &DelTsParams::default()),
        ];
        for outcome in dropped {
            assert_variant!(outcome, Ok(SendOutcome::Dropped));
        }
        assert!(sink.allocs.is_empty());
    }

    #[test]
    fn missing_session_is_an_error() {
        let mut ctx = fake_context(Features::all());
        let mut sink = FakeTxSink::new();
        let report = MeasurementReport { token: 1, mode: 0, measurement_type: 0, report: vec![] };
        let errors = vec![
            send_addba_request(&mut ctx, &mut sink, None, PEER_ADDR, &AddBaParams::default()),
            send_addba_response(
                &mut ctx,
                &mut sink,
                None,
                PEER_ADDR,
                1,
                StatusCode::SUCCESS,
                &AddBaParams::default(),
            ),
            send_delba(&mut ctx, &mut sink, None, PEER_ADDR, 0, true, ReasonCode::END_TS_BA_DLS),
            send_spectrum_measurement_report(
                &mut ctx,
                &mut sink,
                None,
                PEER_ADDR,
                1,
                vec![report.clone()],
            ),
            send_channel_switch(
                &mut ctx,
                &mut sink,
                None,
                PEER_ADDR,
                &ChannelSwitchParams::default(),
            ),
            send_radio_measurement_report(&mut ctx, &mut sink, None, PEER_ADDR, 1, vec![report]),
            send_link_measurement_report(
                &mut ctx,
                &mut sink,
                None,
                PEER_ADDR,
                &LinkMeasurementParams::default(),
            ),
            send_neighbor_report_request(&mut ctx, &mut sink, None, PEER_ADDR, None),
            send_sa_query_request(&mut ctx, &mut sink, None, PEER_ADDR, [1, 2]),
            send_sa_query_response(&mut ctx, &mut sink, None, PEER_ADDR, [1, 2]),
        ];
        for outcome in errors {
            assert_variant!(outcome, Err(Error::MissingSession(_)));
        }
        assert!(sink.allocs.is_empty());
    }

    #[test]
    fn probe_request_session_is_optional() {
        let mut ctx = fake_context(Features::empty());
        let mut sink = FakeTxSink::new();
        let outcome = send_probe_request(
            &mut ctx,
            &mut sink,
            &ProbeRequestParams::new(b"test", 1, Dot11Mode::All),
            None,
        );
        assert_variant!(outcome, Ok(SendOutcome::Submitted { .. }));
        assert_eq!(ctx.tx_count(MgmtSubtype::PROBE_REQ), 1);
    }
}
