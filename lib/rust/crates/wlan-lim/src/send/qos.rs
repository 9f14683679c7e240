// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Traffic stream setup and teardown.
//!
//! A traffic stream is negotiated either with 802.11e QoS action frames or with their WMM
//! counterparts. `wme_tspec_present` selects the WMM frames. Within an 802.11e ADDTS the
//! element family is picked by `lle_tspec_present`: the 802.11e TSPEC and TCLAS elements when
//! set, their WMM encapsulations otherwise. The two families never appear in one frame.

use {
    super::{action_tx, submit, MissingSessionPolicy, SendOutcome},
    crate::{context::LimContext, device::TxSink, error::Error, session::PeSession},
    log::warn,
    wlan_frame::{
        frame::{
            AddTsRequest, AddTsResponse, DelTs, WmmAddTsRequest, WmmAddTsResponse, WmmDelTs,
            MAX_TCLAS,
        },
        ie::{
            Schedule, Tclas, TclasProcessing, TsDelay, Tspec, WmmTclas, WmmTclasProcessing,
            WmmTspec, WMM_VERSION,
        },
        mac::{ActionCategory, MacAddr, ReasonCode, StatusCode},
    },
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddTsParams {
    pub dialog_token: u8,
    pub tspec: Tspec,
    pub tclas: Vec<Tclas>,
    pub tclas_processing: Option<u8>,
    pub wme_tspec_present: bool,
    pub lle_tspec_present: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddTsResponseParams {
    pub dialog_token: u8,
    pub status_code: StatusCode,
    pub tspec: Tspec,
    pub tclas: Vec<Tclas>,
    pub tclas_processing: Option<u8>,
    pub schedule: Option<Schedule>,
    /// TUs before a rejected request may be retried.
    pub ts_delay: Option<u32>,
    pub wme_tspec_present: bool,
    pub lle_tspec_present: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DelTsParams {
    pub tspec: Tspec,
    pub reason_code: ReasonCode,
    pub wme_tspec_present: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddTsRequestFrame {
    Qos(AddTsRequest),
    Wmm(WmmAddTsRequest),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddTsResponseFrame {
    Qos(AddTsResponse),
    Wmm(WmmAddTsResponse),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DelTsFrame {
    Qos(DelTs),
    Wmm(WmmDelTs),
}

fn wmm_tspec(tspec: Tspec) -> WmmTspec {
    WmmTspec { version: WMM_VERSION, tspec }
}

fn warn_dropped_tclas(tclas: &[Tclas], frame: &str) {
    if !tclas.is_empty() {
        warn!("{} TCLAS elements dropped; {} carries none", tclas.len(), frame);
    }
}

fn capped_tclas(tclas: &[Tclas]) -> &[Tclas] {
    if tclas.len() > MAX_TCLAS {
        warn!("{} TCLAS elements requested; sending the first {}", tclas.len(), MAX_TCLAS);
        &tclas[..MAX_TCLAS]
    } else {
        tclas
    }
}

pub fn build_addts_request(params: &AddTsParams) -> AddTsRequestFrame {
    if params.wme_tspec_present {
        warn_dropped_tclas(&params.tclas[..], "a WMM ADDTS request");
        return AddTsRequestFrame::Wmm(WmmAddTsRequest {
            dialog_token: params.dialog_token,
            status_code: 0,
            tspec: Some(wmm_tspec(params.tspec)),
        });
    }

    let tclas = capped_tclas(&params.tclas[..]);
    let mut frame = AddTsRequest { dialog_token: params.dialog_token, ..Default::default() };
    if params.lle_tspec_present {
        frame.tspec = Some(params.tspec);
        frame.tclas = tclas.to_vec();
        frame.tclas_processing =
            params.tclas_processing.map(|processing| TclasProcessing { processing });
    } else {
        frame.wmm_tspec = Some(wmm_tspec(params.tspec));
        frame.wmm_tclas = tclas
            .iter()
            .map(|tclas| WmmTclas { version: WMM_VERSION, tclas: tclas.clone() })
            .collect();
        frame.wmm_tclas_processing = params
            .tclas_processing
            .map(|processing| WmmTclasProcessing { version: WMM_VERSION, processing });
    }
    AddTsRequestFrame::Qos(frame)
}

pub fn build_addts_response(params: &AddTsResponseParams) -> AddTsResponseFrame {
    if params.wme_tspec_present {
        warn_dropped_tclas(&params.tclas[..], "a WMM ADDTS response");
        return AddTsResponseFrame::Wmm(WmmAddTsResponse {
            dialog_token: params.dialog_token,
            status_code: params.status_code.0 as u8,
            tspec: Some(wmm_tspec(params.tspec)),
        });
    }

    let mut frame = AddTsResponse {
        dialog_token: params.dialog_token,
        status_code: params.status_code,
        ts_delay: params.ts_delay.map(|delay| {
            let mut ts_delay = TsDelay::default();
            ts_delay.set_delay(delay);
            ts_delay
        }),
        schedule: params.schedule,
        ..Default::default()
    };
    if params.lle_tspec_present {
        frame.tspec = Some(params.tspec);
        frame.tclas = capped_tclas(&params.tclas[..]).to_vec();
        frame.tclas_processing =
            params.tclas_processing.map(|processing| TclasProcessing { processing });
    } else {
        warn_dropped_tclas(&params.tclas[..], "an ADDTS response with a WMM TSPEC");
        frame.wmm_tspec = Some(wmm_tspec(params.tspec));
    }
    AddTsResponseFrame::Qos(frame)
}

pub fn build_delts(params: &DelTsParams) -> DelTsFrame {
    if params.wme_tspec_present {
        DelTsFrame::Wmm(WmmDelTs {
            dialog_token: 0,
            status_code: 0,
            tspec: Some(wmm_tspec(params.tspec)),
        })
    } else {
        DelTsFrame::Qos(DelTs { ts_info: params.tspec.ts_info(), reason_code: params.reason_code })
    }
}

pub fn send_addts_request(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    params: &AddTsParams,
) -> Result<SendOutcome, Error> {
    let session =
        session_or_return!(session, MissingSessionPolicy::Drop, "addts request", Some(peer));
    match build_addts_request(params) {
        AddTsRequestFrame::Qos(frame) => {
            let tx = action_tx(ctx, session, peer, ActionCategory::QOS);
            submit(ctx, sink, &frame, &tx)
        }
        AddTsRequestFrame::Wmm(frame) => {
            let tx = action_tx(ctx, session, peer, ActionCategory::WMM);
            submit(ctx, sink, &frame, &tx)
        }
    }
}

pub fn send_addts_response(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    params: &AddTsResponseParams,
) -> Result<SendOutcome, Error> {
    let session =
        session_or_return!(session, MissingSessionPolicy::Drop, "addts response", Some(peer));
    match build_addts_response(params) {
        AddTsResponseFrame::Qos(frame) => {
            let tx = action_tx(ctx, session, peer, ActionCategory::QOS);
            submit(ctx, sink, &frame, &tx)
        }
        AddTsResponseFrame::Wmm(frame) => {
            let tx = action_tx(ctx, session, peer, ActionCategory::WMM);
            submit(ctx, sink, &frame, &tx)
        }
    }
}

pub fn send_delts(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    params: &DelTsParams,
) -> Result<SendOutcome, Error> {
    let session = session_or_return!(session, MissingSessionPolicy::Drop, "delts", Some(peer));
    match build_delts(params) {
        DelTsFrame::Qos(frame) => {
            let tx = action_tx(ctx, session, peer, ActionCategory::QOS);
            submit(ctx, sink, &frame, &tx)
        }
        DelTsFrame::Wmm(frame) => {
            let tx = action_tx(ctx, session, peer, ActionCategory::WMM);
            submit(ctx, sink, &frame, &tx)
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            capabilities::Features,
            test_utils::{
                capture_logs, captured_warnings, fake_context, fake_sta_session, FakeTxSink,
                PEER_ADDR,
            },
        },
        wlan_frame::{
            assert_variant,
            ie::FrameClassifier,
            mac::{MgmtSubtype, TsInfo},
            parser::{parse_mgmt_frame, ActionFrame, MgmtBody},
        },
    };

    fn tspec() -> Tspec {
        let mut tspec = Tspec::default();
        let mut ts_info = TsInfo::default();
        ts_info.set_tsid(3);
        ts_info.set_direction(1);
        ts_info.set_user_priority(5);
        tspec.set_ts_info(ts_info);
        tspec.set_nominal_msdu_size(200);
        tspec
    }

    fn tclas(tag: u16) -> Tclas {
        Tclas { user_priority: 5, classifier: FrameClassifier::Dot1q { mask: 1, tag } }
    }

    fn addts_params(tclas_count: u16) -> AddTsParams {
        AddTsParams {
            dialog_token: 9,
            tspec: tspec(),
            tclas: (0..tclas_count).map(tclas).collect(),
            tclas_processing: Some(0),
            ..Default::default()
        }
    }

    #[test]
    fn addts_request_11e_family() {
        let params = AddTsParams { lle_tspec_present: true, ..addts_params(3) };
        let frame = assert_variant!(build_addts_request(&params), AddTsRequestFrame::Qos(f) => f);
        assert_eq!(frame.tspec, Some(tspec()));
        assert_eq!(frame.tclas.len(), 3);
        assert_eq!(frame.tclas_processing, Some(TclasProcessing { processing: 0 }));
        assert!(frame.wmm_tclas.is_empty());
        assert_eq!(frame.wmm_tspec, None);
        assert_eq!(frame.wmm_tclas_processing, None);
    }

    #[test]
    fn addts_request_wmm_elements() {
        let frame = assert_variant!(
            build_addts_request(&addts_params(2)),
            AddTsRequestFrame::Qos(f) => f
        );
        assert_eq!(frame.tspec, None);
        assert!(frame.tclas.is_empty());
        assert_eq!(frame.wmm_tspec, Some(WmmTspec { version: 1, tspec: tspec() }));
        assert_eq!(frame.wmm_tclas.len(), 2);
        assert_eq!(frame.wmm_tclas[1], WmmTclas { version: 1, tclas: tclas(1) });
        assert_eq!(
            frame.wmm_tclas_processing,
            Some(WmmTclasProcessing { version: 1, processing: 0 })
        );
    }

    #[test]
    fn addts_request_wmm_frame() {
        let params = AddTsParams { wme_tspec_present: true, ..addts_params(1) };
        let frame = assert_variant!(build_addts_request(&params), AddTsRequestFrame::Wmm(f) => f);
        assert_eq!(frame.dialog_token, 9);
        assert_eq!(frame.tspec, Some(WmmTspec { version: 1, tspec: tspec() }));
    }

    #[test]
    fn addts_request_tclas_capped() {
        let params = AddTsParams { lle_tspec_present: true, ..addts_params(6) };
        let frame = assert_variant!(build_addts_request(&params), AddTsRequestFrame::Qos(f) => f);
        assert_eq!(frame.tclas.len(), MAX_TCLAS);
        assert_eq!(frame.tclas[3], tclas(3));
    }

    #[test]
    fn send_addts_request_on_air() {
        let mut ctx = fake_context(Features::empty());
        let mut sink = FakeTxSink::new();
        let session = fake_sta_session();
        let params = AddTsParams { lle_tspec_present: true, ..addts_params(3) };
        send_addts_request(&mut ctx, &mut sink, Some(&session), PEER_ADDR, &params)
            .expect("send addts request");

        let bytes = sink.last_frame();
        assert_eq!(&bytes[24..27], &[1, 0, 9]);
        let frame = parse_mgmt_frame(bytes).expect("parse addts request");
        let addts = assert_variant!(
            frame.body,
            MgmtBody::Action(ActionFrame::AddTsRequest(addts)) => addts
        );
        assert_eq!(addts.tclas.len(), 3);
        assert!(addts.wmm_tclas.is_empty());
        assert_eq!(ctx.tx_count(MgmtSubtype::ACTION), 1);
    }

    #[test]
    fn send_wmm_addts_request_on_air() {
        let mut ctx = fake_context(Features::empty());
        let mut sink = FakeTxSink::new();
        let session = fake_sta_session();
        let params = AddTsParams { wme_tspec_present: true, ..addts_params(0) };
        send_addts_request(&mut ctx, &mut sink, Some(&session), PEER_ADDR, &params)
            .expect("send addts request");

        #[rustfmt::skip]
        assert_eq!(&sink.last_frame()[24..34], &[
            17, 0, // WMM category, ADDTS request
            9, // dialog token
            0, // status code
            221, 61, 0x00, 0x50, 0xF2, 2, // WMM TSPEC element header
        ][..]);
        let frame = parse_mgmt_frame(sink.last_frame()).expect("parse wmm addts");
        assert_variant!(frame.body, MgmtBody::Action(ActionFrame::WmmAddTsRequest(_)));
    }

    #[test]
    fn addts_response_11e_family() {
        let params = AddTsResponseParams {
            dialog_token: 4,
            status_code: StatusCode::REJECTED_WITH_SUGGESTED_CHANGES,
            tspec: tspec(),
            tclas: vec![tclas(7)],
            ts_delay: Some(100),
            lle_tspec_present: true,
            ..Default::default()
        };
        let frame =
            assert_variant!(build_addts_response(&params), AddTsResponseFrame::Qos(f) => f);
        assert_eq!(frame.status_code, StatusCode::REJECTED_WITH_SUGGESTED_CHANGES);
        assert_eq!(frame.ts_delay.map(|d| d.delay()), Some(100));
        assert_eq!(frame.tspec, Some(tspec()));
        assert_eq!(frame.tclas, vec![tclas(7)]);
        assert_eq!(frame.wmm_tspec, None);

        let params = AddTsResponseParams { lle_tspec_present: false, ..params };
        let frame =
            assert_variant!(build_addts_response(&params), AddTsResponseFrame::Qos(f) => f);
        assert_eq!(frame.tspec, None);
        assert!(frame.tclas.is_empty());
        assert_eq!(frame.wmm_tspec, Some(WmmTspec { version: 1, tspec: tspec() }));
    }

    #[test]
    fn addts_response_warns_on_dropped_tclas() {
        capture_logs();
        let params = AddTsResponseParams {
            tspec: tspec(),
            tclas: vec![tclas(1), tclas(2)],
            ..Default::default()
        };
        let frame =
            assert_variant!(build_addts_response(&params), AddTsResponseFrame::Qos(f) => f);
        assert!(frame.tclas.is_empty());
        assert_eq!(
            captured_warnings(),
            vec!["2 TCLAS elements dropped; an ADDTS response with a WMM TSPEC carries none"]
        );

        let params = AddTsResponseParams { wme_tspec_present: true, ..params };
        build_addts_response(&params);
        assert_eq!(
            captured_warnings().last().map(String::as_str),
            Some("2 TCLAS elements dropped; a WMM ADDTS response carries none")
        );

        // Nothing to report without TCLAS.
        capture_logs();
        build_addts_response(&AddTsResponseParams { tspec: tspec(), ..Default::default() });
        assert!(captured_warnings().is_empty());
    }

    #[test]
    fn wmm_addts_response_status() {
        let params = AddTsResponseParams {
            dialog_token: 4,
            status_code: StatusCode::INVALID_PARAMETERS,
            wme_tspec_present: true,
            ..Default::default()
        };
        let frame =
            assert_variant!(build_addts_response(&params), AddTsResponseFrame::Wmm(f) => f);
        assert_eq!(frame.status_code, 38);
    }

    #[test]
    fn send_delts_on_air() {
        let mut ctx = fake_context(Features::empty());
        let mut sink = FakeTxSink::new();
        let session = fake_sta_session();
        let params = DelTsParams {
            tspec: tspec(),
            reason_code: ReasonCode::QOS_UNSPECIFIED,
            wme_tspec_present: false,
        };
        send_delts(&mut ctx, &mut sink, Some(&session), PEER_ADDR, &params).expect("send delts");

        #[rustfmt::skip]
        assert_eq!(&sink.last_frame()[24..], &[
            1, 2, // QoS category, DELTS
            0b0010_0110, 0b0010_1000, 0, // TS info
            32, 0, // reason code
        ][..]);
    }

    #[test]
    fn wmm_delts() {
        let params = DelTsParams { tspec: tspec(), wme_tspec_present: true, ..Default::default() };
        let frame = assert_variant!(build_delts(&params), DelTsFrame::Wmm(f) => f);
        assert_eq!(frame.dialog_token, 0);
        assert_eq!(frame.status_code, 0);
        assert_eq!(frame.tspec, Some(WmmTspec { version: 1, tspec: tspec() }));
    }
}
