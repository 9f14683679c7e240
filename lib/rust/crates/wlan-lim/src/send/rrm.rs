// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Radio resource management (802.11k) action frames.

use {
    super::{action_tx, spectrum::capped_reports, submit, MissingSessionPolicy, SendOutcome},
    crate::{context::LimContext, device::TxSink, error::Error, session::PeSession},
    wlan_frame::{
        frame::{LinkMeasurementReport, NeighborReportRequest, RadioMeasurementReport},
        ie::{MeasurementReport, Ssid, TpcReport},
        mac::{ActionCategory, MacAddr},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkMeasurementParams {
    /// Token of the link measurement request being answered.
    pub dialog_token: u8,
    /// dBm.
    pub tx_power: i8,
    /// dB.
    pub link_margin: i8,
    pub rx_antenna_id: u8,
    pub tx_antenna_id: u8,
    pub rcpi: u8,
    pub rsni: u8,
}

pub fn send_radio_measurement_report(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    dialog_token: u8,
    reports: Vec<MeasurementReport>,
) -> Result<SendOutcome, Error> {
    let session = session_or_return!(
        session,
        MissingSessionPolicy::Error,
        "radio measurement report",
        Some(peer)
    );
    let frame = RadioMeasurementReport { dialog_token, reports: capped_reports(reports) };
    let tx = action_tx(ctx, session, peer, ActionCategory::RADIO_MEASUREMENT);
    submit(ctx, sink, &frame, &tx)
}

pub fn send_link_measurement_report(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    params: &LinkMeasurementParams,
) -> Result<SendOutcome, Error> {
    let session = session_or_return!(
        session,
        MissingSessionPolicy::Error,
        "link measurement report",
        Some(peer)
    );
    let frame = LinkMeasurementReport {
        dialog_token: params.dialog_token,
        tpc_report: TpcReport { tx_power: params.tx_power, link_margin: params.link_margin },
        rx_antenna_id: params.rx_antenna_id,
        tx_antenna_id: params.tx_antenna_id,
        rcpi: params.rcpi,
        rsni: params.rsni,
    };
    let tx = action_tx(ctx, session, peer, ActionCategory::RADIO_MEASUREMENT);
    submit(ctx, sink, &frame, &tx)
}

/// Asks the AP at `bssid` for its neighbor report, optionally for the ESS named `ssid`.
pub fn send_neighbor_report_request(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    bssid: MacAddr,
    ssid: Option<&[u8]>,
) -> Result<SendOutcome, Error> {
    let session = session_or_return!(
        session,
        MissingSessionPolicy::Error,
        "neighbor report request",
        Some(bssid)
    );
    let frame = NeighborReportRequest {
        dialog_token: ctx.next_dialog_token(),
        ssid: ssid.map(|ssid| Ssid(ssid.to_vec())),
    };
    let tx = action_tx(ctx, session, bssid, ActionCategory::RADIO_MEASUREMENT);
    submit(ctx, sink, &frame, &tx)
}
