// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{action_tx, submit, MissingSessionPolicy, SendOutcome},
    crate::{context::LimContext, device::TxSink, error::Error, session::PeSession},
    log::warn,
    wlan_frame::{
        frame::{ChannelSwitch, SpectrumMeasurementReport, MAX_MEASUREMENT_REPORTS},
        ie::{
            ChannelSwitchAnnouncement, MeasurementReport, SecondaryChannelOffset,
            WideBandwidthChannelSwitch,
        },
        mac::{ActionCategory, MacAddr},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelSwitchParams {
    /// 1 if the receiver must stop transmitting until the switch.
    pub mode: u8,
    pub new_channel: u8,
    /// Beacon intervals until the switch.
    pub count: u8,
    pub secondary_channel_offset: Option<u8>,
    pub wide_bandwidth: Option<WideBandwidthChannelSwitch>,
}

pub(super) fn capped_reports(mut reports: Vec<MeasurementReport>) -> Vec<MeasurementReport> {
    if reports.len() > MAX_MEASUREMENT_REPORTS {
        warn!(
            "{} measurement reports; sending the first {}",
            reports.len(),
            MAX_MEASUREMENT_REPORTS
        );
        reports.truncate(MAX_MEASUREMENT_REPORTS);
    }
    reports
}

pub fn build_channel_switch(params: &ChannelSwitchParams) -> ChannelSwitch {
    ChannelSwitch {
        csa: ChannelSwitchAnnouncement {
            mode: params.mode,
            new_channel: params.new_channel,
            count: params.count,
        },
        secondary_channel_offset: params
            .secondary_channel_offset
            .map(|offset| SecondaryChannelOffset { offset }),
        wide_bandwidth: params.wide_bandwidth,
    }
}

pub fn send_spectrum_measurement_report(
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
        "spectrum measurement report",
        Some(peer)
    );
    let frame = SpectrumMeasurementReport { dialog_token, reports: capped_reports(reports) };
    let tx = action_tx(ctx, session, peer, ActionCategory::SPECTRUM_MGMT);
    submit(ctx, sink, &frame, &tx)
}

/// Announces a channel switch to `peer`, which may be the broadcast address.
pub fn send_channel_switch(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    params: &ChannelSwitchParams,
) -> Result<SendOutcome, Error> {
    let session =
        session_or_return!(session, MissingSessionPolicy::Error, "channel switch", Some(peer));
    let tx = action_tx(ctx, session, peer, ActionCategory::SPECTRUM_MGMT);
    submit(ctx, sink, &build_channel_switch(params), &tx)
}
