// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{
        expect_action, fixed_field, read_fixed_element, write_action, ElementWriter, FrameBody,
    },
    crate::{
        appendable::Appendable,
        buffer_reader::BufferReader,
        error::{FrameParseError, FrameWriteError},
        ie::*,
        mac::{ActionCategory, SpectrumMgmtAction},
    },
};

/// Largest number of measurement report elements sent in one action frame.
pub const MAX_MEASUREMENT_REPORTS: usize = 4;

// IEEE Std 802.11-2016, 9.6.2.3
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SpectrumMeasurementReport {
    pub dialog_token: u8,
    pub reports: Vec<MeasurementReport>,
}

impl FrameBody for SpectrumMeasurementReport {
    const NAME: &'static str = "SpectrumMeasurementReport";
    const FIXED_LEN: usize = 3;

    fn max_len() -> usize {
        Self::FIXED_LEN + MAX_MEASUREMENT_REPORTS * max_element_len::<MeasurementReport>()
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        write_action(
            w,
            ActionCategory::SPECTRUM_MGMT,
            SpectrumMgmtAction::MEASUREMENT_REPORT.0,
        )?;
        w.append_byte(self.dialog_token)?;
        Ok(())
    }

    fn write_elements<A: Appendable>(
        &self,
        w: &mut ElementWriter<'_, A>,
    ) -> Result<(), FrameWriteError> {
        w.write_all(&self.reports[..], MAX_MEASUREMENT_REPORTS)
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        expect_action(r, ActionCategory::SPECTRUM_MGMT, SpectrumMgmtAction::MEASUREMENT_REPORT.0)?;
        let dialog_token = r.read_byte().ok_or_else(fixed_field("dialog token"))?;
        Ok(Self { dialog_token, reports: vec![] })
    }

    fn accept_element(&mut self, el: &RawElement<'_>) -> Disposition {
        offer_element!(el, self.reports)
    }
}

/// Channel switch announcement action frame sent by an AP ahead of a channel change.
// IEEE Std 802.11-2016, 9.6.2.6
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ChannelSwitch {
    pub csa: ChannelSwitchAnnouncement,
    pub secondary_channel_offset: Option<SecondaryChannelOffset>,
    pub wide_bandwidth: Option<WideBandwidthChannelSwitch>,
}

impl FrameBody for ChannelSwitch {
    const NAME: &'static str = "ChannelSwitch";
    const FIXED_LEN: usize = 2 + 2 + std::mem::size_of::<ChannelSwitchAnnouncement>();

    fn max_len() -> usize {
        Self::FIXED_LEN
            + max_element_len::<SecondaryChannelOffset>()
            + max_element_len::<WideBandwidthChannelSwitch>()
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        write_action(
            w,
            ActionCategory::SPECTRUM_MGMT,
            SpectrumMgmtAction::CHANNEL_SWITCH_ANNOUNCEMENT.0,
        )?;
        write_element(w, &self.csa)
    }

    fn write_elements<A: Appendable>(
        &self,
        w: &mut ElementWriter<'_, A>,
    ) -> Result<(), FrameWriteError> {
        w.write_opt(&self.secondary_channel_offset)?;
        w.write_opt(&self.wide_bandwidth)
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        expect_action(
            r,
            ActionCategory::SPECTRUM_MGMT,
            SpectrumMgmtAction::CHANNEL_SWITCH_ANNOUNCEMENT.0,
        )?;
        let csa = read_fixed_element::<ChannelSwitchAnnouncement>(r)?;
        Ok(Self { csa, secondary_channel_offset: None, wide_bandwidth: None })
    }

    fn accept_element(&mut self, el: &RawElement<'_>) -> Disposition {
        offer_element!(el, self.secondary_channel_offset, self.wide_bandwidth)
    }
}
