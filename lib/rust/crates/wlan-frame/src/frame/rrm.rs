// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{
        expect_action, fixed_field, read_fixed_element, write_action, ElementWriter, FrameBody,
        MAX_MEASUREMENT_REPORTS,
    },
    crate::{
        appendable::Appendable,
        buffer_reader::BufferReader,
        error::{FrameParseError, FrameWriteError},
        ie::*,
        mac::{ActionCategory, RadioMeasurementAction},
    },
};

// IEEE Std 802.11-2016, 9.6.7.3
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RadioMeasurementReport {
    pub dialog_token: u8,
    pub reports: Vec<MeasurementReport>,
}

impl FrameBody for RadioMeasurementReport {
    const NAME: &'static str = "RadioMeasurementReport";
    const FIXED_LEN: usize = 3;

    fn max_len() -> usize {
        Self::FIXED_LEN + MAX_MEASUREMENT_REPORTS * max_element_len::<MeasurementReport>()
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        write_action(
            w,
            ActionCategory::RADIO_MEASUREMENT,
            RadioMeasurementAction::RADIO_MEASUREMENT_REPORT.0,
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
        expect_action(
            r,
            ActionCategory::RADIO_MEASUREMENT,
            RadioMeasurementAction::RADIO_MEASUREMENT_REPORT.0,
        )?;
        let dialog_token = r.read_byte().ok_or_else(fixed_field("dialog token"))?;
        Ok(Self { dialog_token, reports: vec![] })
    }

    fn accept_element(&mut self, el: &RawElement<'_>) -> Disposition {
        offer_element!(el, self.reports)
    }
}

// IEEE Std 802.11-2016, 9.6.7.5
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LinkMeasurementReport {
    pub dialog_token: u8,
    pub tpc_report: TpcReport,
    pub rx_antenna_id: u8,
    pub tx_antenna_id: u8,
    pub rcpi: u8,
    pub rsni: u8,
}

impl FrameBody for LinkMeasurementReport {
    const NAME: &'static str = "LinkMeasurementReport";
    const FIXED_LEN: usize = 3 + 2 + std::mem::size_of::<TpcReport>() + 4;

    fn max_len() -> usize {
        Self::FIXED_LEN
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        write_action(
            w,
            ActionCategory::RADIO_MEASUREMENT,
            RadioMeasurementAction::LINK_MEASUREMENT_REPORT.0,
        )?;
        w.append_byte(self.dialog_token)?;
        write_element(w, &self.tpc_report)?;
        w.append_bytes(&[self.rx_antenna_id, self.tx_antenna_id, self.rcpi, self.rsni])?;
        Ok(())
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        expect_action(
            r,
            ActionCategory::RADIO_MEASUREMENT,
            RadioMeasurementAction::LINK_MEASUREMENT_REPORT.0,
        )?;
        let dialog_token = r.read_byte().ok_or_else(fixed_field("dialog token"))?;
        let tpc_report = read_fixed_element::<TpcReport>(r)?;
        let [rx_antenna_id, tx_antenna_id, rcpi, rsni] =
            r.read_array::<4>().ok_or_else(fixed_field("link measurement"))?;
        Ok(Self { dialog_token, tpc_report, rx_antenna_id, tx_antenna_id, rcpi, rsni })
    }
}

// IEEE Std 802.11-2016, 9.6.7.6
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct NeighborReportRequest {
    pub dialog_token: u8,
    /// Requests neighbors of a specific ESS. Omitted to ask about the current ESS.
    pub ssid: Option<Ssid>,
}

impl FrameBody for NeighborReportRequest {
    const NAME: &'static str = "NeighborReportRequest";
    const FIXED_LEN: usize = 3;

    fn max_len() -> usize {
        Self::FIXED_LEN + max_element_len::<Ssid>()
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        write_action(
            w,
            ActionCategory::RADIO_MEASUREMENT,
            RadioMeasurementAction::NEIGHBOR_REPORT_REQUEST.0,
        )?;
        w.append_byte(self.dialog_token)?;
        Ok(())
    }

    fn write_elements<A: Appendable>(
        &self,
        w: &mut ElementWriter<'_, A>,
    ) -> Result<(), FrameWriteError> {
        w.write_opt(&self.ssid)
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        expect_action(
            r,
            ActionCategory::RADIO_MEASUREMENT,
            RadioMeasurementAction::NEIGHBOR_REPORT_REQUEST.0,
        )?;
        let dialog_token = r.read_byte().ok_or_else(fixed_field("dialog token"))?;
        Ok(Self { dialog_token, ssid: None })
    }

    fn accept_element(&mut self, el: &RawElement<'_>) -> Disposition {
        offer_element!(el, self.ssid)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::frame::test_utils::pack_exact};

    #[test]
    fn pack_link_measurement_report() {
        let frame = LinkMeasurementReport {
            dialog_token: 3,
            tpc_report: TpcReport { tx_power: 20, link_margin: -2 },
            rx_antenna_id: 1,
            tx_antenna_id: 1,
            rcpi: 100,
            rsni: 50,
        };
        #[rustfmt::skip]
        assert_eq!(pack_exact(&frame), vec![
            5, 3, // category, action
            3, // dialog token
            35, 2, 20, 0xFE, // TPC report
            1, 1, // antenna ids
            100, 50, // RCPI, RSNI
        ]);
        assert_eq!(LinkMeasurementReport::parse(&pack_exact(&frame)[..]), Ok(frame));
    }

    #[test]
    fn beacon_report_round_trip() {
        let beacon = BeaconReport {
            operating_class: 81,
            channel: 6,
            measurement_duration: 50,
            rcpi: 90,
            bssid: [1, 2, 3, 4, 5, 6],
            ..Default::default()
        };
        let frame = RadioMeasurementReport {
            dialog_token: 8,
            reports: vec![
                MeasurementReport {
                    token: 1,
                    mode: 0,
                    measurement_type: MeasurementReport::TYPE_BEACON,
                    report: beacon.to_bytes(),
                },
                MeasurementReport {
                    token: 2,
                    mode: MeasurementReport::MODE_INCAPABLE,
                    measurement_type: MeasurementReport::TYPE_BEACON,
                    report: vec![],
                },
            ],
        };
        let bytes = pack_exact(&frame);
        assert_eq!(&bytes[..5], &[5, 1, 8, 39, 29]);
        let parsed = RadioMeasurementReport::parse(&bytes[..]).expect("parse");
        assert_eq!(BeaconReport::parse(&parsed.reports[0].report[..]), Ok(beacon));
        assert_eq!(parsed, frame);
    }

    #[test]
    fn neighbor_report_request_with_ssid() {
        let frame = NeighborReportRequest { dialog_token: 1, ssid: Some(Ssid(b"ap".to_vec())) };
        assert_eq!(pack_exact(&frame), vec![5, 4, 1, 0, 2, b'a', b'p']);
        let frame = NeighborReportRequest { dialog_token: 2, ssid: None };
        assert_eq!(NeighborReportRequest::parse(&pack_exact(&frame)[..]), Ok(frame));
    }
}
