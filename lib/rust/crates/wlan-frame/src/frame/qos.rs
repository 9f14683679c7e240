// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Traffic stream setup and teardown: 802.11e QoS action frames (category 1) and their WMM
//! counterparts (category 17).

use {
    super::{expect_action, fixed_field, write_action, ElementWriter, FrameBody},
    crate::{
        appendable::Appendable,
        buffer_reader::BufferReader,
        error::{CodecWarning, FrameParseError, FrameWriteError},
        ie::*,
        mac::{ActionCategory, QosAction, ReasonCode, StatusCode, TsInfo},
    },
};

/// Largest number of TCLAS elements carried in one ADDTS frame.
pub const MAX_TCLAS: usize = 4;

/// ADDTS request. A request carries either the 802.11e element family (TSPEC, TCLAS,
/// TCLAS processing) or the WMM one, never both.
// IEEE Std 802.11-2016, 9.6.3.2.2
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AddTsRequest {
    pub dialog_token: u8,
    pub tspec: Option<Tspec>,
    pub tclas: Vec<Tclas>,
    pub tclas_processing: Option<TclasProcessing>,
    pub wmm_tspec: Option<WmmTspec>,
    pub wmm_tclas: Vec<WmmTclas>,
    pub wmm_tclas_processing: Option<WmmTclasProcessing>,
}

impl AddTsRequest {
    fn has_11e_elements(&self) -> bool {
        self.tspec.is_some() || !self.tclas.is_empty() || self.tclas_processing.is_some()
    }

    fn has_wmm_elements(&self) -> bool {
        self.wmm_tspec.is_some()
            || !self.wmm_tclas.is_empty()
            || self.wmm_tclas_processing.is_some()
    }
}

impl FrameBody for AddTsRequest {
    const NAME: &'static str = "AddTsRequest";
    const FIXED_LEN: usize = 3;

    fn max_len() -> usize {
        Self::FIXED_LEN
            + max_element_len::<Tspec>()
            + MAX_TCLAS * max_element_len::<Tclas>()
            + max_element_len::<TclasProcessing>()
            + max_element_len::<WmmTspec>()
            + MAX_TCLAS * max_element_len::<WmmTclas>()
            + max_element_len::<WmmTclasProcessing>()
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        write_action(w, ActionCategory::QOS, QosAction::ADDTS_REQUEST.0)?;
        w.append_byte(self.dialog_token)?;
        Ok(())
    }

    fn write_elements<A: Appendable>(
        &self,
        w: &mut ElementWriter<'_, A>,
    ) -> Result<(), FrameWriteError> {
        if self.has_11e_elements() && self.has_wmm_elements() {
            w.warn(CodecWarning::ConflictingElements {
                first: Tspec::NAME,
                second: WmmTspec::NAME,
            });
        }
        w.write_opt(&self.tspec)?;
        w.write_all(&self.tclas[..], MAX_TCLAS)?;
        w.write_opt(&self.tclas_processing)?;
        w.write_opt(&self.wmm_tspec)?;
        w.write_all(&self.wmm_tclas[..], MAX_TCLAS)?;
        w.write_opt(&self.wmm_tclas_processing)
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        expect_action(r, ActionCategory::QOS, QosAction::ADDTS_REQUEST.0)?;
        let dialog_token = r.read_byte().ok_or_else(fixed_field("dialog token"))?;
        Ok(Self { dialog_token, ..Default::default() })
    }

    fn accept_element(&mut self, el: &RawElement<'_>) -> Disposition {
        offer_element!(
            el,
            self.tspec,
            self.tclas,
            self.tclas_processing,
            self.wmm_tspec,
            self.wmm_tclas,
            self.wmm_tclas_processing,
        )
    }
}

// IEEE Std 802.11-2016, 9.6.3.2.3
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AddTsResponse {
    pub dialog_token: u8,
    pub status_code: StatusCode,
    pub ts_delay: Option<TsDelay>,
    pub tspec: Option<Tspec>,
    pub tclas: Vec<Tclas>,
    pub tclas_processing: Option<TclasProcessing>,
    pub schedule: Option<Schedule>,
    pub wmm_tspec: Option<WmmTspec>,
}

impl FrameBody for AddTsResponse {
    const NAME: &'static str = "AddTsResponse";
    const FIXED_LEN: usize = 5;

    fn max_len() -> usize {
        Self::FIXED_LEN
            + max_element_len::<TsDelay>()
            + max_element_len::<Tspec>()
            + MAX_TCLAS * max_element_len::<Tclas>()
            + max_element_len::<TclasProcessing>()
            + max_element_len::<Schedule>()
            + max_element_len::<WmmTspec>()
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        write_action(w, ActionCategory::QOS, QosAction::ADDTS_RESPONSE.0)?;
        w.append_byte(self.dialog_token)?;
        w.append_u16_le(self.status_code.0)?;
        Ok(())
    }

    fn write_elements<A: Appendable>(
        &self,
        w: &mut ElementWriter<'_, A>,
    ) -> Result<(), FrameWriteError> {
        if self.tspec.is_some() && self.wmm_tspec.is_some() {
            w.warn(CodecWarning::ConflictingElements {
                first: Tspec::NAME,
                second: WmmTspec::NAME,
            });
        }
        w.write_opt(&self.ts_delay)?;
        w.write_opt(&self.tspec)?;
        w.write_all(&self.tclas[..], MAX_TCLAS)?;
        w.write_opt(&self.tclas_processing)?;
        w.write_opt(&self.schedule)?;
        w.write_opt(&self.wmm_tspec)
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        expect_action(r, ActionCategory::QOS, QosAction::ADDTS_RESPONSE.0)?;
        let dialog_token = r.read_byte().ok_or_else(fixed_field("dialog token"))?;
        let status_code = StatusCode(r.read_u16_le().ok_or_else(fixed_field("status code"))?);
        Ok(Self { dialog_token, status_code, ..Default::default() })
    }

    fn accept_element(&mut self, el: &RawElement<'_>) -> Disposition {
        offer_element!(
            el,
            self.ts_delay,
            self.tspec,
            self.tclas,
            self.tclas_processing,
            self.schedule,
            self.wmm_tspec,
        )
    }
}

// IEEE Std 802.11-2016, 9.6.3.2.4
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DelTs {
    pub ts_info: TsInfo,
    pub reason_code: ReasonCode,
}

impl FrameBody for DelTs {
    const NAME: &'static str = "DelTs";
    const FIXED_LEN: usize = 2 + TsInfo::WIRE_LEN + 2;

    fn max_len() -> usize {
        Self::FIXED_LEN
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        write_action(w, ActionCategory::QOS, QosAction::DELTS.0)?;
        w.append_bytes(&self.ts_info.to_bytes()[..])?;
        w.append_u16_le(self.reason_code.0)?;
        Ok(())
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        expect_action(r, ActionCategory::QOS, QosAction::DELTS.0)?;
        let ts_info = TsInfo::from_bytes(r.read_array::<3>().ok_or_else(fixed_field("ts info"))?);
        let reason_code = ReasonCode(r.read_u16_le().ok_or_else(fixed_field("reason code"))?);
        Ok(Self { ts_info, reason_code })
    }
}

/// WMM traffic stream action frames share one layout: a dialog token, a one byte status code
/// and a WMM TSPEC element. WMM Specification 2.2.10.
macro_rules! wmm_ts_frame {
    ($(#[$meta:meta])* $name:ident, $label:expr, $action:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Default)]
        pub struct $name {
            pub dialog_token: u8,
            pub status_code: u8,
            pub tspec: Option<WmmTspec>,
        }

        impl FrameBody for $name {
            const NAME: &'static str = $label;
            const FIXED_LEN: usize = 4;

            fn max_len() -> usize {
                Self::FIXED_LEN + max_element_len::<WmmTspec>()
            }

            fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
                write_action(w, ActionCategory::WMM, $action.0)?;
                w.append_byte(self.dialog_token)?;
                w.append_byte(self.status_code)?;
                Ok(())
            }

            fn write_elements<A: Appendable>(
                &self,
                w: &mut ElementWriter<'_, A>,
            ) -> Result<(), FrameWriteError> {
                w.write_opt(&self.tspec)
            }

            fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
                expect_action(r, ActionCategory::WMM, $action.0)?;
                let dialog_token = r.read_byte().ok_or_else(fixed_field("dialog token"))?;
                let status_code = r.read_byte().ok_or_else(fixed_field("status code"))?;
                Ok(Self { dialog_token, status_code, tspec: None })
            }

            fn accept_element(&mut self, el: &RawElement<'_>) -> Disposition {
                offer_element!(el, self.tspec)
            }
        }
    };
}

wmm_ts_frame!(WmmAddTsRequest, "WmmAddTsRequest", QosAction::ADDTS_REQUEST);
wmm_ts_frame!(WmmAddTsResponse, "WmmAddTsResponse", QosAction::ADDTS_RESPONSE);
wmm_ts_frame!(
    /// The dialog token and status code of a WMM DELTS are always zero.
    WmmDelTs,
    "WmmDelTs",
    QosAction::DELTS
);

#[cfg(test)]
mod tests {
    use {super::*, crate::frame::test_utils::pack_exact};

    fn tspec() -> Tspec {
        let mut tspec = Tspec::default();
        let mut ts_info = TsInfo::default();
        ts_info.set_tsid(5);
        ts_info.set_direction(3);
        ts_info.set_user_priority(6);
        tspec.set_ts_info(ts_info);
        tspec.set_nominal_msdu_size(1500);
        tspec.set_mean_data_rate(64_000);
        tspec
    }

    fn tclas(user_priority: u8) -> Tclas {
        Tclas { user_priority, classifier: FrameClassifier::Dot1q { mask: 1, tag: 0x0123 } }
    }

    #[test]
    fn pack_11e_addts_request() {
        let frame = AddTsRequest {
            dialog_token: 7,
            tspec: Some(tspec()),
            tclas: vec![tclas(1), tclas(2), tclas(3)],
            tclas_processing: Some(TclasProcessing { processing: 0 }),
            ..Default::default()
        };
        let bytes = pack_exact(&frame);
        assert_eq!(&bytes[..3], &[1, 0, 7]);
        assert_eq!(&bytes[3..5], &[13, 55]);
        assert_eq!(&bytes[60..67], &[14, 5, 1, 2, 1, 0x23, 0x01]);
        assert_eq!(bytes.len(), 3 + 57 + 3 * 7 + 3);
        assert!(frame.packed_size().expect("size").warnings().is_empty());
        let parsed = AddTsRequest::parse(&bytes[..]).expect("parse");
        assert_eq!(parsed.tclas.len(), 3);
        assert!(parsed.wmm_tclas.is_empty());
        assert_eq!(parsed, frame);
    }

    #[test]
    fn mixed_element_families_warn() {
        let frame = AddTsRequest {
            tspec: Some(tspec()),
            wmm_tclas: vec![WmmTclas { version: 1, tclas: tclas(0) }],
            ..Default::default()
        };
        assert_eq!(
            frame.packed_size().expect("size").warnings(),
            &[CodecWarning::ConflictingElements { first: "TSPEC", second: "WmmTspec" }]
        );
    }

    #[test]
    fn too_many_tclas() {
        let frame = AddTsRequest { tclas: vec![tclas(0); MAX_TCLAS + 1], ..Default::default() };
        assert_eq!(
            frame.packed_size(),
            Err(FrameWriteError::TooManyElements { element: "TCLAS", count: 5, max: 4 })
        );
    }

    #[test]
    fn addts_response_round_trip() {
        let mut schedule = Schedule::default();
        schedule.set_service_interval(20_000);
        let mut ts_delay = TsDelay::default();
        ts_delay.set_delay(100);
        let frame = AddTsResponse {
            dialog_token: 9,
            status_code: StatusCode::REJECTED_WITH_SUGGESTED_CHANGES,
            ts_delay: Some(ts_delay),
            tspec: Some(tspec()),
            schedule: Some(schedule),
            ..Default::default()
        };
        let bytes = pack_exact(&frame);
        assert_eq!(&bytes[..5], &[1, 1, 9, 39, 0]);
        assert_eq!(AddTsResponse::parse(&bytes[..]), Ok(frame));
    }

    #[test]
    fn pack_delts() {
        let frame = DelTs { ts_info: tspec().ts_info(), reason_code: ReasonCode::QOS_UNSPECIFIED };
        #[rustfmt::skip]
        assert_eq!(pack_exact(&frame), vec![
            1, 2, // category, action
            0x6A, 0x30, 0x00, // ts info
            32, 0, // reason code
        ]);
        assert_eq!(DelTs::parse(&pack_exact(&frame)[..]), Ok(frame));
    }

    #[test]
    fn wmm_addts_request() {
        let frame = WmmAddTsRequest {
            dialog_token: 2,
            status_code: 0,
            tspec: Some(WmmTspec { version: 1, tspec: tspec() }),
        };
        let bytes = pack_exact(&frame);
        assert_eq!(&bytes[..4], &[17, 0, 2, 0]);
        assert_eq!(&bytes[4..11], &[221, 61, 0x00, 0x50, 0xF2, 0x02, 0x02]);
        assert_eq!(WmmAddTsRequest::parse(&bytes[..]), Ok(frame));
        assert_eq!(
            WmmDelTs::parse(&bytes[..]),
            Err(FrameParseError::UnexpectedAction { category: 17, action: 0 })
        );
    }
}
