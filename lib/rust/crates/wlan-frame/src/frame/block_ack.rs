// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{expect_action, write_action, FrameBody},
    crate::{
        appendable::Appendable,
        buffer_reader::BufferReader,
        error::{FrameParseError, FrameWriteError},
        frame_len,
        mac::{
            ActionCategory, ActionHdr, AddbaReqHdr, AddbaRespHdr, BlockAckAction,
            BlockAckParameters, DelbaHdr, DelbaParameters, ReasonCode, StatusCode,
        },
    },
};

// IEEE Std 802.11-2016, 9.6.5.2
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AddBaRequest {
    pub dialog_token: u8,
    pub parameters: BlockAckParameters,
    /// Block ack timeout in TUs. Zero disables the timeout.
    pub timeout: u16,
    pub starting_sequence_control: u16,
}

impl FrameBody for AddBaRequest {
    const NAME: &'static str = "AddBaRequest";
    const FIXED_LEN: usize = frame_len!(ActionHdr, AddbaReqHdr);

    fn max_len() -> usize {
        Self::FIXED_LEN
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        write_action(w, ActionCategory::BLOCK_ACK, BlockAckAction::ADDBA_REQUEST.0)?;
        let mut hdr = AddbaReqHdr { dialog_token: self.dialog_token, ..Default::default() };
        hdr.set_parameters(self.parameters);
        hdr.set_timeout(self.timeout);
        hdr.set_starting_sequence_control(self.starting_sequence_control);
        w.append_value(&hdr)?;
        Ok(())
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        expect_action(r, ActionCategory::BLOCK_ACK, BlockAckAction::ADDBA_REQUEST.0)?;
        let hdr = r.read::<AddbaReqHdr>().ok_or(FrameParseError::InvalidField("addba header"))?;
        Ok(Self {
            dialog_token: hdr.dialog_token,
            parameters: hdr.parameters(),
            timeout: hdr.timeout(),
            starting_sequence_control: hdr.starting_sequence_control(),
        })
    }
}

// IEEE Std 802.11-2016, 9.6.5.3
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AddBaResponse {
    pub dialog_token: u8,
    pub status_code: StatusCode,
    pub parameters: BlockAckParameters,
    pub timeout: u16,
}

impl FrameBody for AddBaResponse {
    const NAME: &'static str = "AddBaResponse";
    const FIXED_LEN: usize = frame_len!(ActionHdr, AddbaRespHdr);

    fn max_len() -> usize {
        Self::FIXED_LEN
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        write_action(w, ActionCategory::BLOCK_ACK, BlockAckAction::ADDBA_RESPONSE.0)?;
        let mut hdr = AddbaRespHdr { dialog_token: self.dialog_token, ..Default::default() };
        hdr.set_status(self.status_code.0);
        hdr.set_parameters(self.parameters);
        hdr.set_timeout(self.timeout);
        w.append_value(&hdr)?;
        Ok(())
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        expect_action(r, ActionCategory::BLOCK_ACK, BlockAckAction::ADDBA_RESPONSE.0)?;
        let hdr =
            r.read::<AddbaRespHdr>().ok_or(FrameParseError::InvalidField("addba resp header"))?;
        Ok(Self {
            dialog_token: hdr.dialog_token,
            status_code: StatusCode(hdr.status()),
            parameters: hdr.parameters(),
            timeout: hdr.timeout(),
        })
    }
}

// IEEE Std 802.11-2016, 9.6.5.4
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DelBa {
    pub parameters: DelbaParameters,
    pub reason_code: ReasonCode,
}

impl FrameBody for DelBa {
    const NAME: &'static str = "DelBa";
    const FIXED_LEN: usize = frame_len!(ActionHdr, DelbaHdr);

    fn max_len() -> usize {
        Self::FIXED_LEN
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        write_action(w, ActionCategory::BLOCK_ACK, BlockAckAction::DELBA.0)?;
        let mut hdr = DelbaHdr::default();
        hdr.set_parameters(self.parameters);
        hdr.set_reason_code(self.reason_code.0);
        w.append_value(&hdr)?;
        Ok(())
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        expect_action(r, ActionCategory::BLOCK_ACK, BlockAckAction::DELBA.0)?;
        let hdr = r.read::<DelbaHdr>().ok_or(FrameParseError::InvalidField("delba header"))?;
        Ok(Self { parameters: hdr.parameters(), reason_code: ReasonCode(hdr.reason_code()) })
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::frame::test_utils::pack_exact};

    #[test]
    fn pack_addba_request() {
        let mut parameters = BlockAckParameters::default();
        parameters.set_amsdu(true);
        parameters.set_policy(1);
        parameters.set_tid(3);
        parameters.set_buffer_size(64);
        let frame = AddBaRequest {
            dialog_token: 1,
            parameters,
            timeout: 0,
            starting_sequence_control: 0x0010,
        };
        #[rustfmt::skip]
        assert_eq!(pack_exact(&frame), vec![
            3, 0, // category, action
            1, // dialog token
            0b00001111, 0b00010000, // parameters
            0, 0, // timeout
            0x10, 0x00, // starting sequence control
        ]);
        assert_eq!(AddBaRequest::parse(&pack_exact(&frame)[..]), Ok(frame));
    }

    #[test]
    fn addba_response_round_trip() {
        let frame = AddBaResponse {
            dialog_token: 1,
            status_code: StatusCode::REFUSED,
            parameters: BlockAckParameters::from_raw(0x100F),
            timeout: 5000,
        };
        let bytes = pack_exact(&frame);
        assert_eq!(&bytes[..5], &[3, 1, 1, 1, 0]);
        assert_eq!(AddBaResponse::parse(&bytes[..]), Ok(frame));
    }

    #[test]
    fn pack_delba() {
        let mut parameters = DelbaParameters::default();
        parameters.set_initiator(true);
        parameters.set_tid(6);
        let frame = DelBa { parameters, reason_code: ReasonCode::END_TS_BA_DLS };
        assert_eq!(pack_exact(&frame), vec![3, 2, 0x00, 0x68, 37, 0]);
    }
}
