// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{ElementWriter, FrameBody},
    crate::{
        appendable::Appendable,
        buffer_reader::BufferReader,
        error::{FrameParseError, FrameWriteError},
        frame_len,
        ie::*,
        mac::{AuthAlgorithmNumber, AuthHdr, ReasonCode, ReasonHdr, StatusCode},
    },
};

// IEEE Std 802.11-2016, 9.3.3.12
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Auth {
    pub algorithm: AuthAlgorithmNumber,
    pub transaction_seq: u16,
    pub status_code: StatusCode,
    /// Shared key authentication, frames 2 and 3.
    pub challenge_text: Option<ChallengeText>,
    pub rsne: Option<Rsne>,
    pub mobility_domain: Option<MobilityDomain>,
    pub fte: Option<FastBssTransition>,
    pub timeout_interval: Option<TimeoutInterval>,
}

impl FrameBody for Auth {
    const NAME: &'static str = "Auth";
    const FIXED_LEN: usize = frame_len!(AuthHdr);

    fn max_len() -> usize {
        Self::FIXED_LEN
            + max_element_len::<ChallengeText>()
            + max_element_len::<Rsne>()
            + max_element_len::<MobilityDomain>()
            + max_element_len::<FastBssTransition>()
            + max_element_len::<TimeoutInterval>()
    }

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
        let mut hdr = AuthHdr::default();
        hdr.set_auth_alg_num(self.algorithm.0);
        hdr.set_auth_txn_seq_num(self.transaction_seq);
        hdr.set_status_code(self.status_code.0);
        w.append_value(&hdr)?;
        Ok(())
    }

    fn write_elements<A: Appendable>(
        &self,
        w: &mut ElementWriter<'_, A>,
    ) -> Result<(), FrameWriteError> {
        w.write_opt(&self.challenge_text)?;
        w.write_opt(&self.rsne)?;
        w.write_opt(&self.mobility_domain)?;
        w.write_opt(&self.fte)?;
        w.write_opt(&self.timeout_interval)
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
        let hdr = r.read::<AuthHdr>().ok_or(FrameParseError::InvalidField("auth header"))?;
        Ok(Self {
            algorithm: AuthAlgorithmNumber(hdr.auth_alg_num()),
            transaction_seq: hdr.auth_txn_seq_num(),
            status_code: StatusCode(hdr.status_code()),
            ..Default::default()
        })
    }

    fn accept_element(&mut self, el: &RawElement<'_>) -> Disposition {
        offer_element!(
            el,
            self.challenge_text,
            self.rsne,
            self.mobility_domain,
            self.fte,
            self.timeout_interval,
        )
    }
}

// IEEE Std 802.11-2016, 9.3.3.13
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Deauth {
    pub reason_code: ReasonCode,
}

// IEEE Std 802.11-2016, 9.3.3.5
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Disassoc {
    pub reason_code: ReasonCode,
}

macro_rules! reason_frame {
    ($name:ident, $label:expr) => {
        impl FrameBody for $name {
            const NAME: &'static str = $label;
            const FIXED_LEN: usize = frame_len!(ReasonHdr);

            fn max_len() -> usize {
                Self::FIXED_LEN
            }

            fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
                w.append_u16_le(self.reason_code.0)?;
                Ok(())
            }

            fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
                let hdr = r.read::<ReasonHdr>().ok_or(FrameParseError::InvalidField("reason"))?;
                Ok(Self { reason_code: ReasonCode(hdr.reason_code()) })
            }
        }
    };
}

reason_frame!(Deauth, "Deauth");
reason_frame!(Disassoc, "Disassoc");

#[cfg(test)]
mod tests {
    use {super::*, crate::frame::test_utils::pack_exact};

    #[test]
    fn pack_shared_key_auth() {
        let frame = Auth {
            algorithm: AuthAlgorithmNumber::SHARED_KEY,
            transaction_seq: 3,
            status_code: StatusCode::SUCCESS,
            challenge_text: Some(ChallengeText(vec![0xAB; 4])),
            ..Default::default()
        };
        #[rustfmt::skip]
        assert_eq!(pack_exact(&frame), vec![
            1, 0, // algorithm
            3, 0, // transaction sequence number
            0, 0, // status
            16, 4, 0xAB, 0xAB, 0xAB, 0xAB, // challenge text
        ]);
    }

    #[test]
    fn ft_auth_round_trip() {
        let frame = Auth {
            algorithm: AuthAlgorithmNumber::FAST_BSS_TRANSITION,
            transaction_seq: 1,
            rsne: Some(Rsne(vec![1, 0, 0x00, 0x0F, 0xAC, 4])),
            mobility_domain: Some(MobilityDomain { mdid: [1, 2], ft_capability_policy: 0 }),
            fte: Some(FastBssTransition(vec![7; 20])),
            ..Default::default()
        };
        let bytes = pack_exact(&frame);
        assert_eq!(Auth::parse(&bytes[..]), Ok(frame));
    }

    #[test]
    fn deauth_and_disassoc() {
        let deauth = Deauth { reason_code: ReasonCode::LEAVING_NETWORK_DEAUTH };
        assert_eq!(pack_exact(&deauth), vec![3, 0]);
        let disassoc = Disassoc { reason_code: ReasonCode(8) };
        let bytes = pack_exact(&disassoc);
        assert_eq!(Disassoc::parse(&bytes[..]), Ok(disassoc));
    }

    #[test]
    fn deauth_ignores_trailing_elements() {
        let bytes = [1, 0, 221, 4, 0x00, 0x40, 0x96, 0x00];
        let (frame, summary) = Deauth::parse_with_summary(&bytes[..]).expect("parse");
        assert_eq!(frame.reason_code, ReasonCode::UNSPECIFIED_REASON);
        assert_eq!(summary.unknown, vec![221]);
    }
}
