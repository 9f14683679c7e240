// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Transmit buffer management.
//!
//! Every management frame goes through `send_frame`: the body is sized with a dry run, every
//! region of the frame is summed, one packet of exactly that size is allocated and zeroed, then
//! the MAC header, body, additional elements and trailer are written in order and the packet is
//! submitted. A packet is freed by this module only if the send fails before submission; once
//! submitted it belongs to the sink.

use {
    crate::{
        device::{
            FrameCategory, Packet, TxCompletion, TxFlags, TxMeta, TxSink, TxStatus, MGMT_PRIORITY,
        },
        error::Error,
    },
    log::{error, warn},
    wlan_frame::{
        appendable::Appendable,
        buffer_writer::BufferWriter,
        frame::FrameBody,
        mac::{self, MacAddr, MgmtHdr, MgmtSubtype},
        mgmt_writer, Packed,
    },
};

/// Addressing and trailing content of one management frame.
#[derive(Clone, Copy, Debug)]
pub struct MgmtTx<'a> {
    pub subtype: MgmtSubtype,
    pub da: MacAddr,
    pub sa: MacAddr,
    /// Address 3. Defaults to `da`.
    pub bssid: Option<MacAddr>,
    pub protected: bool,
    pub flags: TxFlags,
    /// Raw elements supplied by an upper layer, written right after the packed body.
    pub additional_ies: &'a [u8],
    /// Content built after the body, such as a P2P Notice of Absence element.
    pub trailer: &'a [u8],
}

impl<'a> MgmtTx<'a> {
    pub fn new(subtype: MgmtSubtype, da: MacAddr, sa: MacAddr) -> Self {
        Self {
            subtype,
            da,
            sa,
            bssid: None,
            protected: false,
            flags: TxFlags::NONE,
            additional_ies: &[],
            trailer: &[],
        }
    }

    pub fn bssid(self, bssid: MacAddr) -> Self {
        Self { bssid: Some(bssid), ..self }
    }

    pub fn protected(self, protected: bool) -> Self {
        Self { protected, ..self }
    }

    pub fn flags(self, flags: TxFlags) -> Self {
        Self { flags, ..self }
    }

    pub fn additional_ies(self, additional_ies: &'a [u8]) -> Self {
        Self { additional_ies, ..self }
    }

    pub fn trailer(self, trailer: &'a [u8]) -> Self {
        Self { trailer, ..self }
    }
}

/// Packed length of `frame`, or its worst case length if it cannot be sized.
pub fn body_len<F: FrameBody>(frame: &F) -> usize {
    match frame.packed_size() {
        Ok(Packed::Ok(len)) => len,
        Ok(Packed::Warned(len, warnings)) => {
            warn!("{}: sized with warnings: {:?}", F::NAME, warnings);
            len
        }
        Err(e) => {
            warn!("{}: failed to compute packed size ({}); using worst case", F::NAME, e);
            F::max_len()
        }
    }
}

/// Total number of bytes allocated to send `frame` with `tx`.
pub fn frame_len<F: FrameBody>(frame: &F, tx: &MgmtTx<'_>) -> usize {
    MgmtHdr::len(false) + body_len(frame) + tx.additional_ies.len() + tx.trailer.len()
}

/// Sizes, allocates, fills and submits one management frame. `inspect` sees the packed body
/// before submission. Returns the number of bytes submitted.
pub fn send_frame<F, S, I>(
    sink: &mut S,
    frame: &F,
    tx: &MgmtTx<'_>,
    inspect: I,
) -> Result<usize, Error>
where
    F: FrameBody,
    S: TxSink + ?Sized,
    I: FnOnce(&[u8]),
{
    let len = frame_len(frame, tx);
    let mut packet = sink.alloc_packet(FrameCategory::MGMT, len).map_err(|e| {
        error!("{}: {}", F::NAME, e);
        Error::NoResources(len)
    })?;

    let written = match fill_packet(&mut packet, len, frame, tx) {
        Ok((written, body)) => {
            inspect(&packet.buf()[body.0..body.1]);
            written
        }
        Err(e) => {
            error!("{}: aborting send: {}", F::NAME, e);
            sink.free_packet(FrameCategory::MGMT, packet);
            return Err(e);
        }
    };

    let flags = if tx.protected { tx.flags | TxFlags::PROTECTED } else { tx.flags };
    let meta = TxMeta { category: FrameCategory::MGMT, priority: MGMT_PRIORITY, flags };
    sink.transmit(packet, written, meta, completion(F::NAME)).map_err(|e| {
        error!("{}: transmit failed: {}", F::NAME, e);
        Error::TxFailed(e.to_string())
    })?;
    Ok(written)
}

/// Writes the whole frame into the first `len` bytes of `packet`. Returns the number of bytes
/// written and the range of the packed body.
fn fill_packet<F: FrameBody>(
    packet: &mut Packet,
    len: usize,
    frame: &F,
    tx: &MgmtTx<'_>,
) -> Result<(usize, (usize, usize)), Error> {
    let buf = packet.buf_mut();
    if buf.len() < len {
        return Err(Error::BufferTooSmall);
    }
    let buf = &mut buf[..len];
    for b in buf.iter_mut() {
        *b = 0;
    }

    mgmt_writer::populate_mgmt_hdr(buf, mac::FRAME_TYPE_MGMT, tx.subtype, tx.da, tx.sa)?;
    if let Some(bssid) = tx.bssid {
        mgmt_writer::set_bssid(buf, bssid)?;
    }
    if tx.protected {
        mgmt_writer::set_protected(buf, true)?;
    }

    let hdr_len = MgmtHdr::len(false);
    let mut w = BufferWriter::new(&mut buf[hdr_len..]);
    let packed = frame.pack(&mut w)?;
    if let Packed::Warned(_, warnings) = &packed {
        warn!("{}: packed with warnings: {:?}", F::NAME, warnings);
    }
    w.append_bytes(tx.additional_ies)?;
    w.append_bytes(tx.trailer)?;
    let written = hdr_len + w.bytes_written();
    Ok((written, (hdr_len, hdr_len + packed.len())))
}

fn completion(name: &'static str) -> TxCompletion {
    Box::new(move |status| {
        if status != TxStatus::Success {
            warn!("{}: transmission failed", name);
        }
    })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::test_utils::FakeTxSink,
        wlan_frame::{
            assert_variant,
            frame::{Deauth, ProbeRequest, RadioMeasurementReport},
            ie::{MeasurementReport, Ssid, SupportedRates},
            mac::ReasonCode,
        },
    };

    fn probe_request() -> ProbeRequest {
        ProbeRequest {
            ssid: Some(Ssid(b"test".to_vec())),
            supported_rates: Some(SupportedRates(vec![2, 4, 11, 22])),
            ..Default::default()
        }
    }

    #[test]
    fn send_frame_allocates_once_and_submits() {
        let mut sink = FakeTxSink::new();
        let tx = MgmtTx::new(MgmtSubtype::PROBE_REQ, mac::BCAST_ADDR, [2; 6]);
        let mut body = vec![];
        let written = send_frame(&mut sink, &probe_request(), &tx, |b| body = b.to_vec())
            .expect("send probe request");

        assert_eq!(written, 24 + 6 + 6);
        assert_eq!(sink.allocs, vec![36]);
        assert!(sink.frees.is_empty());
        assert_eq!(sink.submitted.len(), 1);
        #[rustfmt::skip]
        assert_eq!(&sink.submitted[0].bytes[..], &[
            // Header
            0b01000000, 0, // frame control
            0, 0, // duration
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // addr1
            2, 2, 2, 2, 2, 2, // addr2
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // addr3
            0, 0, // sequence control
            // Body
            0, 4, b't', b'e', b's', b't', // SSID
            1, 4, 2, 4, 11, 22, // supported rates
        ][..]);
        assert_eq!(&body[..], &sink.submitted[0].bytes[24..]);
        assert_eq!(sink.submitted[0].meta.priority, MGMT_PRIORITY);
    }

    #[test]
    fn packet_is_zeroed_before_writing() {
        let mut sink = FakeTxSink::new();
        sink.dirty_buffers = true;
        let tx = MgmtTx::new(MgmtSubtype::DEAUTH, [1; 6], [2; 6]);
        let deauth = Deauth { reason_code: ReasonCode::LEAVING_NETWORK_DEAUTH };
        send_frame(&mut sink, &deauth, &tx, |_| ()).expect("send deauth");
        // Duration and sequence control are never written and must read as zero.
        assert_eq!(&sink.submitted[0].bytes[2..4], &[0, 0]);
        assert_eq!(&sink.submitted[0].bytes[22..24], &[0, 0]);
    }

    #[test]
    fn additional_ies_and_trailer_are_accounted_for() {
        let mut sink = FakeTxSink::new();
        let additional = [42, 1, 0];
        let trailer = [221, 4, 0x50, 0x6F, 0x9A, 0x09];
        let tx = MgmtTx::new(MgmtSubtype::PROBE_REQ, mac::BCAST_ADDR, [2; 6])
            .bssid([3; 6])
            .additional_ies(&additional[..])
            .trailer(&trailer[..]);
        let frame = probe_request();
        assert_eq!(frame_len(&frame, &tx), 24 + 12 + 3 + 6);
        send_frame(&mut sink, &frame, &tx, |_| ()).expect("send");
        assert_eq!(sink.allocs, vec![45]);
        let bytes = &sink.submitted[0].bytes;
        assert_eq!(bytes.len(), 45);
        assert_eq!(&bytes[16..22], &[3; 6]);
        assert_eq!(&bytes[36..39], &additional[..]);
        assert_eq!(&bytes[39..], &trailer[..]);
    }

    #[test]
    fn protected_bit() {
        let mut sink = FakeTxSink::new();
        let tx = MgmtTx::new(MgmtSubtype::DEAUTH, [1; 6], [2; 6]).protected(true);
        send_frame(&mut sink, &Deauth::default(), &tx, |_| ()).expect("send deauth");
        assert_eq!(sink.submitted[0].bytes[1], 0b01000000);
        assert!(sink.submitted[0].meta.flags.contains(TxFlags::PROTECTED));
    }

    #[test]
    fn allocation_failure() {
        let mut sink = FakeTxSink::new();
        sink.fail_alloc = true;
        let tx = MgmtTx::new(MgmtSubtype::PROBE_REQ, mac::BCAST_ADDR, [2; 6]);
        let result = send_frame(&mut sink, &probe_request(), &tx, |_| panic!("not packed"));
        assert_variant!(result, Err(Error::NoResources(36)));
        assert!(sink.frees.is_empty());
        assert!(sink.submitted.is_empty());
    }

    #[test]
    fn pack_failure_frees_packet() {
        let mut sink = FakeTxSink::new();
        let report = MeasurementReport { token: 1, mode: 0, measurement_type: 0, report: vec![] };
        let frame = RadioMeasurementReport { dialog_token: 1, reports: vec![report; 5] };
        let tx = MgmtTx::new(MgmtSubtype::ACTION, [1; 6], [2; 6]);
        let result = send_frame(&mut sink, &frame, &tx, |_| panic!("not packed"));
        assert_variant!(result, Err(Error::PackFailed(_)));
        // Sizing failed, so the worst case length was allocated.
        assert_eq!(sink.allocs, vec![24 + RadioMeasurementReport::max_len()]);
        assert_eq!(sink.frees.len(), 1);
        assert!(sink.submitted.is_empty());
    }

    #[test]
    fn short_packet_is_freed() {
        let mut sink = FakeTxSink::new();
        sink.short_buffers = true;
        let tx = MgmtTx::new(MgmtSubtype::PROBE_REQ, mac::BCAST_ADDR, [2; 6]);
        let result = send_frame(&mut sink, &probe_request(), &tx, |_| ());
        assert_variant!(result, Err(Error::BufferTooSmall));
        assert_eq!(sink.frees.len(), 1);
    }

    #[test]
    fn transmit_failure_is_not_freed_twice() {
        let mut sink = FakeTxSink::new();
        sink.fail_transmit = true;
        let tx = MgmtTx::new(MgmtSubtype::PROBE_REQ, mac::BCAST_ADDR, [2; 6]);
        let result = send_frame(&mut sink, &probe_request(), &tx, |_| ());
        assert_variant!(result, Err(Error::TxFailed(_)));
        // Only the sink released the packet, through its own failure path.
        assert!(sink.frees.is_empty());
        assert_eq!(sink.released_by_sink.len(), 1);
        assert_eq!(sink.completions, vec![TxStatus::Failed]);
    }
}
