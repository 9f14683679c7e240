// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! MAC header composition for management frames.

use {
    crate::{
        appendable::Appendable,
        buffer_writer::{BufferWriter, ByteSliceMut},
        error::FrameWriteError,
        mac::{self, FrameControl, MacAddr, MgmtHdr, MgmtSubtype},
    },
    zerocopy::LayoutVerified,
};

#[derive(PartialEq, Eq, Clone, Copy)]
pub struct FixedFields {
    pub frame_ctrl: FrameControl,
    pub addr1: MacAddr,
    pub addr2: MacAddr,
    pub addr3: MacAddr,
    pub seq_ctrl: u16,
}

impl FixedFields {
    /// Header of a frame sent to `da`. The BSSID slot holds `da` until overridden.
    pub fn new(subtype: MgmtSubtype, da: MacAddr, sa: MacAddr) -> FixedFields {
        let mut frame_ctrl = FrameControl::default();
        frame_ctrl.set_frame_type(mac::FRAME_TYPE_MGMT);
        frame_ctrl.set_frame_subtype(subtype.0);
        FixedFields { frame_ctrl, addr1: da, addr2: sa, addr3: da, seq_ctrl: 0 }
    }

    pub fn with_bssid(mut self, bssid: MacAddr) -> FixedFields {
        self.addr3 = bssid;
        self
    }
}

impl std::fmt::Debug for FixedFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        writeln!(
            f,
            "fc: {:#b}, addr1: {:02X?}, addr2: {:02X?}, addr3: {:02X?}, seq: {}",
            self.frame_ctrl.raw(),
            self.addr1,
            self.addr2,
            self.addr3,
            self.seq_ctrl
        )?;
        Ok(())
    }
}

/// Fills the management header at the start of `buf`. Address 3 is set to `da`; callers with a
/// distinct BSSID overwrite it with `set_bssid`. Bytes past the header are left untouched.
pub fn populate_mgmt_hdr(
    buf: &mut [u8],
    frame_type: u16,
    subtype: MgmtSubtype,
    da: MacAddr,
    sa: MacAddr,
) -> Result<(), FrameWriteError> {
    let mut hdr = mgmt_hdr_mut(buf)?;
    let mut frame_ctrl = FrameControl::default();
    frame_ctrl.set_protocol_version(0);
    frame_ctrl.set_frame_type(frame_type);
    frame_ctrl.set_frame_subtype(subtype.0);
    hdr.set_frame_ctrl(frame_ctrl.raw());
    hdr.addr1 = da;
    hdr.addr2 = sa;
    hdr.addr3 = da;
    Ok(())
}

pub fn set_bssid(buf: &mut [u8], bssid: MacAddr) -> Result<(), FrameWriteError> {
    mgmt_hdr_mut(buf)?.addr3 = bssid;
    Ok(())
}

/// Marks the frame body as protected, as required for robust management frames once a
/// management frame protection key is installed.
pub fn set_protected(buf: &mut [u8], protected: bool) -> Result<(), FrameWriteError> {
    let mut hdr = mgmt_hdr_mut(buf)?;
    let mut frame_ctrl = hdr.fc();
    frame_ctrl.set_protected(protected);
    hdr.set_frame_ctrl(frame_ctrl.raw());
    Ok(())
}

fn mgmt_hdr_mut(buf: &mut [u8]) -> Result<LayoutVerified<&mut [u8], MgmtHdr>, FrameWriteError> {
    LayoutVerified::new_unaligned_from_prefix(buf)
        .map(|(hdr, _)| hdr)
        .ok_or(FrameWriteError::BufferTooSmall)
}

/// Appends a management header, followed by the HT Control field if one is given.
pub fn write_mgmt_hdr<B: ByteSliceMut>(
    w: &mut BufferWriter<B>,
    mut fixed: FixedFields,
    ht_ctrl: Option<u32>,
) -> Result<(), FrameWriteError> {
    fixed.frame_ctrl.set_frame_type(mac::FRAME_TYPE_MGMT);
    if ht_ctrl.is_some() {
        fixed.frame_ctrl.set_htc_order(true);
    } else if fixed.frame_ctrl.htc_order() {
        return Err(FrameWriteError::InvalidField("htc_order bit set while HT-Control is absent"));
    }

    let mut mgmt_hdr = w.append_value_zeroed::<MgmtHdr>()?;
    mgmt_hdr.set_frame_ctrl(fixed.frame_ctrl.raw());
    mgmt_hdr.addr1 = fixed.addr1;
    mgmt_hdr.addr2 = fixed.addr2;
    mgmt_hdr.addr3 = fixed.addr3;
    mgmt_hdr.set_seq_ctrl(fixed.seq_ctrl);

    if let Some(ht_ctrl) = ht_ctrl {
        w.append_u32_le(ht_ctrl)?;
    }
    Ok(())
}
