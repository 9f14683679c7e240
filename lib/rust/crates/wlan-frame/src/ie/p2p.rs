// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! P2P attributes carried in the body of a P2P element.
//!
//! Attributes are encoded as `[id: 1][len: 2, little endian][body]`, Wi-Fi P2P Technical
//! Specification 4.1.1.

use {
    super::{invalid, Id, P2pIe},
    crate::{
        appendable::{Appendable, BufferTooSmall},
        buffer_reader::BufferReader,
        error::FrameParseError,
    },
    byteorder::{ByteOrder, LittleEndian},
};

pub const ATTRIBUTE_HDR_LEN: usize = 3;
pub const NOTICE_OF_ABSENCE_ATTRIBUTE_ID: u8 = 12;

/// Iterates `(attribute id, attribute body)` pairs, stopping at the first truncated attribute.
#[derive(Clone)]
pub struct AttributeReader<'a> {
    bytes: &'a [u8],
}

impl<'a> AttributeReader<'a> {
    pub fn new(p2p_ie_body: &'a [u8]) -> Self {
        Self { bytes: p2p_ie_body }
    }
}

impl<'a> Iterator for AttributeReader<'a> {
    type Item = (u8, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.bytes.len() < ATTRIBUTE_HDR_LEN {
            return None;
        }
        let id = self.bytes[0];
        let len = LittleEndian::read_u16(&self.bytes[1..3]) as usize;
        if self.bytes.len() - ATTRIBUTE_HDR_LEN < len {
            self.bytes = &[];
            return None;
        }
        let body = &self.bytes[ATTRIBUTE_HDR_LEN..ATTRIBUTE_HDR_LEN + len];
        self.bytes = &self.bytes[ATTRIBUTE_HDR_LEN + len..];
        Some((id, body))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct NoaDescriptor {
    pub count: u8,
    pub duration: u32,
    pub interval: u32,
    pub start_time: u32,
}

impl NoaDescriptor {
    pub const LEN: usize = 13;
}

/// Notice of Absence attribute advertised by a P2P group owner.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct NoticeOfAbsence {
    pub index: u8,
    /// Client traffic window in TUs, 0 to 127.
    pub ct_window: u8,
    pub opp_ps: bool,
    pub descriptors: Vec<NoaDescriptor>,
}

impl NoticeOfAbsence {
    const FIXED_LEN: usize = 2;

    /// Length of the attribute, header included.
    pub fn attribute_len(&self) -> usize {
        ATTRIBUTE_HDR_LEN + self.body_len()
    }

    fn body_len(&self) -> usize {
        Self::FIXED_LEN + self.descriptors.len() * NoaDescriptor::LEN
    }

    pub fn write_attribute<A: Appendable>(&self, w: &mut A) -> Result<(), BufferTooSmall> {
        w.append_byte(NOTICE_OF_ABSENCE_ATTRIBUTE_ID)?;
        w.append_u16_le(self.body_len() as u16)?;
        w.append_byte(self.index)?;
        w.append_byte((self.ct_window & 0x7F) | (self.opp_ps as u8) << 7)?;
        for desc in &self.descriptors {
            w.append_byte(desc.count)?;
            w.append_u32_le(desc.duration)?;
            w.append_u32_le(desc.interval)?;
            w.append_u32_le(desc.start_time)?;
        }
        Ok(())
    }

    /// A P2P element that carries only this attribute.
    pub fn to_p2p_ie(&self) -> P2pIe {
        let mut body = Vec::with_capacity(self.attribute_len());
        // Appending to a Vec cannot fail.
        let _ = self.write_attribute(&mut body);
        P2pIe(body)
    }

    pub fn parse_attribute(body: &[u8]) -> Result<Self, FrameParseError> {
        let malformed = || invalid(Id::VENDOR_SPECIFIC, "malformed notice of absence");
        if body.len() < Self::FIXED_LEN || (body.len() - Self::FIXED_LEN) % NoaDescriptor::LEN != 0
        {
            return Err(malformed());
        }
        let mut r = BufferReader::new(body);
        let index = r.read_byte().ok_or_else(malformed)?;
        let ct_window_opp_ps = r.read_byte().ok_or_else(malformed)?;
        let mut descriptors = vec![];
        while r.bytes_remaining() > 0 {
            descriptors.push(NoaDescriptor {
                count: r.read_byte().ok_or_else(malformed)?,
                duration: r.read_u32_le().ok_or_else(malformed)?,
                interval: r.read_u32_le().ok_or_else(malformed)?,
                start_time: r.read_u32_le().ok_or_else(malformed)?,
            });
        }
        Ok(Self {
            index,
            ct_window: ct_window_opp_ps & 0x7F,
            opp_ps: ct_window_opp_ps & 0x80 != 0,
            descriptors,
        })
    }

    /// Finds and decodes the Notice of Absence attribute of a P2P element body.
    pub fn find_in(p2p_ie_body: &[u8]) -> Option<Result<Self, FrameParseError>> {
        AttributeReader::new(p2p_ie_body)
            .find(|(id, _)| *id == NOTICE_OF_ABSENCE_ATTRIBUTE_ID)
            .map(|(_, body)| Self::parse_attribute(body))
    }
}
