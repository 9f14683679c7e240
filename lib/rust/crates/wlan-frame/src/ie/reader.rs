// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{Id, RawElement, IE_HDR_LEN, VENDOR_HDR_LEN},
    crate::{error::FrameParseError, organization::Oui},
};

/// Iterates the `[id][len][body]` triplets of an element region.
///
/// An element whose declared length runs past the end of the region is reported as
/// `TruncatedElement` and ends the iteration. The element is never clamped to the bytes that
/// remain. A reader can be cloned to restart from its current position.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::new_at(bytes, 0)
    }

    /// Like `new`, but reported offsets start at `base_offset`.
    pub fn new_at(bytes: &'a [u8], base_offset: usize) -> Self {
        Reader { bytes, offset: base_offset, done: false }
    }
}

impl<'a> Iterator for Reader<'a> {
    type Item = Result<RawElement<'a>, FrameParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.bytes.is_empty() {
            return None;
        }
        let offset = self.offset;
        if self.bytes.len() < IE_HDR_LEN {
            self.done = true;
            return Some(Err(FrameParseError::IncompleteElementHeader { offset }));
        }
        let id = Id(self.bytes[0]);
        let declared = self.bytes[1] as usize;
        let left = self.bytes.len() - IE_HDR_LEN;
        if declared > left {
            self.done = true;
            return Some(Err(FrameParseError::TruncatedElement {
                offset,
                id: id.0,
                declared,
                remaining: left,
            }));
        }
        let body = &self.bytes[IE_HDR_LEN..IE_HDR_LEN + declared];
        self.bytes = &self.bytes[IE_HDR_LEN + declared..];
        self.offset += IE_HDR_LEN + declared;
        Some(Ok(RawElement { offset, id, body }))
    }
}

/// Iterates the well formed prefix of an element region, silently stopping at the first
/// malformed element. Used to scan opaque element blobs supplied by upper layers.
pub fn lenient_reader(bytes: &[u8]) -> impl Iterator<Item = RawElement<'_>> + Clone {
    Reader::new(bytes).map_while(Result::ok)
}

/// Finds the first vendor specific element with the given OUI and OUI type and returns the
/// complete element, header included.
pub fn find_vendor_ie(bytes: &[u8], oui: Oui, oui_type: u8) -> Option<&[u8]> {
    lenient_reader(bytes).find(|el| is_vendor_ie(el, oui, oui_type)).map(|el| {
        let start = el.offset;
        &bytes[start..start + IE_HDR_LEN + el.body.len()]
    })
}

/// Returns a copy of `bytes` without any vendor specific element with the given OUI and type.
/// Bytes after a malformed element are kept as they are.
pub fn strip_vendor_ies(bytes: &[u8], oui: Oui, oui_type: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut consumed = 0;
    for el in lenient_reader(bytes) {
        let end = el.offset + IE_HDR_LEN + el.body.len();
        if !is_vendor_ie(&el, oui, oui_type) {
            out.extend_from_slice(&bytes[el.offset..end]);
        }
        consumed = end;
    }
    out.extend_from_slice(&bytes[consumed..]);
    out
}

fn is_vendor_ie(el: &RawElement<'_>, oui: Oui, oui_type: u8) -> bool {
    el.id == Id::VENDOR_SPECIFIC
        && el.body.len() >= VENDOR_HDR_LEN
        && el.vendor_header() == Some((oui, oui_type))
}
