// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Frame descriptors: structured, owned representations of management frame bodies.
//!
//! A descriptor holds its fixed fields and one slot per optional element. An element is written
//! if and only if its slot is filled, and the same `pack` routine backs both `packed_size` and
//! the actual serialization, so the two can never disagree.

/// Offers a raw element to each slot in turn and returns the disposition of the first slot that
/// recognizes it. Must be the body of a function returning `Disposition`.
macro_rules! offer_element {
    ($el:expr, $($slot:expr),+ $(,)?) => {{
        let el: &$crate::ie::RawElement<'_> = $el;
        $(
            if let Some(disposition) = el.offer(&mut $slot) {
                return disposition;
            }
        )+
        $crate::ie::Disposition::Unknown
    }};
}

mod assoc;
mod auth;
mod block_ack;
mod probe;
mod qos;
mod rrm;
mod sa_query;
mod spectrum;

pub use {
    assoc::*, auth::*, block_ack::*, probe::*, qos::*, rrm::*, sa_query::*, spectrum::*,
};

use {
    crate::{
        appendable::{Appendable, LenCounter},
        buffer_reader::BufferReader,
        error::{CodecWarning, FrameParseError, FrameWriteError, Packed},
        ie::{
            invalid, write_element, Disposition, Element, Id, RawElement, Reader, VENDOR_HDR_LEN,
        },
        mac::ActionCategory,
    },
    log::debug,
};

/// Writes the optional elements of a descriptor and collects codec warnings.
pub struct ElementWriter<'a, A> {
    w: &'a mut A,
    warnings: Vec<CodecWarning>,
}

impl<'a, A: Appendable> ElementWriter<'a, A> {
    fn new(w: &'a mut A) -> Self {
        Self { w, warnings: vec![] }
    }

    pub fn write<E: Element>(&mut self, element: &E) -> Result<(), FrameWriteError> {
        if let Some(warning) = element.check() {
            self.warnings.push(warning);
        }
        write_element(self.w, element)
    }

    pub fn write_opt<E: Element>(&mut self, element: &Option<E>) -> Result<(), FrameWriteError> {
        match element {
            Some(element) => self.write(element),
            None => Ok(()),
        }
    }

    /// Writes a repeated element. More than `max` occurrences is a hard error.
    pub fn write_all<E: Element>(
        &mut self,
        elements: &[E],
        max: usize,
    ) -> Result<(), FrameWriteError> {
        if elements.len() > max {
            return Err(FrameWriteError::TooManyElements {
                element: E::NAME,
                count: elements.len(),
                max,
            });
        }
        elements.iter().try_for_each(|element| self.write(element))
    }

    pub fn warn(&mut self, warning: CodecWarning) {
        self.warnings.push(warning);
    }

    fn into_warnings(self) -> Vec<CodecWarning> {
        self.warnings
    }
}

/// Elements that were skipped while parsing a frame body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSummary {
    /// Ids of elements the descriptor does not know.
    pub unknown: Vec<u8>,
    /// Ids of repeated single-instance elements. The first occurrence was kept.
    pub duplicates: Vec<u8>,
    /// Recognized elements whose body could not be decoded.
    pub malformed: Vec<(u8, FrameParseError)>,
}

impl ElementSummary {
    pub fn is_clean(&self) -> bool {
        self.unknown.is_empty() && self.duplicates.is_empty() && self.malformed.is_empty()
    }
}

/// A management frame body: fixed fields followed by information elements.
pub trait FrameBody: Sized {
    const NAME: &'static str;
    /// Length of the fixed fields. Shorter bodies are rejected before any field is read.
    const FIXED_LEN: usize;

    /// Worst case packed length, used in place of `packed_size` if it fails.
    fn max_len() -> usize;

    fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError>;

    fn write_elements<A: Appendable>(
        &self,
        _w: &mut ElementWriter<'_, A>,
    ) -> Result<(), FrameWriteError> {
        Ok(())
    }

    fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError>;

    fn accept_element(&mut self, _el: &RawElement<'_>) -> Disposition {
        Disposition::Unknown
    }

    /// Exact number of bytes `pack` will write.
    fn packed_size(&self) -> Result<Packed, FrameWriteError> {
        self.pack(&mut LenCounter::new())
    }

    fn pack<A: Appendable>(&self, w: &mut A) -> Result<Packed, FrameWriteError> {
        let start = w.bytes_written();
        self.write_fixed(w)?;
        let mut elements = ElementWriter::new(w);
        self.write_elements(&mut elements)?;
        let warnings = elements.into_warnings();
        Ok(Packed::new(w.bytes_written() - start, warnings))
    }

    fn parse(bytes: &[u8]) -> Result<Self, FrameParseError> {
        Self::parse_with_summary(bytes).map(|(body, _)| body)
    }

    fn parse_with_summary(bytes: &[u8]) -> Result<(Self, ElementSummary), FrameParseError> {
        Self::parse_at(bytes, 0)
    }

    /// Like `parse_with_summary`, but element offsets are reported relative to a position
    /// `base_offset` bytes before `bytes`, such as the start of the MAC header.
    fn parse_at(
        bytes: &[u8],
        base_offset: usize,
    ) -> Result<(Self, ElementSummary), FrameParseError> {
        if bytes.len() < Self::FIXED_LEN {
            return Err(FrameParseError::TooShort {
                needed: Self::FIXED_LEN,
                available: bytes.len(),
            });
        }
        let mut reader = BufferReader::new(bytes);
        let mut body = Self::parse_fixed(&mut reader)?;
        let offset = base_offset + reader.bytes_read();
        let mut summary = ElementSummary::default();
        for el in Reader::new_at(reader.into_remaining(), offset) {
            let el = el?;
            if el.id == Id::VENDOR_SPECIFIC && el.body.len() < VENDOR_HDR_LEN {
                return Err(FrameParseError::MalformedVendorIe {
                    offset: el.offset,
                    len: el.body.len(),
                });
            }
            match body.accept_element(&el) {
                Disposition::Accepted => (),
                Disposition::Duplicate => {
                    debug!("{}: duplicate element {} ignored", Self::NAME, el.id.0);
                    summary.duplicates.push(el.id.0);
                }
                Disposition::Malformed(e) => {
                    debug!("{}: skipping malformed element: {}", Self::NAME, e);
                    summary.malformed.push((el.id.0, e));
                }
                Disposition::Unknown => summary.unknown.push(el.id.0),
            }
        }
        Ok((body, summary))
    }
}

/// Reads and checks the category and action fields of an action frame.
pub(crate) fn expect_action(
    r: &mut BufferReader<&[u8]>,
    category: ActionCategory,
    action: u8,
) -> Result<(), FrameParseError> {
    let too_short = || FrameParseError::InvalidField("action header");
    let found_category = r.read_byte().ok_or_else(too_short)?;
    let found_action = r.read_byte().ok_or_else(too_short)?;
    if found_category != category.0 || found_action != action {
        return Err(FrameParseError::UnexpectedAction {
            category: found_category,
            action: found_action,
        });
    }
    Ok(())
}

pub(crate) fn write_action<A: Appendable>(
    w: &mut A,
    category: ActionCategory,
    action: u8,
) -> Result<(), FrameWriteError> {
    w.append_byte(category.0)?;
    w.append_byte(action)?;
    Ok(())
}

/// Reads a mandatory element that is part of the fixed fields of an action frame.
pub(crate) fn read_fixed_element<E: Element>(
    r: &mut BufferReader<&[u8]>,
) -> Result<E, FrameParseError> {
    let id = E::KIND.id();
    let hdr = r.read_array::<2>().ok_or_else(fixed_field(E::NAME))?;
    if hdr[0] != id.0 {
        return Err(invalid(id, "missing mandatory element"));
    }
    let body = r.read_bytes(hdr[1] as usize).ok_or_else(fixed_field(E::NAME))?;
    E::parse_body(body)
}

/// Error for a fixed field that could not be read.
pub(crate) fn fixed_field(name: &'static str) -> impl Fn() -> FrameParseError {
    move || FrameParseError::InvalidField(name)
}


#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{assert_variant, buffer_writer::BufferWriter, ie::*},
    };

    #[test]
    fn pack_into_too_small_buffer() {
        let frame = ProbeRequest { ssid: Some(Ssid(b"test".to_vec())), ..Default::default() };
        let mut buf = [0u8; 5];
        let result = frame.pack(&mut BufferWriter::new(&mut buf[..]));
        assert_variant!(result, Err(FrameWriteError::BufferTooSmall));
    }

    #[test]
    fn too_many_elements() {
        let mut buf = vec![];
        let mut w = ElementWriter::new(&mut buf);
        let rates = vec![DsParamSet { current_channel: 1 }; 3];
        assert_variant!(
            w.write_all(&rates[..], 2),
            Err(FrameWriteError::TooManyElements { count: 3, max: 2, .. })
        );
    }

    #[test]
    fn summary_records_skipped_elements() {
        #[rustfmt::skip]
        let bytes = [
            0, 4, b't', b'e', b's', b't', // SSID
            0, 1, b'x', // duplicate SSID
            3, 2, 6, 6, // DSSS parameter set with a bad length
            200, 0, // unknown
        ];
        let (frame, summary) = ProbeRequest::parse_with_summary(&bytes[..]).expect("parse");
        assert_eq!(frame.ssid, Some(Ssid(b"test".to_vec())));
        assert_eq!(frame.ds_params, None);
        assert_eq!(summary.unknown, vec![200]);
        assert_eq!(summary.duplicates, vec![0]);
        assert_eq!(summary.malformed.len(), 1);
        assert!(!summary.is_clean());
    }

    #[test]
    fn short_vendor_element_rejects_frame() {
        let bytes = [0, 0, 221, 3, 0x00, 0x50, 0xF2];
        assert_eq!(
            ProbeRequest::parse(&bytes[..]),
            Err(FrameParseError::MalformedVendorIe { offset: 2, len: 3 })
        );
    }

    #[test]
    fn fixed_fields_too_short() {
        assert_eq!(
            Auth::parse(&[0, 0, 1][..]),
            Err(FrameParseError::TooShort { needed: 6, available: 3 })
        );
    }

    #[test]
    fn unexpected_action() {
        let bytes = [3, 2, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            AddBaRequest::parse(&bytes[..]),
            Err(FrameParseError::UnexpectedAction { category: 3, action: 2 })
        );
    }
}
