// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Information element codec.
//!
//! Every element type implements `Element`, which describes how its body is sized, written and
//! parsed. The element header (and, for vendor elements, the OUI prefix) is handled uniformly by
//! `write_element` and `RawElement::offer`.

#[macro_use]
mod macros;

mod fields;
pub mod p2p;
mod qos;
mod rates_writer;
mod reader;
mod vendor;
pub mod wsc;

pub use {fields::*, qos::*, rates_writer::*, reader::*, vendor::*};

use {
    crate::{
        appendable::{Appendable, BufferTooSmall},
        error::{CodecWarning, FrameParseError, FrameWriteError},
        organization::Oui,
    },
    std::fmt,
};

/// Maximum length of an element body, excluding the two header bytes.
pub const IE_MAX_LEN: usize = 255;
pub const IE_HDR_LEN: usize = 2;
/// OUI and OUI type leading every vendor specific element body.
pub const VENDOR_HDR_LEN: usize = 4;

// IEEE Std 802.11-2016, 9.4.2.1, Table 9-77
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(pub u8);

impl Id {
    pub const SSID: Self = Self(0);
    pub const SUPPORTED_RATES: Self = Self(1);
    pub const DSSS_PARAM_SET: Self = Self(3);
    pub const TIM: Self = Self(5);
    pub const COUNTRY: Self = Self(7);
    pub const EDCA_PARAM_SET: Self = Self(12);
    pub const TSPEC: Self = Self(13);
    pub const TCLAS: Self = Self(14);
    pub const SCHEDULE: Self = Self(15);
    pub const CHALLENGE_TEXT: Self = Self(16);
    pub const POWER_CONSTRAINT: Self = Self(32);
    pub const POWER_CAPABILITY: Self = Self(33);
    pub const TPC_REPORT: Self = Self(35);
    pub const SUPPORTED_CHANNELS: Self = Self(36);
    pub const CHANNEL_SWITCH_ANNOUNCEMENT: Self = Self(37);
    pub const MEASUREMENT_REPORT: Self = Self(39);
    pub const ERP_INFO: Self = Self(42);
    pub const TS_DELAY: Self = Self(43);
    pub const TCLAS_PROCESSING: Self = Self(44);
    pub const HT_CAPABILITIES: Self = Self(45);
    pub const QOS_CAPABILITY: Self = Self(46);
    pub const RSNE: Self = Self(48);
    pub const EXT_SUPPORTED_RATES: Self = Self(50);
    pub const MOBILITY_DOMAIN: Self = Self(54);
    pub const FAST_BSS_TRANSITION: Self = Self(55);
    pub const TIMEOUT_INTERVAL: Self = Self(56);
    pub const HT_OPERATION: Self = Self(61);
    pub const SECONDARY_CHANNEL_OFFSET: Self = Self(62);
    pub const WAPI: Self = Self(68);
    pub const RM_ENABLED_CAPABILITIES: Self = Self(70);
    pub const EXT_CAPABILITIES: Self = Self(127);
    pub const VHT_CAPABILITIES: Self = Self(191);
    pub const VHT_OPERATION: Self = Self(192);
    pub const WIDE_BANDWIDTH_CHANNEL_SWITCH: Self = Self(194);
    pub const VENDOR_SPECIFIC: Self = Self(221);
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.0)
    }
}

/// How an element is recognized on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Basic(Id),
    /// A vendor specific element. WMM elements carry an additional OUI subtype byte.
    Vendor { oui: Oui, oui_type: u8, subtype: Option<u8> },
}

impl ElementKind {
    pub const fn id(&self) -> Id {
        match self {
            ElementKind::Basic(id) => *id,
            ElementKind::Vendor { .. } => Id::VENDOR_SPECIFIC,
        }
    }

    /// Number of body bytes taken by the vendor prefix.
    pub const fn prefix_len(&self) -> usize {
        match self {
            ElementKind::Basic(_) => 0,
            ElementKind::Vendor { subtype: None, .. } => VENDOR_HDR_LEN,
            ElementKind::Vendor { subtype: Some(_), .. } => VENDOR_HDR_LEN + 1,
        }
    }

    fn write_prefix<A: Appendable>(&self, w: &mut A) -> Result<(), BufferTooSmall> {
        if let ElementKind::Vendor { oui, oui_type, subtype } = self {
            w.append_bytes(&oui.as_bytes()[..])?;
            w.append_byte(*oui_type)?;
            if let Some(subtype) = subtype {
                w.append_byte(*subtype)?;
            }
        }
        Ok(())
    }
}

/// A typed information element.
pub trait Element: Sized {
    const NAME: &'static str;
    const KIND: ElementKind;
    /// Largest body this element can have, excluding any vendor prefix.
    const MAX_BODY_LEN: usize;

    fn body_len(&self) -> usize;

    fn write_body<A: Appendable>(&self, w: &mut A) -> Result<(), BufferTooSmall>;

    /// `body` excludes the element header and the vendor prefix.
    fn parse_body(body: &[u8]) -> Result<Self, FrameParseError>;

    /// Reports a non-fatal anomaly, such as a body longer than the element type permits.
    fn check(&self) -> Option<CodecWarning> {
        None
    }
}

/// Length of `element` once written, including its header.
pub fn element_len<E: Element>(element: &E) -> usize {
    IE_HDR_LEN + E::KIND.prefix_len() + element.body_len()
}

/// Worst case length of an element of type `E`, including its header.
pub fn max_element_len<E: Element>() -> usize {
    IE_HDR_LEN + E::KIND.prefix_len() + E::MAX_BODY_LEN
}

pub fn write_element<E: Element, A: Appendable>(
    w: &mut A,
    element: &E,
) -> Result<(), FrameWriteError> {
    let id = E::KIND.id();
    let len = E::KIND.prefix_len() + element.body_len();
    if len > IE_MAX_LEN {
        return Err(FrameWriteError::ElementTooLong { id: id.0, len });
    }
    w.append_byte(id.0)?;
    w.append_byte(len as u8)?;
    E::KIND.write_prefix(w)?;
    let start = w.bytes_written();
    element.write_body(w)?;
    if w.bytes_written() - start != element.body_len() {
        return Err(FrameWriteError::InvalidField(E::NAME));
    }
    Ok(())
}

/// An element as found on the wire, borrowed from the frame being parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawElement<'a> {
    /// Offset of the element header from the start of the parsed region.
    pub offset: usize,
    pub id: Id,
    pub body: &'a [u8],
}

/// What happened to an element offered to a frame descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Accepted,
    /// The slot was already filled; the first occurrence is kept.
    Duplicate,
    /// The element was recognized but its body could not be decoded. It is skipped.
    Malformed(FrameParseError),
    Unknown,
}

/// A field of a frame descriptor that holds one or more elements of a single type.
pub trait ElementSlot {
    type Element: Element;

    fn store(&mut self, element: Self::Element) -> Disposition;
}

impl<E: Element> ElementSlot for Option<E> {
    type Element = E;

    fn store(&mut self, element: E) -> Disposition {
        if self.is_some() {
            return Disposition::Duplicate;
        }
        *self = Some(element);
        Disposition::Accepted
    }
}

impl<E: Element> ElementSlot for Vec<E> {
    type Element = E;

    fn store(&mut self, element: E) -> Disposition {
        self.push(element);
        Disposition::Accepted
    }
}

impl<'a> RawElement<'a> {
    pub fn is_kind(&self, kind: ElementKind) -> bool {
        match kind {
            ElementKind::Basic(id) => self.id == id,
            ElementKind::Vendor { oui, oui_type, subtype } => {
                self.id == Id::VENDOR_SPECIFIC
                    && self.body.len() >= kind.prefix_len()
                    && &self.body[0..3] == &oui.as_bytes()[..]
                    && self.body[3] == oui_type
                    && subtype.map_or(true, |subtype| self.body[4] == subtype)
            }
        }
    }

    /// The vendor OUI and OUI type, if this is a well formed vendor specific element.
    pub fn vendor_header(&self) -> Option<(Oui, u8)> {
        if self.id != Id::VENDOR_SPECIFIC || self.body.len() < VENDOR_HDR_LEN {
            return None;
        }
        Some((Oui::new([self.body[0], self.body[1], self.body[2]]), self.body[3]))
    }

    /// Decodes this element into `slot` if it is of the slot's element type.
    /// Returns `None` if the element is of another type.
    pub fn offer<S: ElementSlot>(&self, slot: &mut S) -> Option<Disposition> {
        let kind = <S::Element as Element>::KIND;
        if !self.is_kind(kind) {
            return None;
        }
        let payload = &self.body[kind.prefix_len()..];
        Some(match <S::Element as Element>::parse_body(payload) {
            Ok(element) => slot.store(element),
            Err(e) => Disposition::Malformed(e),
        })
    }
}

pub(crate) fn invalid(id: Id, reason: &'static str) -> FrameParseError {
    FrameParseError::InvalidElement { id: id.0, reason }
}
