// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {crate::appendable::BufferTooSmall, thiserror::Error};

/// A non-fatal anomaly noticed while sizing or packing a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecWarning {
    /// An element body is longer than its type allows but still fits the 255 byte wire limit.
    BodyExceedsLimit { element: &'static str, len: usize, limit: usize },
    /// A reserved bit or field was nonzero.
    ReservedBitsSet { element: &'static str },
    /// Two alternative encodings of the same parameter were both present.
    ConflictingElements { first: &'static str, second: &'static str },
}

/// Outcome of a successful size computation or pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packed {
    Ok(usize),
    Warned(usize, Vec<CodecWarning>),
}

impl Packed {
    pub fn new(len: usize, warnings: Vec<CodecWarning>) -> Self {
        if warnings.is_empty() {
            Packed::Ok(len)
        } else {
            Packed::Warned(len, warnings)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Packed::Ok(len) | Packed::Warned(len, _) => *len,
        }
    }

    pub fn warnings(&self) -> &[CodecWarning] {
        match self {
            Packed::Ok(_) => &[],
            Packed::Warned(_, warnings) => &warnings[..],
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameWriteError {
    #[error("buffer is too small")]
    BufferTooSmall,
    #[error("element {id} body of {len} bytes does not fit in an element")]
    ElementTooLong { id: u8, len: usize },
    #[error("{count} {element} elements exceed the maximum of {max}")]
    TooManyElements { element: &'static str, count: usize, max: usize },
    #[error("invalid {0}")]
    InvalidField(&'static str),
}

impl From<BufferTooSmall> for FrameWriteError {
    fn from(_: BufferTooSmall) -> Self {
        FrameWriteError::BufferTooSmall
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameParseError {
    #[error("frame too short: {needed} bytes needed, {available} available")]
    TooShort { needed: usize, available: usize },
    #[error(
        "element {id} at offset {offset} declares {declared} bytes, only {remaining} remain"
    )]
    TruncatedElement { offset: usize, id: u8, declared: usize, remaining: usize },
    #[error("incomplete element header at offset {offset}")]
    IncompleteElementHeader { offset: usize },
    #[error("vendor element at offset {offset} has a {len} byte body, too short for an OUI")]
    MalformedVendorIe { offset: usize, len: usize },
    #[error("invalid element {id}: {reason}")]
    InvalidElement { id: u8, reason: &'static str },
    #[error("not a management frame: type {frame_type}")]
    NotManagement { frame_type: u16 },
    #[error("unexpected action frame: category {category}, action {action}")]
    UnexpectedAction { category: u8, action: u8 },
    #[error("invalid {0}")]
    InvalidField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_without_warnings_is_ok() {
        assert_eq!(Packed::new(12, vec![]), Packed::Ok(12));
        let warned = Packed::new(
            40,
            vec![CodecWarning::BodyExceedsLimit { element: "SSID", len: 33, limit: 32 }],
        );
        assert_eq!(warned.len(), 40);
        assert_eq!(warned.warnings().len(), 1);
    }

    #[test]
    fn truncated_element_message() {
        let e = FrameParseError::TruncatedElement { offset: 36, id: 0, declared: 10, remaining: 4 };
        assert_eq!(
            format!("{}", e),
            "element 0 at offset 36 declares 10 bytes, only 4 remain"
        );
    }
}
