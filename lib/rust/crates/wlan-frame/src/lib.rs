// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Crate wlan-frame encodes and decodes 802.11 management frames.
//!
//! Frame bodies are described by structured descriptors (see `frame`) made of fixed fields and
//! optional information elements (see `ie`). Descriptors report their packed size through a dry
//! run of the same code that packs them, so the size used to allocate a transmit buffer always
//! matches the bytes written into it.

/// Generates little-endian getters and setters for byte array fields of zerocopy structs.
#[macro_export]
macro_rules! le_accessors {
    ($($field:ident, $setter:ident: $ty:ty, $read:ident, $write:ident;)*) => {
        $(
            pub fn $field(&self) -> $ty {
                <::byteorder::LittleEndian as ::byteorder::ByteOrder>::$read(&self.$field)
            }

            pub fn $setter(&mut self, value: $ty) {
                <::byteorder::LittleEndian as ::byteorder::ByteOrder>::$write(
                    &mut self.$field,
                    value,
                )
            }
        )*
    };
}

pub mod appendable;
pub mod buffer_reader;
pub mod buffer_writer;
pub mod error;
pub mod frame;
pub mod ie;
pub mod mac;
pub mod mgmt_writer;
pub mod organization;
pub mod parser;

pub use error::{CodecWarning, FrameParseError, FrameWriteError, Packed};

#[macro_export]
macro_rules! assert_variant {
    ($test:expr, $variant:pat => $e:expr, $fmt:expr $(, $args:expr)* $(,)?) => {
        match $test {
            $variant => $e,
            other => panic!(
                "unexpected variant: {:?}: {}", other, format!($fmt $(, $args)*)
            ),
        }
    };
    ($test:expr, $variant:pat => $e:expr $(,)?) => {
        match $test {
            $variant => $e,
            other => panic!("unexpected variant: {:?}", other),
        }
    };
    ($test:expr, $variant:pat $(,)?) => {
        match $test {
            $variant => (),
            other => panic!("unexpected variant: {:?}", other),
        }
    };
}
