// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    byteorder::{ByteOrder, LittleEndian},
    thiserror::Error,
    zerocopy::AsBytes,
};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("buffer is too small")]
pub struct BufferTooSmall;

/// A sink that frame fields are serialized into.
///
/// All multi-byte integers are written in little-endian order, independent of the host.
pub trait Appendable {
    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferTooSmall>;

    fn bytes_written(&self) -> usize;

    fn can_append(&self, bytes: usize) -> bool;

    fn append_value<T: AsBytes + ?Sized>(&mut self, value: &T) -> Result<(), BufferTooSmall> {
        self.append_bytes(value.as_bytes())
    }

    fn append_byte(&mut self, byte: u8) -> Result<(), BufferTooSmall> {
        self.append_bytes(&[byte])
    }

    fn append_u16_le(&mut self, value: u16) -> Result<(), BufferTooSmall> {
        let mut bytes = [0u8; 2];
        LittleEndian::write_u16(&mut bytes, value);
        self.append_bytes(&bytes)
    }

    fn append_u32_le(&mut self, value: u32) -> Result<(), BufferTooSmall> {
        let mut bytes = [0u8; 4];
        LittleEndian::write_u32(&mut bytes, value);
        self.append_bytes(&bytes)
    }

    fn append_u64_le(&mut self, value: u64) -> Result<(), BufferTooSmall> {
        let mut bytes = [0u8; 8];
        LittleEndian::write_u64(&mut bytes, value);
        self.append_bytes(&bytes)
    }
}

impl Appendable for Vec<u8> {
    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferTooSmall> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn bytes_written(&self) -> usize {
        self.len()
    }

    fn can_append(&self, _bytes: usize) -> bool {
        true
    }
}

/// Counts appended bytes without storing them. Used for the dry-run size pass.
#[derive(Debug, Default)]
pub struct LenCounter {
    len: usize,
}

impl LenCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Appendable for LenCounter {
    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferTooSmall> {
        self.len = self.len.checked_add(bytes.len()).ok_or(BufferTooSmall)?;
        Ok(())
    }

    fn bytes_written(&self) -> usize {
        self.len
    }

    fn can_append(&self, bytes: usize) -> bool {
        self.len.checked_add(bytes).is_some()
    }
}
