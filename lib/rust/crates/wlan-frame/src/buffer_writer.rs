// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::appendable::{Appendable, BufferTooSmall},
    std::mem::size_of,
    zerocopy::{AsBytes, FromBytes, LayoutVerified, Unaligned},
};

pub use zerocopy::ByteSliceMut;

/// Writes into a fixed-capacity byte slice. Never grows and never writes past the end of the
/// slice it was created with.
pub struct BufferWriter<B> {
    buf: B,
    written: usize,
}

impl<B: ByteSliceMut> BufferWriter<B> {
    pub fn new(buf: B) -> Self {
        Self { buf, written: 0 }
    }

    pub fn append_value_zeroed<T>(&mut self) -> Result<LayoutVerified<&mut [u8], T>, BufferTooSmall>
    where
        T: FromBytes + AsBytes + Unaligned,
    {
        let bytes = self.next_mut_slice(size_of::<T>())?;
        LayoutVerified::new_unaligned_zeroed(bytes).ok_or(BufferTooSmall)
    }

    pub fn append_bytes_zeroed(&mut self, len: usize) -> Result<&mut [u8], BufferTooSmall> {
        let bytes = self.next_mut_slice(len)?;
        for b in bytes.iter_mut() {
            *b = 0;
        }
        Ok(bytes)
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.written
    }

    pub fn into_written(self) -> B {
        let written = self.written;
        self.buf.split_at(written).0
    }

    fn next_mut_slice(&mut self, len: usize) -> Result<&mut [u8], BufferTooSmall> {
        if self.remaining() < len {
            return Err(BufferTooSmall);
        }
        let start = self.written;
        self.written += len;
        Ok(&mut self.buf[start..start + len])
    }
}

impl<B: ByteSliceMut> Appendable for BufferWriter<B> {
    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferTooSmall> {
        self.next_mut_slice(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    fn bytes_written(&self) -> usize {
        self.written
    }

    fn can_append(&self, bytes: usize) -> bool {
        self.remaining() >= bytes
    }
}
