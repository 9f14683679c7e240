// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    byteorder::{ByteOrder, LittleEndian},
    std::mem::size_of,
    zerocopy::{ByteSlice, FromBytes, LayoutVerified, Unaligned},
};

/// Reads fixed-size values and byte runs from the front of a byte slice.
///
/// Every read is bounds-checked; a read that does not fit returns `None` and leaves the reader
/// untouched.
pub struct BufferReader<B> {
    buffer: Option<B>,
    bytes_read: usize,
}

impl<B: ByteSlice> BufferReader<B> {
    pub fn new(bytes: B) -> Self {
        BufferReader { buffer: Some(bytes), bytes_read: 0 }
    }

    pub fn read<T: Unaligned + FromBytes>(&mut self) -> Option<LayoutVerified<B, T>> {
        self.read_bytes(size_of::<T>()).and_then(LayoutVerified::new_unaligned)
    }

    pub fn peek<T: Unaligned + FromBytes>(&self) -> Option<LayoutVerified<&[u8], T>> {
        let bytes = self.buffer.as_ref()?;
        if bytes.len() < size_of::<T>() {
            return None;
        }
        LayoutVerified::new_unaligned(&bytes[..size_of::<T>()])
    }

    pub fn read_bytes(&mut self, len: usize) -> Option<B> {
        let buffer = self.buffer.take()?;
        if buffer.len() >= len {
            let (head, tail) = buffer.split_at(len);
            self.buffer = Some(tail);
            self.bytes_read += len;
            Some(head)
        } else {
            self.buffer = Some(buffer);
            None
        }
    }

    pub fn read_byte(&mut self) -> Option<u8> {
        self.read_bytes(1).map(|bytes| bytes[0])
    }

    pub fn read_u16_le(&mut self) -> Option<u16> {
        self.read_bytes(2).map(|bytes| LittleEndian::read_u16(&bytes[..]))
    }

    pub fn read_u32_le(&mut self) -> Option<u32> {
        self.read_bytes(4).map(|bytes| LittleEndian::read_u32(&bytes[..]))
    }

    pub fn read_u64_le(&mut self) -> Option<u64> {
        self.read_bytes(8).map(|bytes| LittleEndian::read_u64(&bytes[..]))
    }

    pub fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        self.read_bytes(N).map(|bytes| {
            let mut out = [0u8; N];
            out.copy_from_slice(&bytes[..]);
            out
        })
    }

    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    pub fn bytes_remaining(&self) -> usize {
        self.buffer.as_ref().map_or(0, |b| b.len())
    }

    pub fn into_remaining(self) -> B {
        match self.buffer {
            Some(buffer) => buffer,
            // The buffer is only taken for the duration of a read.
            None => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, zerocopy::AsBytes};

    #[derive(FromBytes, AsBytes, Unaligned)]
    #[repr(C, packed)]
    struct Foo {
        x: u8,
        y: [u8; 2],
    }

    #[test]
    fn read_and_peek() {
        let bytes = [1u8, 2, 3, 4, 5, 6, 7];
        let mut reader = BufferReader::new(&bytes[..]);
        assert_eq!(reader.peek::<Foo>().expect("peek").x, 1);
        let foo = reader.read::<Foo>().expect("read");
        assert_eq!(foo.y, [2, 3]);
        assert_eq!(reader.read_u16_le(), Some(0x0504));
        assert_eq!(reader.bytes_read(), 5);
        assert_eq!(reader.bytes_remaining(), 2);
        assert!(reader.read_u32_le().is_none());
        assert_eq!(reader.bytes_remaining(), 2);
        assert_eq!(reader.into_remaining(), &[6, 7][..]);
    }

    #[test]
    fn read_array_and_bytes() {
        let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8, 9];
        let mut reader = BufferReader::new(&bytes[..]);
        assert_eq!(reader.read_array::<6>(), Some([1, 2, 3, 4, 5, 6]));
        assert_eq!(reader.read_byte(), Some(7));
        assert!(reader.read_bytes(3).is_none());
        assert_eq!(reader.read_bytes(2), Some(&[8, 9][..]));
        assert!(reader.read_byte().is_none());
    }
}
