// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Contract with the lower MAC transmit path.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxFlags(pub u32);
impl TxFlags {
    pub const NONE: Self = Self(0);
    /// Send management frames at the second (OFDM) rate set.
    pub const USE_RATE2: Self = Self(1);
    pub const PROTECTED: Self = Self(1 << 1);

    pub fn contains(&self, flags: TxFlags) -> bool {
        self.0 & flags.0 == flags.0
    }
}

impl std::ops::BitOr for TxFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameCategory(pub u8);
impl FrameCategory {
    pub const MGMT: Self = Self(0);
    pub const DATA: Self = Self(1);
}

/// Queue priority of management frames.
pub const MGMT_PRIORITY: u8 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxMeta {
    pub category: FrameCategory,
    pub priority: u8,
    pub flags: TxFlags,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PacketHandle(pub u64);

/// A transmit buffer handed out by the sink.
#[derive(Debug)]
pub struct Packet {
    handle: PacketHandle,
    buf: Vec<u8>,
}

impl Packet {
    pub fn new(handle: PacketHandle, buf: Vec<u8>) -> Self {
        Self { handle, buf }
    }

    pub fn handle(&self) -> PacketHandle {
        self.handle
    }

    pub fn buf(&self) -> &[u8] {
        &self.buf[..]
    }

    pub fn buf_mut(&mut self) -> &mut [u8] {
        &mut self.buf[..]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxStatus {
    Success,
    Failed,
}

/// Invoked exactly once per submitted packet, after the sink is done with it.
pub type TxCompletion = Box<dyn FnOnce(TxStatus)>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no packet of {len} bytes available")]
pub struct AllocError {
    pub len: usize,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TxError(pub String);

/// Allocates, frees and transmits packets.
///
/// A packet passed to `transmit` belongs to the sink from then on, whether or not the call
/// succeeds. The sink releases it and reports the outcome through the completion.
pub trait TxSink {
    fn alloc_packet(&mut self, category: FrameCategory, len: usize) -> Result<Packet, AllocError>;

    fn free_packet(&mut self, category: FrameCategory, packet: Packet);

    fn transmit(
        &mut self,
        packet: Packet,
        len: usize,
        meta: TxMeta,
        on_complete: TxCompletion,
    ) -> Result<(), TxError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_flags() {
        let flags = TxFlags::USE_RATE2 | TxFlags::PROTECTED;
        assert!(flags.contains(TxFlags::USE_RATE2));
        assert!(flags.contains(TxFlags::PROTECTED));
        assert!(!TxFlags::NONE.contains(TxFlags::USE_RATE2));
        assert!(TxFlags::USE_RATE2.contains(TxFlags::NONE));
    }
}
