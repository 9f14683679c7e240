// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    std::fmt,
    zerocopy::{AsBytes, FromBytes, Unaligned},
};

/// Organizationally Unique Identifier leading the body of a vendor specific element.
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Oui([u8; 3]);

impl Oui {
    pub const MSFT: Self = Self([0x00, 0x50, 0xF2]);
    pub const WFA: Self = Self([0x50, 0x6F, 0x9A]);
    pub const CISCO: Self = Self([0x00, 0x40, 0x96]);
    pub const DOT11: Self = Self([0x00, 0x0F, 0xAC]);

    pub const fn new(oui: [u8; 3]) -> Self {
        Self(oui)
    }

    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }
}

impl fmt::Debug for Oui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}:{:02x}:{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Oui::WFA), "50:6f:9a");
        assert_eq!(Oui::new([0, 0x50, 0xf2]), Oui::MSFT);
    }
}
