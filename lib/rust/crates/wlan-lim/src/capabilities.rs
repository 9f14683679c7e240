// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Runtime capability set of the driver.

use {
    bitflags::bitflags,
    num_derive::{FromPrimitive, ToPrimitive},
    num_traits::FromPrimitive,
};

bitflags! {
    /// Optional protocol features. A builder only emits the elements of a feature that is set.
    #[derive(Default)]
    pub struct Features: u32 {
        const P2P = 1 << 0;
        const CCX = 1 << 1;
        /// Fast BSS transition.
        const DOT11R = 1 << 2;
        /// Radio resource management.
        const DOT11K = 1 << 3;
        const DOT11AC = 1 << 4;
        const WAPI = 1 << 5;
        /// Spectrum management.
        const DOT11H = 1 << 6;
        /// Management frame protection.
        const DOT11W = 1 << 7;
    }
}

/// The persona a session operates in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Ap,
    Sta,
    P2pGo,
    P2pClient,
    Ibss,
}

impl Role {
    pub fn is_ap(&self) -> bool {
        matches!(self, Role::Ap | Role::P2pGo)
    }

    pub fn is_p2p(&self) -> bool {
        matches!(self, Role::P2pGo | Role::P2pClient)
    }
}

/// PHY mode, as stored in the dot11 mode configuration value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum Dot11Mode {
    All = 0,
    A = 1,
    B = 2,
    G = 3,
    N = 4,
    GOnly = 8,
    NOnly = 9,
    Ac = 10,
    AcOnly = 11,
}

impl Dot11Mode {
    pub fn from_cfg(value: u32) -> Option<Self> {
        Self::from_u32(value)
    }

    pub fn is_11b_only(&self) -> bool {
        *self == Dot11Mode::B
    }

    pub fn supports_ht(&self) -> bool {
        matches!(
            self,
            Dot11Mode::All | Dot11Mode::N | Dot11Mode::NOnly | Dot11Mode::Ac | Dot11Mode::AcOnly
        )
    }

    pub fn supports_vht(&self) -> bool {
        matches!(self, Dot11Mode::All | Dot11Mode::Ac | Dot11Mode::AcOnly)
    }
}

impl Default for Dot11Mode {
    fn default() -> Self {
        Dot11Mode::All
    }
}
