// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{capabilities::Features, config::ConfigProvider},
    std::collections::HashMap,
    wlan_frame::mac::{MacAddr, MgmtSubtype},
};

/// Driver-wide state shared by all frame builders. Calls are serialized by the MLME event
/// loop, so the context is passed by mutable reference and never locked.
pub struct LimContext {
    pub config: Box<dyn ConfigProvider>,
    /// Address of the device, used by frames sent without a session.
    pub self_addr: MacAddr,
    pub features: Features,
    /// HT capability of the device, used when no session is at hand.
    pub ht_capable: bool,
    /// A P2P device discovery is in progress.
    pub p2p_search_active: bool,
    tx_counts: HashMap<MgmtSubtype, u64>,
    next_dialog_token: u8,
}

impl LimContext {
    pub fn new(config: Box<dyn ConfigProvider>, self_addr: MacAddr, features: Features) -> Self {
        Self {
            config,
            self_addr,
            features,
            ht_capable: false,
            p2p_search_active: false,
            tx_counts: HashMap::new(),
            next_dialog_token: 1,
        }
    }

    pub fn record_tx(&mut self, subtype: MgmtSubtype) {
        *self.tx_counts.entry(subtype).or_insert(0) += 1;
    }

    /// Number of frames of `subtype` submitted so far.
    pub fn tx_count(&self, subtype: MgmtSubtype) -> u64 {
        self.tx_counts.get(&subtype).copied().unwrap_or(0)
    }

    /// Next dialog token for an action frame exchange. Zero is never handed out.
    pub fn next_dialog_token(&mut self) -> u8 {
        let token = self.next_dialog_token;
        self.next_dialog_token = match token.wrapping_add(1) {
            0 => 1,
            next => next,
        };
        token
    }
}
