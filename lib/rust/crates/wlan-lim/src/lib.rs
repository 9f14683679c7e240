// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Link management frame builders.
//!
//! Each `send_*` entry point reads session, capability and configuration state, fills a frame
//! descriptor from `wlan_frame`, and hands it to the transmit buffer manager in `buffer`, which
//! sizes it, allocates one transmit buffer, writes the MAC header and body and submits it.

pub mod additional_ie;
pub mod buffer;
pub mod capabilities;
pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod populate;
pub mod rates;
pub mod send;
pub mod session;

#[cfg(test)]
pub mod test_utils;

pub use {
    context::LimContext,
    error::Error,
    send::{MissingSessionPolicy, SendOutcome},
};
