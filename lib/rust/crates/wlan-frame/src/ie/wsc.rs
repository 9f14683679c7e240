// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Wi-Fi Simple Configuration attributes. Unlike the rest of 802.11, WSC attributes are big
//! endian: `[type: 2][len: 2][body]`.

use {
    super::WscIe,
    byteorder::{BigEndian, ByteOrder},
};

pub const ATTR_VERSION: u16 = 0x104A;
pub const ATTR_WPS_STATE: u16 = 0x1044;
pub const ATTR_RESPONSE_TYPE: u16 = 0x103B;
pub const ATTR_SELECTED_REGISTRAR: u16 = 0x1041;

pub const VERSION_1_0: u8 = 0x10;
pub const WPS_STATE_NOT_CONFIGURED: u8 = 0x01;
pub const WPS_STATE_CONFIGURED: u8 = 0x02;
pub const RESPONSE_TYPE_AP: u8 = 0x03;

const ATTR_HDR_LEN: usize = 4;

fn append_attribute(body: &mut Vec<u8>, attr_type: u16, value: &[u8]) {
    let mut hdr = [0u8; ATTR_HDR_LEN];
    BigEndian::write_u16(&mut hdr[0..2], attr_type);
    BigEndian::write_u16(&mut hdr[2..4], value.len() as u16);
    body.extend_from_slice(&hdr[..]);
    body.extend_from_slice(value);
}

/// The WSC element an AP adds to probe responses when WPS is enabled.
pub fn probe_resp_wsc_ie(wps_state: u8, selected_registrar: bool) -> WscIe {
    let mut body = vec![];
    append_attribute(&mut body, ATTR_VERSION, &[VERSION_1_0]);
    append_attribute(&mut body, ATTR_WPS_STATE, &[wps_state]);
    if selected_registrar {
        append_attribute(&mut body, ATTR_SELECTED_REGISTRAR, &[1]);
    }
    append_attribute(&mut body, ATTR_RESPONSE_TYPE, &[RESPONSE_TYPE_AP]);
    WscIe(body)
}

/// Iterates `(attribute type, value)` pairs of a WSC element body.
pub fn attributes(body: &[u8]) -> impl Iterator<Item = (u16, &[u8])> {
    let mut rest = body;
    std::iter::from_fn(move || {
        if rest.len() < ATTR_HDR_LEN {
            return None;
        }
        let attr_type = BigEndian::read_u16(&rest[0..2]);
        let len = BigEndian::read_u16(&rest[2..4]) as usize;
        if rest.len() - ATTR_HDR_LEN < len {
            return None;
        }
        let value = &rest[ATTR_HDR_LEN..ATTR_HDR_LEN + len];
        rest = &rest[ATTR_HDR_LEN + len..];
        Some((attr_type, value))
    })
}
