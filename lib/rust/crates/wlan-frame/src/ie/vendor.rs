// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{ElementKind, IE_MAX_LEN, VENDOR_HDR_LEN},
    crate::organization::Oui,
    zerocopy::{AsBytes, FromBytes, Unaligned},
};

pub const WPA_OUI_TYPE: u8 = 0x01;
pub const WSC_OUI_TYPE: u8 = 0x04;
pub const P2P_OUI_TYPE: u8 = 0x09;
pub const CCX_RADIO_MGMT_OUI_TYPE: u8 = 0x01;
pub const CCX_VERSION_OUI_TYPE: u8 = 0x03;

const VENDOR_BODY_MAX_LEN: usize = IE_MAX_LEN - VENDOR_HDR_LEN;

const fn vendor_kind(oui: Oui, oui_type: u8) -> ElementKind {
    ElementKind::Vendor { oui, oui_type, subtype: None }
}

opaque_element!(
    /// WPA1 element, copied verbatim from the security configuration.
    WpaIe, "WPA", vendor_kind(Oui::MSFT, WPA_OUI_TYPE), max: VENDOR_BODY_MAX_LEN
);

opaque_element!(
    /// Wi-Fi Simple Configuration element. The body is a sequence of WSC attributes.
    WscIe, "WSC", vendor_kind(Oui::MSFT, WSC_OUI_TYPE), max: VENDOR_BODY_MAX_LEN
);

opaque_element!(
    /// Wi-Fi P2P element. The body is a sequence of P2P attributes.
    P2pIe, "P2P", vendor_kind(Oui::WFA, P2P_OUI_TYPE), max: VENDOR_BODY_MAX_LEN
);

#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct CcxVersion {
    pub version: u8,
}
fixed_element!(CcxVersion, "CcxVersion", vendor_kind(Oui::CISCO, CCX_VERSION_OUI_TYPE));

#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C, packed)]
pub struct CcxRadioMgmtCap {
    pub mgmt_state: u8,
    pub mbssid_mask: u8,
}
fixed_element!(
    CcxRadioMgmtCap,
    "CcxRadioMgmtCap",
    vendor_kind(Oui::CISCO, CCX_RADIO_MGMT_OUI_TYPE)
);

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::ie::{write_element, Element, RawElement, Reader},
    };

    #[test]
    fn wsc_and_p2p_are_told_apart_by_oui() {
        let mut buf = vec![];
        write_element(&mut buf, &WscIe(vec![0x10, 0x4A, 0x00, 0x01, 0x10])).expect("wsc");
        write_element(&mut buf, &P2pIe(vec![0x02, 0x02, 0x00, 0x21, 0x00])).expect("p2p");
        let elements: Vec<RawElement<'_>> =
            Reader::new(&buf[..]).collect::<Result<_, _>>().expect("well formed");
        assert!(elements[0].is_kind(WscIe::KIND));
        assert!(!elements[0].is_kind(P2pIe::KIND));
        assert!(elements[1].is_kind(P2pIe::KIND));
        assert_eq!(elements[1].body.len(), 9);
    }

    #[test]
    fn ccx_version() {
        let mut buf = vec![];
        write_element(&mut buf, &CcxVersion { version: 4 }).expect("ccx version");
        assert_eq!(buf, [221, 5, 0x00, 0x40, 0x96, 0x03, 0x04]);
    }
}
