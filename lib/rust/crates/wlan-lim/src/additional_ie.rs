// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Raw element blobs supplied by upper layers or configuration, appended after the packed body.

use {
    crate::{
        config::{CfgKey, ConfigProvider},
        error::Error,
    },
    log::debug,
    wlan_frame::{
        ie::{
            find_vendor_ie, p2p::NoticeOfAbsence, strip_vendor_ies, write_element, P2P_OUI_TYPE,
            WSC_OUI_TYPE,
        },
        organization::Oui,
    },
};

pub fn has_wsc(ies: &[u8]) -> bool {
    find_vendor_ie(ies, Oui::MSFT, WSC_OUI_TYPE).is_some()
}

pub fn has_p2p(ies: &[u8]) -> bool {
    find_vendor_ie(ies, Oui::WFA, P2P_OUI_TYPE).is_some()
}

/// Additional elements of a probe response, taken from the three configured data blocks.
///
/// P2P elements are removed unless the probe request carried one. Caller supplied P2P elements
/// are otherwise kept as they are and never merged with the Notice of Absence element.
pub fn probe_resp_additional_ies(
    config: &dyn ConfigProvider,
    probe_req_has_p2p: bool,
) -> Result<Vec<u8>, Error> {
    if config.get_int(CfgKey::ProbeRspAddnIeFlag)? == 0 {
        return Ok(vec![]);
    }
    const BLOCKS: [CfgKey; 3] =
        [CfgKey::ProbeRspAddnIeData1, CfgKey::ProbeRspAddnIeData2, CfgKey::ProbeRspAddnIeData3];
    let mut ies = vec![];
    for key in BLOCKS.iter() {
        ies.extend_from_slice(&config.get_str(*key)?[..]);
    }
    if !probe_req_has_p2p && has_p2p(&ies[..]) {
        debug!("probe request carried no P2P element; stripping P2P from probe response");
        ies = strip_vendor_ies(&ies[..], Oui::WFA, P2P_OUI_TYPE);
    }
    Ok(ies)
}

pub fn assoc_resp_additional_ies(config: &dyn ConfigProvider) -> Result<Vec<u8>, Error> {
    if config.get_int(CfgKey::AssocRspAddnIeFlag)? == 0 {
        return Ok(vec![]);
    }
    Ok(config.get_str(CfgKey::AssocRspAddnIeData)?)
}

/// A complete P2P element carrying only `noa`, ready to be sent as a frame trailer.
pub fn noa_ie(noa: &NoticeOfAbsence) -> Result<Vec<u8>, Error> {
    let mut bytes = vec![];
    write_element(&mut bytes, &noa.to_p2p_ie())?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::config::ConfigStore,
        wlan_frame::ie::p2p::NoaDescriptor,
    };

    #[rustfmt::skip]
    const P2P_IE: [u8; 11] = [
        221, 9, 0x50, 0x6F, 0x9A, 0x09, // P2P element header
        0x02, 0x02, 0x00, 0x21, 0x00, // P2P capability attribute
    ];

    #[rustfmt::skip]
    const WSC_IE: [u8; 11] = [
        221, 9, 0x00, 0x50, 0xF2, 0x04, // WSC element header
        0x10, 0x4A, 0x00, 0x01, 0x10, // version 1.0
    ];

    fn config_with_blocks(data1: &[u8], data2: &[u8]) -> ConfigStore {
        let mut config = ConfigStore::new();
        config.set_int(CfgKey::ProbeRspAddnIeFlag, 1).expect("flag");
        config.set_str(CfgKey::ProbeRspAddnIeData1, data1).expect("data1");
        config.set_str(CfgKey::ProbeRspAddnIeData2, data2).expect("data2");
        config
    }

    #[test]
    fn vendor_lookups() {
        assert!(has_p2p(&P2P_IE[..]));
        assert!(!has_wsc(&P2P_IE[..]));
        assert!(has_wsc(&WSC_IE[..]));
        assert!(!has_p2p(&[]));
    }

    #[test]
    fn probe_resp_ies_disabled() {
        let mut config = config_with_blocks(&WSC_IE[..], &P2P_IE[..]);
        config.set_int(CfgKey::ProbeRspAddnIeFlag, 0).expect("flag");
        assert_eq!(probe_resp_additional_ies(&config, true).expect("ies"), Vec::<u8>::new());
    }

    #[test]
    fn probe_resp_ies_keep_p2p_for_p2p_probe() {
        let config = config_with_blocks(&WSC_IE[..], &P2P_IE[..]);
        let ies = probe_resp_additional_ies(&config, true).expect("ies");
        assert_eq!(ies.len(), WSC_IE.len() + P2P_IE.len());
        assert_eq!(&ies[WSC_IE.len()..], &P2P_IE[..]);
    }

    #[test]
    fn probe_resp_ies_strip_p2p_for_legacy_probe() {
        let config = config_with_blocks(&P2P_IE[..], &WSC_IE[..]);
        let ies = probe_resp_additional_ies(&config, false).expect("ies");
        assert_eq!(ies, WSC_IE.to_vec());
    }

    #[test]
    fn assoc_resp_ies() {
        let mut config = ConfigStore::new();
        config.set_str(CfgKey::AssocRspAddnIeData, &WSC_IE[..]).expect("data");
        assert!(assoc_resp_additional_ies(&config).expect("ies").is_empty());
        config.set_int(CfgKey::AssocRspAddnIeFlag, 1).expect("flag");
        assert_eq!(assoc_resp_additional_ies(&config).expect("ies"), WSC_IE.to_vec());
    }

    #[test]
    fn noa_ie_bytes() {
        let noa = NoticeOfAbsence {
            index: 1,
            ct_window: 10,
            opp_ps: true,
            descriptors: vec![NoaDescriptor {
                count: 255,
                duration: 50,
                interval: 100,
                start_time: 0x1000,
            }],
        };
        let bytes = noa_ie(&noa).expect("noa");
        #[rustfmt::skip]
        let expected = vec![
            221, 22, 0x50, 0x6F, 0x9A, 0x09, // P2P element header
            12, 15, 0, // NoA attribute id and length
            1, 0x8A, // index, CT window with OppPS
            255, // count
            50, 0, 0, 0, // duration
            100, 0, 0, 0, // interval
            0x00, 0x10, 0, 0, // start time
        ];
        assert_eq!(bytes, expected);
        assert!(has_p2p(&bytes[..]));
    }
}
