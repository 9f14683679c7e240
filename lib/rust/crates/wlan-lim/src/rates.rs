// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Rate sets advertised in frames sent without a negotiated rate set.

use {
    crate::{
        capabilities::Dot11Mode,
        config::{CfgKey, ConfigProvider},
        error::Error,
    },
    wlan_frame::{
        ie::{ExtSupportedRates, SupportedRates, SUPPORTED_RATES_MAX_LEN},
        mac,
    },
};

/// Supported Rates and optional Extended Supported Rates elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rates {
    pub supported: SupportedRates,
    pub extended: Option<ExtSupportedRates>,
}

fn rate_set(config: &dyn ConfigProvider, key: CfgKey) -> Result<Vec<u8>, Error> {
    let mut rates = config.get_str(key)?;
    rates.truncate(SUPPORTED_RATES_MAX_LEN);
    Ok(rates)
}

/// Rates of a probe request sent on `channel`.
///
/// P2P probes never use 11b rates. Otherwise 5 GHz channels get the 11a set and 2.4 GHz channels
/// the 11b set, followed by the OFDM rates as extended rates unless the mode is 11b only.
pub fn probe_request_rates(
    config: &dyn ConfigProvider,
    channel: u8,
    mode: Dot11Mode,
    p2p: bool,
) -> Result<Rates, Error> {
    if p2p || mac::is_5ghz_channel(channel) {
        return Ok(Rates {
            supported: SupportedRates(rate_set(config, CfgKey::SupportedRates11a)?),
            extended: None,
        });
    }
    let supported = SupportedRates(rate_set(config, CfgKey::SupportedRates11b)?);
    let extended = if mode.is_11b_only() {
        None
    } else {
        Some(ExtSupportedRates(rate_set(config, CfgKey::SupportedRates11a)?))
    };
    Ok(Rates { supported, extended })
}
