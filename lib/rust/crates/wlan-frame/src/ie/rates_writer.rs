// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{ExtSupportedRates, SupportedRates, IE_MAX_LEN, SUPPORTED_RATES_MAX_LEN},
    crate::error::FrameWriteError,
};

/// Distributes a rate set over the Supported Rates element and, past its eighth rate, the
/// Extended Supported Rates element.
pub struct RatesWriter<S>(S);

impl<S: AsRef<[u8]>> RatesWriter<S> {
    pub fn try_new(rates: S) -> Result<RatesWriter<S>, FrameWriteError> {
        let len = rates.as_ref().len();
        if len == 0 {
            Err(FrameWriteError::InvalidField("no rates to write"))
        } else if len > SUPPORTED_RATES_MAX_LEN + IE_MAX_LEN {
            Err(FrameWriteError::InvalidField("rates will not fit in elements"))
        } else {
            Ok(RatesWriter(rates))
        }
    }

    pub fn supported_rates(&self) -> SupportedRates {
        let rates = self.0.as_ref();
        let num_rates = std::cmp::min(rates.len(), SUPPORTED_RATES_MAX_LEN);
        SupportedRates(rates[..num_rates].to_vec())
    }

    pub fn ext_supported_rates(&self) -> Option<ExtSupportedRates> {
        let rates = self.0.as_ref();
        if rates.len() > SUPPORTED_RATES_MAX_LEN {
            Some(ExtSupportedRates(rates[SUPPORTED_RATES_MAX_LEN..].to_vec()))
        } else {
            None
        }
    }
}
