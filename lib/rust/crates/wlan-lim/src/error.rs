// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::config::ConfigError,
    thiserror::Error,
    wlan_frame::{appendable::BufferTooSmall, mac::MacAddr, FrameWriteError},
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("out of buffers; requested {0} bytes")]
    NoResources(usize),
    #[error("error packing frame: {0}")]
    PackFailed(#[source] FrameWriteError),
    #[error("provided buffer too small")]
    BufferTooSmall,
    #[error("transmit failed: {0}")]
    TxFailed(String),
    #[error("no session for BSS {0:02x?}")]
    MissingSession(MacAddr),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl From<FrameWriteError> for Error {
    fn from(e: FrameWriteError) -> Self {
        Error::PackFailed(e)
    }
}

impl From<BufferTooSmall> for Error {
    fn from(_: BufferTooSmall) -> Self {
        Error::BufferTooSmall
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::config::CfgKey, anyhow::format_err};

    #[test]
    fn error_messages() {
        assert_eq!(format!("{}", Error::NoResources(42)), "out of buffers; requested 42 bytes");
        assert_eq!(
            format!("{}", Error::from(FrameWriteError::BufferTooSmall)),
            "error packing frame: buffer is too small"
        );
        assert_eq!(
            format!("{}", Error::MissingSession([1, 2, 3, 4, 5, 0xab])),
            "no session for BSS [01, 02, 03, 04, 05, ab]"
        );
        assert_eq!(format!("{}", Error::from(format_err!("lorem"))), "lorem");
    }

    #[test]
    fn config_errors_convert() {
        let e: Error = ConfigError::NotFound(CfgKey::BeaconInterval).into();
        assert!(matches!(e, Error::Config(ConfigError::NotFound(CfgKey::BeaconInterval))));
    }
}
