// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{
        capabilities::{Features, Role},
        config::ConfigStore,
        context::LimContext,
        device::{
            AllocError, FrameCategory, Packet, PacketHandle, TxCompletion, TxError, TxMeta,
            TxSink, TxStatus,
        },
        session::PeSession,
    },
    std::{cell::RefCell, sync::Once},
    wlan_frame::mac::CapabilityInfo,
};

thread_local! {
    static CAPTURED_LOGS: RefCell<Vec<(log::Level, String)>> = RefCell::new(vec![]);
}

/// Records log lines per thread so each test only sees its own.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        CAPTURED_LOGS.with(|logs| {
            logs.borrow_mut().push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static LOGGER_ONCE: Once = Once::new();

/// Installs the capturing logger and clears the calling thread's captured lines.
pub fn capture_logs() {
    // log::set_logger fails if called more than once.
    LOGGER_ONCE.call_once(|| {
        log::set_logger(&LOGGER).expect("set logger");
        log::set_max_level(log::LevelFilter::Trace);
    });
    CAPTURED_LOGS.with(|logs| logs.borrow_mut().clear());
}

pub fn captured_warnings() -> Vec<String> {
    CAPTURED_LOGS.with(|logs| {
        logs.borrow()
            .iter()
            .filter(|(level, _)| *level == log::Level::Warn)
            .map(|(_, line)| line.clone())
            .collect()
    })
}

pub const BSSID: [u8; 6] = [3; 6];
pub const SELF_ADDR: [u8; 6] = [2; 6];
pub const PEER_ADDR: [u8; 6] = [1; 6];

#[derive(Debug)]
pub struct SubmittedFrame {
    pub handle: PacketHandle,
    /// The submitted bytes, cut to the submitted length.
    pub bytes: Vec<u8>,
    pub meta: TxMeta,
}

/// Records every call made by the transmit buffer manager. Completions run synchronously.
#[derive(Debug, Default)]
pub struct FakeTxSink {
    pub allocs: Vec<usize>,
    /// Packets freed by the caller.
    pub frees: Vec<PacketHandle>,
    /// Packets released by the sink itself after a failed transmission.
    pub released_by_sink: Vec<PacketHandle>,
    pub submitted: Vec<SubmittedFrame>,
    pub completions: Vec<TxStatus>,
    pub fail_alloc: bool,
    pub fail_transmit: bool,
    /// Hands out buffers filled with garbage.
    pub dirty_buffers: bool,
    /// Hands out buffers one byte shorter than requested.
    pub short_buffers: bool,
    next_handle: u64,
}

impl FakeTxSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> &[u8] {
        &self.submitted.last().expect("no frame submitted").bytes[..]
    }
}

impl TxSink for FakeTxSink {
    fn alloc_packet(&mut self, category: FrameCategory, len: usize) -> Result<Packet, AllocError> {
        assert_eq!(category, FrameCategory::MGMT);
        self.allocs.push(len);
        if self.fail_alloc {
            return Err(AllocError { len });
        }
        let fill = if self.dirty_buffers { 0xAA } else { 0 };
        let buf_len = if self.short_buffers { len.saturating_sub(1) } else { len };
        self.next_handle += 1;
        Ok(Packet::new(PacketHandle(self.next_handle), vec![fill; buf_len]))
    }

    fn free_packet(&mut self, category: FrameCategory, packet: Packet) {
        assert_eq!(category, FrameCategory::MGMT);
        self.frees.push(packet.handle());
    }

    fn transmit(
        &mut self,
        packet: Packet,
        len: usize,
        meta: TxMeta,
        on_complete: TxCompletion,
    ) -> Result<(), TxError> {
        if self.fail_transmit {
            self.released_by_sink.push(packet.handle());
            self.completions.push(TxStatus::Failed);
            on_complete(TxStatus::Failed);
            return Err(TxError("queue full".to_string()));
        }
        self.submitted.push(SubmittedFrame {
            handle: packet.handle(),
            bytes: packet.buf()[..len].to_vec(),
            meta,
        });
        self.completions.push(TxStatus::Success);
        on_complete(TxStatus::Success);
        Ok(())
    }
}

pub fn fake_context(features: Features) -> LimContext {
    LimContext::new(Box::new(ConfigStore::new()), SELF_ADDR, features)
}

pub fn fake_sta_session() -> PeSession {
    let mut session = PeSession::from_config(1, Role::Sta, BSSID, SELF_ADDR, &ConfigStore::new())
        .expect("session from default config");
    session.ssid = b"test".to_vec();
    session.channel = 6;
    session.rates = vec![0x82, 0x84, 0x8b, 0x96, 12, 18, 24, 36, 48, 72, 96, 108];
    let mut capabilities = CapabilityInfo::default();
    capabilities.set_ess(true);
    capabilities.set_short_preamble(true);
    session.capabilities = capabilities;
    session
}

pub fn fake_ap_session() -> PeSession {
    let mut session = fake_sta_session();
    session.role = Role::Ap;
    session.self_addr = BSSID;
    session
}
