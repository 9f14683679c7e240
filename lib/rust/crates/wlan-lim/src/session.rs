// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Per-BSS session state read by the frame builders.

use {
    crate::{
        capabilities::{Dot11Mode, Role},
        config::{CfgKey, ConfigProvider},
        error::Error,
    },
    anyhow::format_err,
    log::debug,
    wlan_frame::{
        ie::{AcParams, MobilityDomain},
        mac::{self, CapabilityInfo, MacAddr},
    },
};

/// MLME state of a session, as far as frame transmission is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MlmState {
    Idle,
    WaitProbeResponse,
    WaitAuthFrame2,
    WaitAuthFrame4,
    WaitAssocResponse,
    WaitReassocResponse,
    LinkEstablished,
    BssStarted,
}

impl Default for MlmState {
    fn default() -> Self {
        MlmState::Idle
    }
}

/// QoS schemes enabled on a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QosFlags {
    /// 802.11e QoS.
    pub lle_enabled: bool,
    /// WMM.
    pub wme_enabled: bool,
    /// WMM-SA power save.
    pub wsm_enabled: bool,
}

/// What the BSS advertised in its beacon or probe response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BssDescription {
    /// The AP runs the vendor's 802.11e QoS extension.
    pub ani_11e_qos: bool,
    pub wme: bool,
    pub wsm: bool,
    pub ht_cap: bool,
    pub vht_cap: bool,
}

/// A station known to an AP session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PeerSta {
    pub addr: MacAddr,
    pub aid: u16,
    pub lle_enabled: bool,
    pub wme_enabled: bool,
    pub wsm_enabled: bool,
    /// The peer runs the vendor's 802.11e QoS extension.
    pub ani_peer: bool,
    pub ht_capable: bool,
    pub vht_capable: bool,
}

/// EDCA parameters advertised by an AP, in AC_BE, AC_BK, AC_VI, AC_VO order.
pub const DEFAULT_AC_PARAMS: [AcParams; 4] = [
    AcParams { aci_aifsn: 0x03, ecw_min_max: 0xA4, txop_limit: [0, 0] },
    AcParams { aci_aifsn: 0x27, ecw_min_max: 0xA4, txop_limit: [0, 0] },
    AcParams { aci_aifsn: 0x42, ecw_min_max: 0x43, txop_limit: [94, 0] },
    AcParams { aci_aifsn: 0x62, ecw_min_max: 0x32, txop_limit: [47, 0] },
];

#[derive(Clone, Debug)]
pub struct PeSession {
    pub session_id: u8,
    pub bssid: MacAddr,
    pub self_addr: MacAddr,
    pub ssid: Vec<u8>,
    pub role: Role,
    pub channel: u8,
    pub dot11_mode: Dot11Mode,
    pub capabilities: CapabilityInfo,
    pub beacon_interval: u16,
    pub listen_interval: u16,
    /// Operational rate set, basic rates marked with bit 7.
    pub rates: Vec<u8>,
    pub ht_enabled: bool,
    pub vht_enabled: bool,
    pub qos: QosFlags,
    pub ac_params: [AcParams; 4],
    pub rm_enabled: bool,
    pub spectrum_mgmt: bool,
    pub ccx_enabled: bool,
    /// Management frame protection negotiated with the peer.
    pub pmf_enabled: bool,
    /// RSNE, WPA or WAPI elements to advertise, as raw element bytes.
    pub security_ies: Vec<u8>,
    pub mobility_domain: Option<MobilityDomain>,
    /// Fast BSS transition element for the next reassociation.
    pub fte: Option<Vec<u8>>,
    pub bss: BssDescription,
    assoc_req: Option<Vec<u8>>,
    mlm_state: MlmState,
    prev_mlm_state: MlmState,
}

impl PeSession {
    pub fn new(session_id: u8, role: Role, bssid: MacAddr, self_addr: MacAddr) -> Self {
        Self {
            session_id,
            bssid,
            self_addr,
            ssid: vec![],
            role,
            channel: 1,
            dot11_mode: Dot11Mode::All,
            capabilities: CapabilityInfo::default(),
            beacon_interval: 100,
            listen_interval: 1,
            rates: vec![],
            ht_enabled: false,
            vht_enabled: false,
            qos: QosFlags::default(),
            ac_params: DEFAULT_AC_PARAMS,
            rm_enabled: false,
            spectrum_mgmt: false,
            ccx_enabled: false,
            pmf_enabled: false,
            security_ies: vec![],
            mobility_domain: None,
            fte: None,
            bss: BssDescription::default(),
            assoc_req: None,
            mlm_state: MlmState::Idle,
            prev_mlm_state: MlmState::Idle,
        }
    }

    /// A session whose PHY mode, beacon interval and listen interval are read from `config`.
    pub fn from_config(
        session_id: u8,
        role: Role,
        bssid: MacAddr,
        self_addr: MacAddr,
        config: &dyn ConfigProvider,
    ) -> Result<Self, Error> {
        let mode = config.get_int(CfgKey::Dot11Mode)?;
        let dot11_mode =
            Dot11Mode::from_cfg(mode).ok_or_else(|| format_err!("unknown dot11 mode {}", mode))?;
        Ok(Self {
            dot11_mode,
            beacon_interval: config.get_u16(CfgKey::BeaconInterval)?,
            listen_interval: config.get_u16(CfgKey::ListenInterval)?,
            ..Self::new(session_id, role, bssid, self_addr)
        })
    }

    pub fn is_5ghz(&self) -> bool {
        mac::is_5ghz_channel(self.channel)
    }

    /// Keeps a copy of the last (re)association request body sent on this session.
    pub fn store_assoc_req(&mut self, body: &[u8]) {
        self.assoc_req = Some(body.to_vec());
    }

    pub fn assoc_req(&self) -> Option<&[u8]> {
        self.assoc_req.as_ref().map(|body| &body[..])
    }

    pub fn mlm_state(&self) -> MlmState {
        self.mlm_state
    }

    pub fn set_mlm_state(&mut self, state: MlmState) {
        self.prev_mlm_state = self.mlm_state;
        self.mlm_state = state;
    }

    pub fn restore_prev_mlm_state(&mut self) {
        debug!(
            "session {}: restoring MLM state {:?} over {:?}",
            self.session_id, self.prev_mlm_state, self.mlm_state
        );
        self.mlm_state = self.prev_mlm_state;
    }
}

/// Sessions known to the driver, looked up by BSSID.
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: Vec<PeSession>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session, replacing any session with the same BSSID.
    pub fn insert(&mut self, session: PeSession) {
        self.sessions.retain(|s| s.bssid != session.bssid);
        self.sessions.push(session);
    }

    pub fn remove(&mut self, bssid: &MacAddr) -> Option<PeSession> {
        let idx = self.sessions.iter().position(|s| &s.bssid == bssid)?;
        Some(self.sessions.remove(idx))
    }

    pub fn find_session_by_bssid(&self, bssid: &MacAddr) -> Option<&PeSession> {
        self.sessions.iter().find(|s| &s.bssid == bssid)
    }

    pub fn find_session_by_bssid_mut(&mut self, bssid: &MacAddr) -> Option<&mut PeSession> {
        self.sessions.iter_mut().find(|s| &s.bssid == bssid)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::config::{ConfigError, ConfigStore},
        wlan_frame::assert_variant,
    };

    #[test]
    fn session_from_config() {
        let config = ConfigStore::from_json(
            r#"{"dot11_mode": 2, "beacon_interval": 200, "listen_interval": 10}"#,
        )
        .expect("valid overrides");
        let session = PeSession::from_config(1, Role::Sta, [1; 6], [2; 6], &config)
            .expect("session from config");
        assert_eq!(session.dot11_mode, Dot11Mode::B);
        assert_eq!(session.beacon_interval, 200);
        assert_eq!(session.listen_interval, 10);
        assert_eq!(session.mlm_state(), MlmState::Idle);

        let session = PeSession::from_config(1, Role::Sta, [1; 6], [2; 6], &ConfigStore::new())
            .expect("session from defaults");
        assert_eq!(session.dot11_mode, Dot11Mode::All);
        assert_eq!(session.listen_interval, 1);
    }

    #[test]
    fn session_from_config_with_unknown_mode() {
        let mut config = ConfigStore::new();
        config.set_int(CfgKey::Dot11Mode, 5).expect("in range");
        let result = PeSession::from_config(1, Role::Sta, [1; 6], [2; 6], &config);
        let e = assert_variant!(result, Err(Error::Internal(e)) => e);
        assert_eq!(e.to_string(), "unknown dot11 mode 5");

        let result = PeSession::from_config(1, Role::Sta, [1; 6], [2; 6], &NoConfig);
        assert_variant!(result, Err(Error::Config(ConfigError::NotFound(CfgKey::Dot11Mode))));
    }

    struct NoConfig;

    impl ConfigProvider for NoConfig {
        fn get_int(&self, key: CfgKey) -> Result<u32, ConfigError> {
            Err(ConfigError::NotFound(key))
        }

        fn get_str(&self, key: CfgKey) -> Result<Vec<u8>, ConfigError> {
            Err(ConfigError::NotFound(key))
        }
    }

    #[test]
    fn default_ac_params() {
        let [be, bk, vi, vo] = DEFAULT_AC_PARAMS;
        assert_eq!((be.aci(), be.aifsn(), be.ecw_min(), be.ecw_max()), (0, 3, 4, 10));
        assert_eq!((bk.aci(), bk.aifsn()), (1, 7));
        assert_eq!((vi.aci(), vi.aifsn(), vi.txop_limit()), (2, 2, 94));
        assert_eq!(
            (vo.aci(), vo.aifsn(), vo.ecw_min(), vo.ecw_max(), vo.txop_limit()),
            (3, 2, 2, 3, 47)
        );
    }

    #[test]
    fn restore_mlm_state() {
        let mut session = PeSession::new(0, Role::Sta, [1; 6], [2; 6]);
        session.set_mlm_state(MlmState::LinkEstablished);
        session.set_mlm_state(MlmState::WaitReassocResponse);
        session.restore_prev_mlm_state();
        assert_eq!(session.mlm_state(), MlmState::LinkEstablished);
    }

    #[test]
    fn store_assoc_req() {
        let mut session = PeSession::new(0, Role::Sta, [1; 6], [2; 6]);
        assert_eq!(session.assoc_req(), None);
        session.store_assoc_req(&[1, 2, 3]);
        assert_eq!(session.assoc_req(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn find_session() {
        let mut table = SessionTable::new();
        table.insert(PeSession::new(0, Role::Sta, [1; 6], [9; 6]));
        table.insert(PeSession::new(1, Role::Ap, [2; 6], [9; 6]));
        table.insert(PeSession::new(2, Role::Ap, [2; 6], [9; 6]));
        assert_eq!(table.find_session_by_bssid(&[1; 6]).map(|s| s.session_id), Some(0));
        assert_eq!(table.find_session_by_bssid(&[2; 6]).map(|s| s.session_id), Some(2));
        assert!(table.find_session_by_bssid(&[3; 6]).is_none());

        table.find_session_by_bssid_mut(&[1; 6]).expect("session").channel = 36;
        assert!(table.find_session_by_bssid(&[1; 6]).expect("session").is_5ghz());
        assert!(table.remove(&[1; 6]).is_some());
        assert!(table.find_session_by_bssid(&[1; 6]).is_none());
    }
}
