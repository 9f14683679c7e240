// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Converts received management frames into frame descriptors.

use {
    crate::{
        buffer_reader::BufferReader,
        error::FrameParseError,
        frame::*,
        mac::{
            self, ActionCategory, ActionHdr, BlockAckAction, MgmtHdr, MgmtSubtype, QosAction,
            RadioMeasurementAction, SaQueryAction, SpectrumMgmtAction,
        },
    },
    log::debug,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredFrame {
    pub hdr: MgmtHdr,
    pub ht_ctrl: Option<u32>,
    pub body: MgmtBody,
    /// Elements skipped while parsing the body.
    pub summary: ElementSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MgmtBody {
    AssocRequest(AssocRequest),
    AssocResponse(AssocResponse),
    ReassocRequest(ReassocRequest),
    ReassocResponse(AssocResponse),
    ProbeRequest(ProbeRequest),
    ProbeResponse(ProbeResponse),
    Beacon(ProbeResponse),
    Disassoc(Disassoc),
    Auth(Auth),
    Deauth(Deauth),
    Action(ActionFrame),
    /// The body of a frame with the protected bit set. It can only be parsed once decrypted.
    Protected(Vec<u8>),
    Unsupported { subtype: u16, body: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionFrame {
    AddTsRequest(AddTsRequest),
    AddTsResponse(AddTsResponse),
    DelTs(DelTs),
    WmmAddTsRequest(WmmAddTsRequest),
    WmmAddTsResponse(WmmAddTsResponse),
    WmmDelTs(WmmDelTs),
    AddBaRequest(AddBaRequest),
    AddBaResponse(AddBaResponse),
    DelBa(DelBa),
    SpectrumMeasurementReport(SpectrumMeasurementReport),
    ChannelSwitch(ChannelSwitch),
    RadioMeasurementReport(RadioMeasurementReport),
    LinkMeasurementReport(LinkMeasurementReport),
    NeighborReportRequest(NeighborReportRequest),
    SaQueryRequest(SaQueryRequest),
    SaQueryResponse(SaQueryResponse),
    Unsupported { category: u8, action: u8, body: Vec<u8> },
}

fn parse_body<F: FrameBody, T>(
    body: &[u8],
    offset: usize,
    wrap: impl FnOnce(F) -> T,
) -> Result<(T, ElementSummary), FrameParseError> {
    F::parse_at(body, offset).map(|(frame, summary)| (wrap(frame), summary))
}

/// Parses a complete management frame, MAC header included.
///
/// A frame is rejected as a whole if any element claims more bytes than remain. Elements that
/// are unknown, repeated or undecodable are skipped and recorded in the summary.
pub fn parse_mgmt_frame(bytes: &[u8]) -> Result<StructuredFrame, FrameParseError> {
    let mut reader = BufferReader::new(bytes);
    let hdr = reader.read::<MgmtHdr>().ok_or(FrameParseError::TooShort {
        needed: MgmtHdr::len(false),
        available: bytes.len(),
    })?;
    let fc = hdr.fc();
    if fc.frame_type() != mac::FRAME_TYPE_MGMT {
        return Err(FrameParseError::NotManagement { frame_type: fc.frame_type() });
    }
    let ht_ctrl = if fc.htc_order() {
        Some(reader.read_u32_le().ok_or(FrameParseError::TooShort {
            needed: MgmtHdr::len(true),
            available: bytes.len(),
        })?)
    } else {
        None
    };
    let hdr = *hdr;
    let offset = reader.bytes_read();
    let body = reader.into_remaining();

    if fc.protected() {
        return Ok(StructuredFrame {
            hdr,
            ht_ctrl,
            body: MgmtBody::Protected(body.to_vec()),
            summary: ElementSummary::default(),
        });
    }

    let (body, summary) = match MgmtSubtype(fc.frame_subtype()) {
        MgmtSubtype::ASSOC_REQ => parse_body(body, offset, MgmtBody::AssocRequest)?,
        MgmtSubtype::ASSOC_RESP => parse_body(body, offset, MgmtBody::AssocResponse)?,
        MgmtSubtype::REASSOC_REQ => parse_body(body, offset, MgmtBody::ReassocRequest)?,
        MgmtSubtype::REASSOC_RESP => parse_body(body, offset, MgmtBody::ReassocResponse)?,
        MgmtSubtype::PROBE_REQ => parse_body(body, offset, MgmtBody::ProbeRequest)?,
        MgmtSubtype::PROBE_RESP => parse_body(body, offset, MgmtBody::ProbeResponse)?,
        MgmtSubtype::BEACON => parse_body(body, offset, MgmtBody::Beacon)?,
        MgmtSubtype::DISASSOC => parse_body(body, offset, MgmtBody::Disassoc)?,
        MgmtSubtype::AUTH => parse_body(body, offset, MgmtBody::Auth)?,
        MgmtSubtype::DEAUTH => parse_body(body, offset, MgmtBody::Deauth)?,
        MgmtSubtype::ACTION | MgmtSubtype::ACTION_NO_ACK => {
            let (action, summary) = parse_action(body, offset)?;
            (MgmtBody::Action(action), summary)
        }
        MgmtSubtype(subtype) => {
            debug!("unsupported management subtype {}", subtype);
            (MgmtBody::Unsupported { subtype, body: body.to_vec() }, ElementSummary::default())
        }
    };
    Ok(StructuredFrame { hdr, ht_ctrl, body, summary })
}

/// Parses an action frame body, starting at its category field.
pub fn parse_action(
    body: &[u8],
    offset: usize,
) -> Result<(ActionFrame, ElementSummary), FrameParseError> {
    let reader = BufferReader::new(body);
    let action_hdr = reader.peek::<ActionHdr>().ok_or(FrameParseError::TooShort {
        needed: std::mem::size_of::<ActionHdr>(),
        available: body.len(),
    })?;
    let (category, action) = (action_hdr.category, action_hdr.action);
    match category {
        ActionCategory::QOS => match QosAction(action) {
            QosAction::ADDTS_REQUEST => parse_body(body, offset, ActionFrame::AddTsRequest),
            QosAction::ADDTS_RESPONSE => parse_body(body, offset, ActionFrame::AddTsResponse),
            QosAction::DELTS => parse_body(body, offset, ActionFrame::DelTs),
            _ => Ok(unsupported_action(category, action, body)),
        },
        ActionCategory::WMM => match QosAction(action) {
            QosAction::ADDTS_REQUEST => parse_body(body, offset, ActionFrame::WmmAddTsRequest),
            QosAction::ADDTS_RESPONSE => parse_body(body, offset, ActionFrame::WmmAddTsResponse),
            QosAction::DELTS => parse_body(body, offset, ActionFrame::WmmDelTs),
            _ => Ok(unsupported_action(category, action, body)),
        },
        ActionCategory::BLOCK_ACK => match BlockAckAction(action) {
            BlockAckAction::ADDBA_REQUEST => parse_body(body, offset, ActionFrame::AddBaRequest),
            BlockAckAction::ADDBA_RESPONSE => parse_body(body, offset, ActionFrame::AddBaResponse),
            BlockAckAction::DELBA => parse_body(body, offset, ActionFrame::DelBa),
            _ => Ok(unsupported_action(category, action, body)),
        },
        ActionCategory::SPECTRUM_MGMT => match SpectrumMgmtAction(action) {
            SpectrumMgmtAction::MEASUREMENT_REPORT => {
                parse_body(body, offset, ActionFrame::SpectrumMeasurementReport)
            }
            SpectrumMgmtAction::CHANNEL_SWITCH_ANNOUNCEMENT => {
                parse_body(body, offset, ActionFrame::ChannelSwitch)
            }
            _ => Ok(unsupported_action(category, action, body)),
        },
        ActionCategory::RADIO_MEASUREMENT => match RadioMeasurementAction(action) {
            RadioMeasurementAction::RADIO_MEASUREMENT_REPORT => {
                parse_body(body, offset, ActionFrame::RadioMeasurementReport)
            }
            RadioMeasurementAction::LINK_MEASUREMENT_REPORT => {
                parse_body(body, offset, ActionFrame::LinkMeasurementReport)
            }
            RadioMeasurementAction::NEIGHBOR_REPORT_REQUEST => {
                parse_body(body, offset, ActionFrame::NeighborReportRequest)
            }
            _ => Ok(unsupported_action(category, action, body)),
        },
        ActionCategory::SA_QUERY => match SaQueryAction(action) {
            SaQueryAction::REQUEST => parse_body(body, offset, ActionFrame::SaQueryRequest),
            SaQueryAction::RESPONSE => parse_body(body, offset, ActionFrame::SaQueryResponse),
            _ => Ok(unsupported_action(category, action, body)),
        },
        _ => Ok(unsupported_action(category, action, body)),
    }
}

fn unsupported_action(
    category: ActionCategory,
    action: u8,
    body: &[u8],
) -> (ActionFrame, ElementSummary) {
    debug!("unsupported action frame: category {}, action {}", category.0, action);
    (
        ActionFrame::Unsupported { category: category.0, action, body: body.to_vec() },
        ElementSummary::default(),
    )
}
