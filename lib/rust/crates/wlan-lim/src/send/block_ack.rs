// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{action_tx, submit, MissingSessionPolicy, SendOutcome},
    crate::{context::LimContext, device::TxSink, error::Error, session::PeSession},
    log::debug,
    wlan_frame::{
        frame::{AddBaRequest, AddBaResponse, DelBa},
        mac::{
            ActionCategory, BlockAckParameters, DelbaParameters, MacAddr, ReasonCode, StatusCode,
        },
    },
};

pub const BLOCK_ACK_BUFFER_SIZE: u16 = 64;

/// Immediate block ack. Delayed block ack is not offered.
const BLOCK_ACK_POLICY_IMMEDIATE: u8 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddBaParams {
    /// Taken from the context's dialog token allocator when `None`.
    pub dialog_token: Option<u8>,
    pub tid: u8,
    pub buffer_size: u16,
    /// Block ack timeout in TUs. Zero disables the timeout.
    pub timeout: u16,
    /// Sequence number of the first MSDU covered by the agreement.
    pub starting_sequence: u16,
    pub amsdu: bool,
}

impl Default for AddBaParams {
    fn default() -> Self {
        Self {
            dialog_token: None,
            tid: 0,
            buffer_size: BLOCK_ACK_BUFFER_SIZE,
            timeout: 0,
            starting_sequence: 1,
            amsdu: false,
        }
    }
}

impl AddBaParams {
    fn block_ack_parameters(&self) -> BlockAckParameters {
        let mut parameters = BlockAckParameters::default();
        parameters.set_amsdu(self.amsdu);
        parameters.set_policy(BLOCK_ACK_POLICY_IMMEDIATE);
        parameters.set_tid(self.tid);
        parameters.set_buffer_size(self.buffer_size);
        parameters
    }
}

pub fn build_addba_request(dialog_token: u8, params: &AddBaParams) -> AddBaRequest {
    AddBaRequest {
        dialog_token,
        parameters: params.block_ack_parameters(),
        timeout: params.timeout,
        // Fragment number 0.
        starting_sequence_control: params.starting_sequence << 4,
    }
}

pub fn build_addba_response(
    dialog_token: u8,
    status_code: StatusCode,
    params: &AddBaParams,
) -> AddBaResponse {
    AddBaResponse {
        dialog_token,
        status_code,
        parameters: params.block_ack_parameters(),
        timeout: params.timeout,
    }
}

pub fn build_delba(tid: u8, initiator: bool, reason_code: ReasonCode) -> DelBa {
    let mut parameters = DelbaParameters::default();
    parameters.set_initiator(initiator);
    parameters.set_tid(tid);
    DelBa { parameters, reason_code }
}

pub fn send_addba_request(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    params: &AddBaParams,
) -> Result<SendOutcome, Error> {
    let session =
        session_or_return!(session, MissingSessionPolicy::Error, "addba request", Some(peer));
    let dialog_token = match params.dialog_token {
        Some(token) => token,
        None => ctx.next_dialog_token(),
    };
    debug!("sending ADDBA request for TID {} with dialog token {}", params.tid, dialog_token);
    let frame = build_addba_request(dialog_token, params);
    let tx = action_tx(ctx, session, peer, ActionCategory::BLOCK_ACK);
    submit(ctx, sink, &frame, &tx)
}

pub fn send_addba_response(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    dialog_token: u8,
    status_code: StatusCode,
    params: &AddBaParams,
) -> Result<SendOutcome, Error> {
    let session =
        session_or_return!(session, MissingSessionPolicy::Error, "addba response", Some(peer));
    let frame = build_addba_response(dialog_token, status_code, params);
    let tx = action_tx(ctx, session, peer, ActionCategory::BLOCK_ACK);
    submit(ctx, sink, &frame, &tx)
}

pub fn send_delba(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    tid: u8,
    initiator: bool,
    reason_code: ReasonCode,
) -> Result<SendOutcome, Error> {
    let session = session_or_return!(session, MissingSessionPolicy::Error, "delba", Some(peer));
    let tx = action_tx(ctx, session, peer, ActionCategory::BLOCK_ACK);
    submit(ctx, sink, &build_delba(tid, initiator, reason_code), &tx)
}
