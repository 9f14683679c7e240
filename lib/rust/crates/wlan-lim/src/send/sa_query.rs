// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{action_tx, submit, MissingSessionPolicy, SendOutcome},
    crate::{context::LimContext, device::TxSink, error::Error, session::PeSession},
    wlan_frame::{
        frame::{SaQueryRequest, SaQueryResponse},
        mac::{ActionCategory, MacAddr},
    },
};

pub fn send_sa_query_request(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    transaction_id: [u8; 2],
) -> Result<SendOutcome, Error> {
    let session =
        session_or_return!(session, MissingSessionPolicy::Error, "sa query request", Some(peer));
    let tx = action_tx(ctx, session, peer, ActionCategory::SA_QUERY);
    submit(ctx, sink, &SaQueryRequest { transaction_id }, &tx)
}

/// Answers an SA Query request, echoing its transaction identifier.
pub fn send_sa_query_response(
    ctx: &mut LimContext,
    sink: &mut dyn TxSink,
    session: Option<&PeSession>,
    peer: MacAddr,
    transaction_id: [u8; 2],
) -> Result<SendOutcome, Error> {
    let session =
        session_or_return!(session, MissingSessionPolicy::Error, "sa query response", Some(peer));
    let tx = action_tx(ctx, session, peer, ActionCategory::SA_QUERY);
    submit(ctx, sink, &SaQueryResponse { transaction_id }, &tx)
}
