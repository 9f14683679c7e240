// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{expect_action, fixed_field, write_action, FrameBody},
    crate::{
        appendable::Appendable,
        buffer_reader::BufferReader,
        error::{FrameParseError, FrameWriteError},
        mac::{ActionCategory, SaQueryAction},
    },
};

macro_rules! sa_query_frame {
    ($name:ident, $label:expr, $action:expr) => {
        // IEEE Std 802.11-2016, 9.6.10
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
        pub struct $name {
            pub transaction_id: [u8; 2],
        }

        impl FrameBody for $name {
            const NAME: &'static str = $label;
            const FIXED_LEN: usize = 4;

            fn max_len() -> usize {
                Self::FIXED_LEN
            }

            fn write_fixed<A: Appendable>(&self, w: &mut A) -> Result<(), FrameWriteError> {
                write_action(w, ActionCategory::SA_QUERY, $action.0)?;
                w.append_bytes(&self.transaction_id[..])?;
                Ok(())
            }

            fn parse_fixed(r: &mut BufferReader<&[u8]>) -> Result<Self, FrameParseError> {
                expect_action(r, ActionCategory::SA_QUERY, $action.0)?;
                let transaction_id =
                    r.read_array::<2>().ok_or_else(fixed_field("transaction id"))?;
                Ok(Self { transaction_id })
            }
        }
    };
}

sa_query_frame!(SaQueryRequest, "SaQueryRequest", SaQueryAction::REQUEST);
sa_query_frame!(SaQueryResponse, "SaQueryResponse", SaQueryAction::RESPONSE);
