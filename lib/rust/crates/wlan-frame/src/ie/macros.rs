// Copyright 2020 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// Implements `Element` for a fixed-size zerocopy struct whose wire layout is its memory layout.
macro_rules! fixed_element {
    ($name:ident, $label:expr, $kind:expr) => {
        impl $crate::ie::Element for $name {
            const NAME: &'static str = $label;
            const KIND: $crate::ie::ElementKind = $kind;
            const MAX_BODY_LEN: usize = ::std::mem::size_of::<$name>();

            fn body_len(&self) -> usize {
                ::std::mem::size_of::<$name>()
            }

            fn write_body<A: $crate::appendable::Appendable>(
                &self,
                w: &mut A,
            ) -> Result<(), $crate::appendable::BufferTooSmall> {
                w.append_value(self)
            }

            fn parse_body(body: &[u8]) -> Result<Self, $crate::error::FrameParseError> {
                ::zerocopy::LayoutVerified::<&[u8], $name>::new_unaligned(body)
                    .map(|parsed| *parsed)
                    .ok_or_else(|| $crate::ie::invalid($kind.id(), "unexpected length"))
            }
        }
    };
}

/// Declares an element whose body is carried as uninterpreted bytes.
macro_rules! opaque_element {
    ($(#[$meta:meta])* $name:ident, $label:expr, $kind:expr, max: $max:expr) => {
        opaque_element!(@decl $(#[$meta])* $name, $label, $kind, $max, {});
    };
    ($(#[$meta:meta])* $name:ident, $label:expr, $kind:expr, max: $max:expr, limit: $limit:expr) => {
        opaque_element!(@decl $(#[$meta])* $name, $label, $kind, $max, {
            fn check(&self) -> Option<$crate::error::CodecWarning> {
                if self.0.len() > $limit {
                    Some($crate::error::CodecWarning::BodyExceedsLimit {
                        element: $label,
                        len: self.0.len(),
                        limit: $limit,
                    })
                } else {
                    None
                }
            }
        });
    };
    (@decl $(#[$meta:meta])* $name:ident, $label:expr, $kind:expr, $max:expr, { $($check:tt)* }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Default)]
        pub struct $name(pub Vec<u8>);

        impl $crate::ie::Element for $name {
            const NAME: &'static str = $label;
            const KIND: $crate::ie::ElementKind = $kind;
            const MAX_BODY_LEN: usize = $max;

            fn body_len(&self) -> usize {
                self.0.len()
            }

            fn write_body<A: $crate::appendable::Appendable>(
                &self,
                w: &mut A,
            ) -> Result<(), $crate::appendable::BufferTooSmall> {
                w.append_bytes(&self.0[..])
            }

            fn parse_body(body: &[u8]) -> Result<Self, $crate::error::FrameParseError> {
                Ok(Self(body.to_vec()))
            }

            $($check)*
        }
    };
}
