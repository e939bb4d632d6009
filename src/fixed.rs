//! Fixed-width textual codecs
//!
//! This module contains the codecs that render a fixed-width byte window as
//! human-readable text: [`FixedString`] for NUL-padded UTF-8,
//! [`VersionTriplet`] for dotted version numbers, and the two address
//! formats [`MacAddress`] and [`IpAddress`].
//!
//! All four are decode-only. Encoding through them fails with
//! [`UnsupportedError::EncodeNotImplemented`]; the raw bypass
//! ([`Mode::Raw`](crate::codec::Mode::Raw)) remains available for writes.

use crate::conv::info::{Arg, CodecKind};
use crate::conv::{target::Target, Transcode};
use crate::error::{CodecResult, ConfigError, UnsupportedError};
use crate::parse::Parser;
use crate::value::Value;

/// Error returned by every decode-only codec on encode
pub(crate) fn encode_not_implemented(kind: CodecKind) -> CodecResult<usize> {
    Err(UnsupportedError::EncodeNotImplemented {
        codec: kind.as_str(),
    }
    .into())
}

/// UTF-8 text padded with NUL bytes to a fixed width
///
/// Decoding strips every NUL character from the window; invalid UTF-8 is a
/// validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedString {
    name: String,
    byte_len: usize,
    offset: usize,
}

impl FixedString {
    #[must_use]
    pub fn new(name: impl Into<String>, byte_len: usize, offset: usize) -> Self {
        Self {
            name: name.into(),
            byte_len,
            offset,
        }
    }
}

impl Transcode for FixedString {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> usize {
        self.byte_len
    }

    fn kind(&self) -> CodecKind {
        CodecKind::FixedString
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
        p.skip(self.offset)?;
        let text = std::str::from_utf8(p.consume(self.byte_len)?)?;
        Ok(Value::Text(text.replace('\0', "")))
    }

    fn write_to<U: Target>(&self, _: &Value, _: &mut U) -> CodecResult<usize> {
        encode_not_implemented(self.kind())
    }

    fn args(&self) -> Vec<(&'static str, Arg)> {
        vec![("offset", Arg::Unsigned(self.offset as u64))]
    }
}

/// Defines a decode-only codec over a window of `byte_len` bytes, with no
/// parameters besides its name and length.
///
/// The rendering function receives the consumed window and returns the text
/// of the decoded value.
macro_rules! text_codec {
    ( $(#[$meta:meta])* $id:ident, min = $min:expr, render = $render:expr ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $id {
            name: String,
            byte_len: usize,
        }

        impl $id {
            /// # Errors
            ///
            #[doc = concat!("Fails if `byte_len` is below ", stringify!($min), ".")]
            pub fn new(name: impl Into<String>, byte_len: usize) -> Result<Self, ConfigError> {
                let name = name.into();
                ConfigError::check_len(stringify!($id), &name, $min, usize::MAX, byte_len)?;
                Ok(Self { name, byte_len })
            }
        }

        impl Transcode for $id {
            fn name(&self) -> &str {
                &self.name
            }

            fn byte_len(&self) -> usize {
                self.byte_len
            }

            fn kind(&self) -> CodecKind {
                CodecKind::$id
            }

            fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
                let render: fn(&[u8]) -> String = $render;
                Ok(Value::Text(render(p.consume(self.byte_len)?)))
            }

            fn write_to<U: Target>(&self, _: &Value, _: &mut U) -> CodecResult<usize> {
                encode_not_implemented(self.kind())
            }
        }
    };
}

text_codec!(
    /// Dotted version string built from little-endian 16-bit groups
    ///
    /// `[1, 0, 2, 0, 3, 0]` decodes to `"1.2.3"`. A trailing odd byte forms
    /// a group of its own.
    VersionTriplet,
    min = 1,
    render = |window| {
        window
            .chunks(2)
            .map(|pair| {
                pair.iter()
                    .rev()
                    .fold(0u16, |acc, &b| (acc << 8) | u16::from(b))
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join(".")
    }
);

text_codec!(
    /// Hardware address rendered as six dash-separated uppercase hex pairs
    ///
    /// Only the first six bytes of the window are shown.
    MacAddress,
    min = 6,
    render = |window| {
        window[..6]
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join("-")
    }
);

text_codec!(
    /// Network address rendered byte-wise as zero-padded three-digit decimals
    ///
    /// The rendering does not depend on the address family: a 4-byte window
    /// yields `"192.168.001.010"`, a 16-byte window sixteen groups.
    IpAddress,
    min = 1,
    render = |window| {
        window
            .iter()
            .map(|b| format!("{b:03}"))
            .collect::<Vec<_>>()
            .join(".")
    }
);
