//! Closed union of all codec kinds
//!
//! [`Codec`] is the type stored in a [`Registry`](crate::registry::Registry)
//! and nested inside the composite codecs. It implements [`Transcode`] by
//! forwarding to the variant it holds, so that a composite can hold any mix
//! of primitive and composite sub-codecs without dynamic dispatch.
//!
//! In addition to the plain [`Transcode`] operations, a [`Codec`] can be
//! called in [`Mode::Raw`], which bypasses the variant entirely and
//! exchanges the codec's byte window as a hex string.

use crate::conv::info::{Arg, CodecKind};
use crate::conv::{target::Target, Transcode};
use crate::enumeration::Enumeration;
use crate::error::{CodecResult, ConfigError};
use crate::fixed::{FixedString, IpAddress, MacAddress, VersionTriplet};
use crate::int::{Byte, ScaledInteger};
use crate::parse::Parser;
use crate::prim::{Boolean, Duration};
use crate::raw::{decode_raw, encode_raw, Raw};
use crate::schema::Record;
use crate::seq::{fix::Array, lim::List};
use crate::time::{DateTime, ShortDate, UnixTimestamp};
use crate::value::Value;

/// Whether a call interprets the byte window or passes it through as hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Interpret bytes through the codec
    #[default]
    Decoded,
    /// Exchange the first `byte_len` bytes as a lowercase hex string
    Raw,
}

/// Any codec of this crate
#[derive(Debug, Clone)]
pub enum Codec {
    Raw(Raw),
    ScaledInteger(ScaledInteger),
    Byte(Byte),
    Boolean(Boolean),
    FixedString(FixedString),
    VersionTriplet(VersionTriplet),
    MacAddress(MacAddress),
    IpAddress(IpAddress),
    ShortDate(ShortDate),
    DateTime(DateTime),
    Duration(Duration),
    UnixTimestamp(UnixTimestamp),
    Enumeration(Enumeration),
    Record(Record),
    Array(Array),
    List(List),
}

/// Applies `$body` to the codec held by any variant of `$codec`, bound as `$c`
macro_rules! dispatch {
    ( $codec:expr, $c:ident => $body:expr ) => {
        match $codec {
            Codec::Raw($c) => $body,
            Codec::ScaledInteger($c) => $body,
            Codec::Byte($c) => $body,
            Codec::Boolean($c) => $body,
            Codec::FixedString($c) => $body,
            Codec::VersionTriplet($c) => $body,
            Codec::MacAddress($c) => $body,
            Codec::IpAddress($c) => $body,
            Codec::ShortDate($c) => $body,
            Codec::DateTime($c) => $body,
            Codec::Duration($c) => $body,
            Codec::UnixTimestamp($c) => $body,
            Codec::Enumeration($c) => $body,
            Codec::Record($c) => $body,
            Codec::Array($c) => $body,
            Codec::List($c) => $body,
        }
    };
}

impl Codec {
    /// Decodes `bytes` either through the codec or as a raw hex pass-through.
    ///
    /// # Errors
    ///
    /// See [`Transcode::decode`] and [`decode_raw`].
    pub fn decode_with(&self, bytes: &[u8], mode: Mode) -> CodecResult<Value> {
        match mode {
            Mode::Decoded => self.decode(bytes),
            Mode::Raw => decode_raw(bytes, self.byte_len()),
        }
    }

    /// Encodes `value` either through the codec or from a raw hex string.
    ///
    /// # Errors
    ///
    /// See [`Transcode::encode`] and [`encode_raw`]. In raw mode, any value
    /// other than a hex or text string is an unexpected shape.
    pub fn encode_with(&self, value: &Value, mode: Mode) -> CodecResult<Vec<u8>> {
        match mode {
            Mode::Decoded => self.encode(value),
            Mode::Raw => match value {
                Value::Hex(s) | Value::Text(s) => encode_raw(s, self.byte_len()),
                other => Err(other.unexpected("Raw", "hex string").into()),
            },
        }
    }

    /// Rejects a sub-codec that declares a non-zero decode offset.
    ///
    /// Composites lay out their members back to back, which leaves no room
    /// for per-member offsets.
    pub(crate) fn check_member(&self, composite: &str) -> Result<(), ConfigError> {
        match self.offset() {
            0 => Ok(()),
            offset => Err(ConfigError::OffsetInComposite {
                name: composite.to_owned(),
                field: self.name().to_owned(),
                offset,
            }),
        }
    }
}

impl Transcode for Codec {
    fn name(&self) -> &str {
        dispatch!(self, c => c.name())
    }

    fn byte_len(&self) -> usize {
        dispatch!(self, c => c.byte_len())
    }

    fn kind(&self) -> CodecKind {
        dispatch!(self, c => c.kind())
    }

    fn offset(&self) -> usize {
        dispatch!(self, c => c.offset())
    }

    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
        dispatch!(self, c => c.parse(p))
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CodecResult<usize> {
        dispatch!(self, c => c.write_to(value, buf))
    }

    fn args(&self) -> Vec<(&'static str, Arg)> {
        dispatch!(self, c => c.args())
    }
}

macro_rules! codec_from {
    ( $( $variant:ident ),+ $(,)? ) => {
        $( impl From<$variant> for Codec {
            fn from(c: $variant) -> Self {
                Codec::$variant(c)
            }
        } )+
    };
}

codec_from![
    Raw,
    ScaledInteger,
    Byte,
    Boolean,
    FixedString,
    VersionTriplet,
    MacAddress,
    IpAddress,
    ShortDate,
    DateTime,
    Duration,
    UnixTimestamp,
    Enumeration,
    Record,
    Array,
    List,
];
