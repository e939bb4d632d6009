//! Core of the binary-conversion API
//!
//! This module contains the definition of the high-level transcoding trait
//! [`Transcode`], implemented by every codec in this crate and by the closed
//! codec union [`Codec`](crate::codec::Codec).
//!
//! Unlike a statically typed serialization framework, a DID codec is a
//! *runtime value*: its byte-length, scale, enumeration set, and nested
//! layout are all construction parameters supplied from a catalog. The
//! trait therefore takes `&self` everywhere and converts between byte
//! buffers and the dynamic [`Value`] model.
//!
//! Two sub-modules complete the picture:
//!   * [`target`] offers an abstraction along the lines of [`std::io::Write`],
//!     namely the [`target::Target`] trait, which is the dual to
//!     [`crate::parse::Parser`] and the generic bound for serialization in
//!     [`Transcode::write_to`].
//!   * [`info`] defines the self-description returned by [`Transcode::describe`].

use crate::builder::{strict::StrictBuilder, Builder};
use crate::error::{CodecResult, WidthError};
use crate::parse::{Parser, SliceParser};
use crate::value::Value;

use self::info::{Arg, CodecInfo, CodecKind};
use self::target::{ByteCounter, Target};

pub mod info;
pub mod target;

/// Bidirectional transformer between a fixed-size byte buffer and a [`Value`]
///
/// Implementations are defined by the required methods [`parse`] and
/// [`write_to`], together with the constant accessors [`name`],
/// [`byte_len`], and [`kind`]. The provided methods [`decode`], [`encode`],
/// and [`describe`] are the intended entry points for callers.
///
/// # Invariants
///
/// * `parse` consumes exactly `offset() + byte_len()` bytes from the parser
///   on success.
/// * `write_to` writes exactly `byte_len()` bytes on success and returns
///   that number.
///
/// Codecs are immutable; both directions are pure functions of their input.
///
/// [`parse`]: Transcode::parse
/// [`write_to`]: Transcode::write_to
/// [`name`]: Transcode::name
/// [`byte_len`]: Transcode::byte_len
/// [`kind`]: Transcode::kind
/// [`decode`]: Transcode::decode
/// [`encode`]: Transcode::encode
/// [`describe`]: Transcode::describe
pub trait Transcode {
    /// Human-readable field name of the DID or sub-field
    fn name(&self) -> &str;

    /// Total encoded size in bytes, fixed at construction
    fn byte_len(&self) -> usize;

    /// Variant tag used for self-description
    fn kind(&self) -> CodecKind;

    /// Number of leading bytes skipped before this codec's window when decoding
    #[inline]
    fn offset(&self) -> usize {
        0
    }

    /// Consumes this codec's window from `p` and interprets it as a [`Value`].
    ///
    /// # Errors
    ///
    /// Buffer-shape failures are propagated from the [`Parser`] as
    /// [`ValidationError::Parse`](crate::error::ValidationError::Parse);
    /// format-specific failures (invalid UTF-8, impossible dates) are
    /// reported as other validation errors.
    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value>;

    /// Appends the encoded form of `value` to `buf`, returning the number of
    /// bytes written.
    ///
    /// # Errors
    ///
    /// Fails on values of the wrong shape, on values that cannot be
    /// represented in the codec's width, on missing keys, and on codecs that
    /// are decode-only.
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CodecResult<usize>;

    /// Kind-specific construction parameters, for [`describe`](Transcode::describe)
    fn args(&self) -> Vec<(&'static str, Arg)> {
        Vec::new()
    }

    /// Returns the self-description of this codec
    #[must_use]
    fn describe(&self) -> CodecInfo {
        CodecInfo {
            codec: self.kind(),
            len: self.byte_len(),
            name: self.name().to_owned(),
            args: self.args(),
        }
    }

    /// Decodes a value from the start of `bytes`.
    ///
    /// The buffer may be longer than the codec's footprint; only the first
    /// `offset() + byte_len()` bytes are read, unless the feature
    /// `check_complete_parse` is enabled, in which case trailing bytes are an
    /// error.
    ///
    /// # Errors
    ///
    /// See [`parse`](Transcode::parse).
    fn decode(&self, bytes: &[u8]) -> CodecResult<Value> {
        let mut p = SliceParser::new(bytes);
        let value = self.parse(&mut p)?;
        #[cfg(feature = "check_complete_parse")]
        p.finish()?;
        Ok(value)
    }

    /// Encodes `value` into a freshly allocated buffer of exactly `byte_len()` bytes.
    ///
    /// Nothing is returned to the caller unless the whole value was encoded.
    ///
    /// # Errors
    ///
    /// See [`write_to`](Transcode::write_to). Additionally fails with
    /// [`WidthError::WrongWidth`] if the encoded form does not span exactly
    /// `byte_len()` bytes.
    fn encode(&self, value: &Value) -> CodecResult<Vec<u8>> {
        let mut buf = StrictBuilder::with_capacity(self.byte_len());
        let written = self.write_to(value, &mut buf)?;
        if written != self.byte_len() || buf.len() != self.byte_len() {
            return Err(WidthError::WrongWidth {
                exact: self.byte_len(),
                actual: buf.len(),
            }
            .into());
        }
        Ok(buf.finalize())
    }

    /// Checks that `value` would encode successfully, without allocating an
    /// output buffer.
    ///
    /// # Errors
    ///
    /// Fails exactly when [`encode`](Transcode::encode) would.
    fn check_encodable(&self, value: &Value) -> CodecResult<()> {
        let mut counter = ByteCounter::create();
        self.write_to(value, &mut counter)?;
        match counter.count() {
            n if n == self.byte_len() => Ok(()),
            actual => Err(WidthError::WrongWidth {
                exact: self.byte_len(),
                actual,
            }
            .into()),
        }
    }
}
