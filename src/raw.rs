//! Raw pass-through codec and bypass helpers
//!
//! [`Raw`] is the identity codec: its value is the lowercase hex rendering
//! of its window. The two free functions [`decode_raw`] and [`encode_raw`]
//! implement the same conversion for any codec when decoding is explicitly
//! bypassed (see [`Mode::Raw`](crate::codec::Mode::Raw)).

use crate::conv::info::CodecKind;
use crate::conv::{target::Target, Transcode};
use crate::error::{CodecResult, WidthError};
use crate::parse::Parser;
use crate::value::Value;

/// Renders the first `expected_len` bytes of `bytes` as a lowercase hex string.
///
/// # Errors
///
/// Fails if `bytes` is shorter than `expected_len`.
pub fn decode_raw(bytes: &[u8], expected_len: usize) -> CodecResult<Value> {
    match bytes.get(..expected_len) {
        Some(window) => Ok(Value::Hex(hex::encode(window))),
        None => Err(WidthError::TooNarrow {
            required: expected_len,
            actual: bytes.len(),
        }
        .into()),
    }
}

/// Parses a hex string that must denote exactly `expected_len` bytes.
///
/// Both cases are accepted for the hex digits.
///
/// # Errors
///
/// Fails with [`ValidationError::Hex`](crate::error::ValidationError::Hex) on
/// odd-length or non-hex input, and with [`WidthError::WrongWidth`] on a
/// length mismatch.
pub fn encode_raw(hex_str: &str, expected_len: usize) -> CodecResult<Vec<u8>> {
    let bytes = hex::decode(hex_str)?;
    if bytes.len() != expected_len {
        return Err(WidthError::WrongWidth {
            exact: expected_len,
            actual: bytes.len(),
        }
        .into());
    }
    Ok(bytes)
}

/// Identity codec over `byte_len` opaque bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw {
    name: String,
    byte_len: usize,
}

impl Raw {
    #[must_use]
    pub fn new(name: impl Into<String>, byte_len: usize) -> Self {
        Self {
            name: name.into(),
            byte_len,
        }
    }
}

impl Transcode for Raw {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> usize {
        self.byte_len
    }

    fn kind(&self) -> CodecKind {
        CodecKind::Raw
    }

    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
        Ok(Value::Hex(hex::encode(p.consume(self.byte_len)?)))
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CodecResult<usize> {
        match value {
            Value::Hex(s) | Value::Text(s) => Ok(buf.push_all(&encode_raw(s, self.byte_len)?)),
            other => Err(other.unexpected("Raw", "hex string").into()),
        }
    }
}
