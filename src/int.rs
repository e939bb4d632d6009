//! Integer codecs
//!
//! This module defines the two integer-backed primitive codecs:
//!
//!   * [`ScaledInteger`], a signed or unsigned integer of 1 to 8 bytes in
//!     either byte order, exposed as an engineering value `raw / scale`.
//!   * [`Byte`], a plain little-endian unsigned integer of 1 to 8 bytes.
//!
//! Integer widths are parametrized at construction rather than encoded in
//! separate types; an 8-bit, 16-bit, or 32-bit quantity is simply a
//! `ScaledInteger` with `byte_width` 1, 2, or 4.

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};
use std::str::FromStr;

use crate::conv::info::{Arg, CodecKind};
use crate::conv::{target::Target, Transcode};
use crate::error::{CodecResult, ConfigError, ValidationError};
use crate::parse::Parser;
use crate::value::Value;

/// Byte order of a multi-byte integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Least significant byte first
    #[default]
    Little,
    /// Most significant byte first
    Big,
}

impl ByteOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ByteOrder::Little => "little",
            ByteOrder::Big => "big",
        }
    }

    /// Writes the low `nbytes` bytes of `n` into the first `nbytes` of `dst`
    pub(crate) fn write_uint(self, dst: &mut [u8], n: u64, nbytes: usize) {
        match self {
            ByteOrder::Little => LittleEndian::write_uint(dst, n, nbytes),
            ByteOrder::Big => BigEndian::write_uint(dst, n, nbytes),
        }
    }

    fn write_int(self, dst: &mut [u8], n: i64, nbytes: usize) {
        match self {
            ByteOrder::Little => LittleEndian::write_int(dst, n, nbytes),
            ByteOrder::Big => BigEndian::write_int(dst, n, nbytes),
        }
    }
}

impl FromStr for ByteOrder {
    type Err = ConfigError;

    /// Accepts `little`/`le` and `big`/`be`, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "little" | "le" => Ok(ByteOrder::Little),
            "big" | "be" => Ok(ByteOrder::Big),
            _ => Err(ConfigError::ByteOrder(s.to_owned())),
        }
    }
}

/// Linear-transform parameters of a [`ScaledInteger`]
///
/// The default is little-endian, unsigned, unscaled, with no offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    pub order: ByteOrder,
    pub scale: f64,
    pub offset: i64,
    pub signed: bool,
}

impl Default for Scaling {
    fn default() -> Self {
        Self {
            order: ByteOrder::Little,
            scale: 1.0,
            offset: 0,
            signed: false,
        }
    }
}

impl Scaling {
    #[must_use]
    pub fn order(self, order: ByteOrder) -> Self {
        Self { order, ..self }
    }

    #[must_use]
    pub fn scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    #[must_use]
    pub fn offset(self, offset: i64) -> Self {
        Self { offset, ..self }
    }

    #[must_use]
    pub fn signed(self, signed: bool) -> Self {
        Self { signed, ..self }
    }
}

/// Integer scaled by a constant divisor
///
/// Decoding reads `byte_width` bytes from the start of the window and yields
/// `raw / scale`; encoding writes `round(value × scale)` (ties to even) into
/// `byte_width` bytes and zero-pads up to `byte_len`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledInteger {
    name: String,
    byte_len: usize,
    byte_width: usize,
    scaling: Scaling,
}

impl ScaledInteger {
    /// Constructs a scaled integer codec.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::ByteWidth`] unless `1 <= byte_width <= min(8, byte_len)`
    /// * [`ConfigError::Scale`] if the scale is zero or not finite
    /// * [`ConfigError::UnsupportedOffset`] if the offset is non-zero
    pub fn new(
        name: impl Into<String>,
        byte_len: usize,
        byte_width: usize,
        scaling: Scaling,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if !(1..=8).contains(&byte_width) || byte_width > byte_len {
            return Err(ConfigError::ByteWidth {
                name,
                width: byte_width,
                byte_len,
            });
        }
        if scaling.scale == 0.0 || !scaling.scale.is_finite() {
            return Err(ConfigError::Scale {
                name,
                scale: scaling.scale,
            });
        }
        if scaling.offset != 0 {
            return Err(ConfigError::UnsupportedOffset {
                name,
                offset: scaling.offset,
            });
        }
        Ok(Self {
            name,
            byte_len,
            byte_width,
            scaling,
        })
    }

    #[must_use]
    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    #[must_use]
    pub fn byte_width(&self) -> usize {
        self.byte_width
    }

    /// Half-open range `min..end` of raw integers representable in `byte_width` bytes
    ///
    /// Both bounds are powers of two and therefore exact in `f64`.
    fn raw_bounds(&self) -> (f64, f64) {
        let bits = 8 * self.byte_width as i32;
        if self.scaling.signed {
            let half = 2f64.powi(bits - 1);
            (-half, half)
        } else {
            (0.0, 2f64.powi(bits))
        }
    }
}

impl Transcode for ScaledInteger {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> usize {
        self.byte_len
    }

    fn kind(&self) -> CodecKind {
        CodecKind::ScaledInteger
    }

    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
        let Scaling {
            order,
            scale,
            signed,
            ..
        } = self.scaling;
        let raw = if signed {
            p.take_int(self.byte_width, order)? as f64
        } else {
            p.take_uint(self.byte_width, order)? as f64
        };
        p.skip(self.byte_len - self.byte_width)?;
        Ok(Value::Number(raw / scale))
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CodecResult<usize> {
        let x = value.as_number("ScaledInteger")?;
        let scaled = (x * self.scaling.scale).round_ties_even();
        let (min, end) = self.raw_bounds();
        if !scaled.is_finite() || scaled < min || scaled >= end {
            return Err(ValidationError::OutOfRange {
                value: x,
                width: self.byte_width,
                signed: self.scaling.signed,
            }
            .into());
        }

        let mut word = [0u8; 8];
        if self.scaling.signed {
            self.scaling
                .order
                .write_int(&mut word, scaled as i64, self.byte_width);
        } else {
            self.scaling
                .order
                .write_uint(&mut word, scaled as u64, self.byte_width);
        }
        Ok(buf.push_all(&word[..self.byte_width]) + buf.push_zeros(self.byte_len - self.byte_width))
    }

    fn args(&self) -> Vec<(&'static str, Arg)> {
        vec![
            ("byte_width", Arg::Unsigned(self.byte_width as u64)),
            ("byte_order", Arg::Text(self.scaling.order.as_str().to_owned())),
            ("scale", Arg::Float(self.scaling.scale)),
            ("offset", Arg::Integer(self.scaling.offset)),
            ("signed", Arg::Bool(self.scaling.signed)),
        ]
    }
}

/// Little-endian unsigned integer over `byte_len` bytes, read after `offset` skipped bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Byte {
    name: String,
    byte_len: usize,
    offset: usize,
}

impl Byte {
    /// # Errors
    ///
    /// Fails unless `1 <= byte_len <= 8`.
    pub fn new(name: impl Into<String>, byte_len: usize, offset: usize) -> Result<Self, ConfigError> {
        let name = name.into();
        ConfigError::check_len("Byte", &name, 1, 8, byte_len)?;
        Ok(Self {
            name,
            byte_len,
            offset,
        })
    }
}

impl Transcode for Byte {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> usize {
        self.byte_len
    }

    fn kind(&self) -> CodecKind {
        CodecKind::Byte
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
        p.skip(self.offset)?;
        Ok(Value::Unsigned(p.take_uint(self.byte_len, ByteOrder::Little)?))
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CodecResult<usize> {
        let n = value.as_unsigned("Byte")?;
        if self.byte_len < 8 && n >> (8 * self.byte_len) != 0 {
            return Err(ValidationError::OutOfRange {
                value: n as f64,
                width: self.byte_len,
                signed: false,
            }
            .into());
        }
        let mut word = [0u8; 8];
        ByteOrder::Little.write_uint(&mut word, n, self.byte_len);
        Ok(buf.push_all(&word[..self.byte_len]))
    }

    fn args(&self) -> Vec<(&'static str, Arg)> {
        vec![("offset", Arg::Unsigned(self.offset as u64))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    fn tenths() -> ScaledInteger {
        ScaledInteger::new("FlowTemperature", 2, 2, Scaling::default().scale(10.0)).unwrap()
    }

    #[test]
    fn scaled_encode_rounds() {
        let codec = tenths();
        assert_eq!(codec.encode(&Value::Number(12.34)).unwrap(), vec![123, 0]);
        assert_eq!(codec.decode(&[123, 0]).unwrap(), Value::Number(12.3));
        assert_eq!(codec.encode(&Value::Text("12.34".into())).unwrap(), vec![123, 0]);
    }

    #[test]
    fn scaled_ties_to_even() {
        let codec = ScaledInteger::new("Unscaled", 1, 1, Scaling::default()).unwrap();
        assert_eq!(codec.encode(&Value::Number(2.5)).unwrap(), vec![2]);
        assert_eq!(codec.encode(&Value::Number(3.5)).unwrap(), vec![4]);
    }

    #[test]
    fn scaled_roundtrip_within_resolution() {
        let codec = ScaledInteger::new(
            "Outside",
            4,
            4,
            Scaling::default().scale(100.0).signed(true),
        )
        .unwrap();
        for x in [-273.15, -0.01, 0.0, 19.99, 1234.5] {
            let bytes = codec.encode(&Value::Number(x)).unwrap();
            assert_eq!(bytes.len(), 4);
            match codec.decode(&bytes).unwrap() {
                Value::Number(y) => assert!((x - y).abs() <= 1.0 / 100.0, "{x} vs {y}"),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn scaled_signed_big_endian() {
        let codec = ScaledInteger::new(
            "Offset",
            2,
            2,
            Scaling::default().order(ByteOrder::Big).signed(true),
        )
        .unwrap();
        assert_eq!(codec.encode(&Value::Number(-2.0)).unwrap(), vec![0xff, 0xfe]);
        assert_eq!(codec.decode(&[0xff, 0xfe]).unwrap(), Value::Number(-2.0));
    }

    #[test]
    fn scaled_pads_to_byte_len() {
        let codec = ScaledInteger::new("Wide", 4, 2, Scaling::default()).unwrap();
        assert_eq!(codec.encode(&Value::Unsigned(0x0102)).unwrap(), vec![0x02, 0x01, 0, 0]);
        assert_eq!(codec.decode(&[0x02, 0x01, 0xff, 0xff]).unwrap(), Value::Number(258.0));
    }

    #[test]
    fn scaled_rejects_bad_input() {
        let codec = tenths();
        assert!(matches!(
            codec.encode(&Value::Text("1+1".into())),
            Err(CodecError::Validation(ValidationError::NotNumeric(_)))
        ));
        assert!(matches!(
            codec.encode(&Value::Number(-1.0)),
            Err(CodecError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(matches!(
            codec.encode(&Value::Number(6553.6)),
            Err(CodecError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(matches!(
            codec.encode(&Value::Sequence(vec![])),
            Err(CodecError::Validation(ValidationError::UnexpectedShape { .. }))
        ));
    }

    #[test]
    fn scaled_rejects_first_value_past_full_width() {
        let unsigned = ScaledInteger::new("Counter", 8, 8, Scaling::default()).unwrap();
        assert!(matches!(
            unsigned.encode(&Value::Number(2f64.powi(64))),
            Err(CodecError::Validation(ValidationError::OutOfRange { width: 8, signed: false, .. }))
        ));
        assert_eq!(unsigned.encode(&Value::Number(2f64.powi(63))).unwrap(), {
            let mut word = vec![0u8; 8];
            word[7] = 0x80;
            word
        });

        let signed = ScaledInteger::new("Offset", 8, 8, Scaling::default().signed(true)).unwrap();
        assert!(matches!(
            signed.encode(&Value::Number(2f64.powi(63))),
            Err(CodecError::Validation(ValidationError::OutOfRange { signed: true, .. }))
        ));
        assert_eq!(signed.encode(&Value::Number(-(2f64.powi(63)))).unwrap(), {
            let mut word = vec![0u8; 8];
            word[7] = 0x80;
            word
        });
    }

    #[test]
    fn scaled_construction() {
        assert!(matches!(
            ScaledInteger::new("x", 2, 2, Scaling::default().offset(5)),
            Err(ConfigError::UnsupportedOffset { offset: 5, .. })
        ));
        assert!(matches!(
            ScaledInteger::new("x", 2, 2, Scaling::default().scale(0.0)),
            Err(ConfigError::Scale { .. })
        ));
        assert!(matches!(
            ScaledInteger::new("x", 1, 2, Scaling::default()),
            Err(ConfigError::ByteWidth { .. })
        ));
        assert_eq!("BE".parse::<ByteOrder>().unwrap(), ByteOrder::Big);
        assert!("middle".parse::<ByteOrder>().is_err());
    }

    #[test]
    fn byte_roundtrip() {
        let codec = Byte::new("Level", 2, 0).unwrap();
        let bytes = codec.encode(&Value::Unsigned(0x0201)).unwrap();
        assert_eq!(bytes, vec![0x01, 0x02]);
        assert_eq!(codec.decode(&bytes).unwrap(), Value::Unsigned(0x0201));
        assert!(codec.encode(&Value::Unsigned(0x1_0000)).is_err());
    }

    #[test]
    fn byte_reads_after_offset() {
        let codec = Byte::new("Second", 1, 1).unwrap();
        assert_eq!(codec.decode(&[0xaa, 0x07]).unwrap(), Value::Unsigned(7));
        assert!(codec.decode(&[0xaa]).is_err());
        assert_eq!(codec.encode(&Value::Unsigned(7)).unwrap(), vec![7]);
    }
}
