//! Boolean and duration codecs
//!
//! Both codecs in this module are bidirectional: [`Boolean`] maps a byte
//! window onto the two-state [`Switch`], and [`Duration`] renders each byte
//! of its window as a two-digit decimal component of a colon-separated
//! clock-style string.

use crate::conv::info::{Arg, CodecKind};
use crate::conv::{target::Target, Transcode};
use crate::error::{CodecResult, ConfigError, LengthError, ValidationError};
use crate::parse::Parser;
use crate::value::{Switch, Value};

/// On/off flag stored in the first byte of its window
///
/// Any non-zero first byte decodes as [`Switch::On`]. Encoding writes `1` or
/// `0` followed by zero-padding up to `byte_len`.
///
/// Text input other than the tokens `"on"` and `"off"` encodes as off,
/// unless the feature `strict_boolean` is enabled, in which case it is
/// rejected with [`ValidationError::UnknownToken`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boolean {
    name: String,
    byte_len: usize,
    offset: usize,
}

impl Boolean {
    /// # Errors
    ///
    /// Fails if `byte_len` is zero.
    pub fn new(name: impl Into<String>, byte_len: usize, offset: usize) -> Result<Self, ConfigError> {
        let name = name.into();
        ConfigError::check_len("Boolean", &name, 1, usize::MAX, byte_len)?;
        Ok(Self {
            name,
            byte_len,
            offset,
        })
    }

    cfg_if::cfg_if! {
        if #[cfg(feature = "strict_boolean")] {
            fn switch_of(token: &str) -> Result<Switch, ValidationError> {
                Switch::from_token(token).ok_or_else(|| ValidationError::UnknownToken(token.to_owned()))
            }
        } else {
            fn switch_of(token: &str) -> Result<Switch, ValidationError> {
                Ok(Switch::from_token(token).unwrap_or(Switch::Off))
            }
        }
    }
}

impl Transcode for Boolean {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> usize {
        self.byte_len
    }

    fn kind(&self) -> CodecKind {
        CodecKind::Boolean
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
        p.skip(self.offset)?;
        let window = p.consume(self.byte_len)?;
        Ok(Value::Switch(Switch::from(window[0] != 0)))
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CodecResult<usize> {
        let state = match value {
            Value::Switch(s) => *s,
            Value::Text(token) => Self::switch_of(token)?,
            other => return Err(other.unexpected("Boolean", "on/off token").into()),
        };
        let flag = match state {
            Switch::On => 1,
            Switch::Off => 0,
        };
        Ok(buf.push_one(flag) + buf.push_zeros(self.byte_len - 1))
    }

    fn args(&self) -> Vec<(&'static str, Arg)> {
        vec![("offset", Arg::Unsigned(self.offset as u64))]
    }
}

/// Clock-style duration, one byte per colon-separated component
///
/// `[1, 2, 30]` decodes to `"01:02:30"`; encoding splits on `:` and
/// requires exactly `byte_len` components, each in `0..=255`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duration {
    name: String,
    byte_len: usize,
}

impl Duration {
    #[must_use]
    pub fn new(name: impl Into<String>, byte_len: usize) -> Self {
        Self {
            name: name.into(),
            byte_len,
        }
    }
}

impl Transcode for Duration {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> usize {
        self.byte_len
    }

    fn kind(&self) -> CodecKind {
        CodecKind::Duration
    }

    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
        let text = p
            .consume(self.byte_len)?
            .iter()
            .map(|b| format!("{b:02}"))
            .collect::<Vec<_>>()
            .join(":");
        Ok(Value::Text(text))
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CodecResult<usize> {
        let text = match value {
            Value::Text(s) => s.as_str(),
            other => return Err(other.unexpected("Duration", "colon-separated text").into()),
        };
        let components = text
            .split(':')
            .map(|part| {
                part.trim()
                    .parse::<u8>()
                    .map_err(|_| ValidationError::BadComponent(part.to_owned()))
            })
            .collect::<Result<Vec<u8>, _>>()?;
        if components.len() != self.byte_len {
            return Err(LengthError::CountMismatch {
                declared: self.byte_len,
                actual: components.len(),
            }
            .into());
        }
        Ok(buf.push_all(&components))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    fn check_switch(codec: &Boolean, bytes: &[u8], expected: Switch) {
        assert_eq!(codec.decode(bytes).unwrap(), Value::Switch(expected), "decoding {bytes:?}");
    }

    #[test]
    fn boolean_tokens() {
        let codec = Boolean::new("Heating", 1, 0).unwrap();
        assert_eq!(codec.encode(&"on".into()).unwrap(), vec![1]);
        assert_eq!(codec.encode(&"off".into()).unwrap(), vec![0]);
        assert_eq!(codec.encode(&Value::Switch(Switch::On)).unwrap(), vec![1]);
        check_switch(&codec, &[0x00], Switch::Off);
        check_switch(&codec, &[0x01], Switch::On);
        check_switch(&codec, &[0x80], Switch::On);
    }

    #[cfg(not(feature = "strict_boolean"))]
    #[test]
    fn boolean_unknown_token_is_off() {
        let codec = Boolean::new("Heating", 1, 0).unwrap();
        assert_eq!(codec.encode(&"ON".into()).unwrap(), vec![0]);
        assert_eq!(codec.encode(&"yes".into()).unwrap(), vec![0]);
    }

    #[cfg(feature = "strict_boolean")]
    #[test]
    fn boolean_unknown_token_rejected() {
        let codec = Boolean::new("Heating", 1, 0).unwrap();
        assert!(matches!(
            codec.encode(&"yes".into()),
            Err(CodecError::Validation(ValidationError::UnknownToken(_)))
        ));
    }

    #[test]
    fn boolean_offset_and_padding() {
        let codec = Boolean::new("Pump", 2, 1).unwrap();
        check_switch(&codec, &[0xff, 0x00, 0x01], Switch::Off);
        check_switch(&codec, &[0x00, 0x01, 0x00], Switch::On);
        assert_eq!(codec.encode(&"on".into()).unwrap(), vec![1, 0]);
        assert!(Boolean::new("Empty", 0, 0).is_err());
    }

    #[test]
    fn duration_roundtrip() {
        let codec = Duration::new("Runtime", 3);
        assert_eq!(codec.decode(&[1, 2, 30]).unwrap(), Value::Text("01:02:30".into()));
        assert_eq!(codec.encode(&"01:02:30".into()).unwrap(), vec![1, 2, 30]);
    }

    #[test]
    fn duration_rejects_malformed() {
        let codec = Duration::new("Runtime", 3);
        assert!(matches!(
            codec.encode(&"01:02".into()),
            Err(CodecError::Validation(ValidationError::Length(
                LengthError::CountMismatch { declared: 3, actual: 2 }
            )))
        ));
        assert!(matches!(
            codec.encode(&"01:xx:03".into()),
            Err(CodecError::Validation(ValidationError::BadComponent(_)))
        ));
        assert!(matches!(
            codec.encode(&"01:256:03".into()),
            Err(CodecError::Validation(ValidationError::BadComponent(_)))
        ));
    }
}
