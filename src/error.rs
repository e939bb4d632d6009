//! General error types
//!
//! This module contains the error hierarchy shared by every codec in
//! this crate. Low-level, structural failures ([`WidthError`],
//! [`LengthError`], and [`ParseError`](crate::parse::error::ParseError))
//! are folded into [`ValidationError`], which together with
//! [`UnsupportedError`] and missing-key failures forms the call-level
//! taxonomy [`CodecError`].
//!
//! Failures that occur while *constructing* a codec are reported separately
//! as [`ConfigError`], and registry-level absence is reported as
//! [`RegistryError`].
//!
//! Enumeration lookup misses are deliberately absent from this module: an
//! unknown enumeration id is represented as data (see
//! [`EnumValue::not_found`](crate::value::EnumValue::not_found)) rather than
//! as an error.

use crate::parse::error::ParseError;
use crate::registry::Did;
use thiserror::Error;

/// Enumerated error type for failures related to codecs that
/// impose a check on the byte-width of their prospective values.
///
/// Structurally similar to [`LengthError`], an analogous error-type
/// relating to the number of elements in a collection, rather than
/// the number of bytes in a potentially opaque value.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum WidthError {
    /// Restriction on maximum byte-width exceeded
    #[error("{actual}-byte value exceeded limit of {limit} bytes")]
    TooWide { limit: usize, actual: usize },
    /// Requirement of precise byte-width not satisfied
    #[error("{actual}-byte value violated requirement of {exact} bytes")]
    WrongWidth { exact: usize, actual: usize },
    /// Buffer shorter than the minimum required byte-width
    #[error("{actual}-byte buffer is shorter than the required {required} bytes")]
    TooNarrow { required: usize, actual: usize },
}

/// Enumerated error type for failures related to the element-count
/// of sequence values.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum LengthError {
    /// Declared count and actual number of elements disagree
    #[error("declared count {declared} does not match {actual} supplied elements")]
    CountMismatch { declared: usize, actual: usize },
    /// Requirement of precise number of mapping keys not satisfied
    #[error("{actual}-key input violated requirement of {exact} keys")]
    WrongKeyCount { exact: usize, actual: usize },
}

/// Input shape or length mismatch detected during a single encode or decode call
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Width(#[from] WidthError),
    #[error(transparent)]
    Length(#[from] LengthError),
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("buffer error: {0}")]
    Parse(#[from] ParseError),
    #[error("invalid UTF-8 in fixed string: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Text input to a numeric codec that is not a plain integer or decimal literal
    #[error("`{0}` is not a numeric literal")]
    NotNumeric(String),
    /// Scaled value does not fit into the configured integer width
    #[error("scaled value {value} does not fit in {width} byte(s) (signed: {signed})")]
    OutOfRange { value: f64, width: usize, signed: bool },
    /// Value is numeric but cannot serve as an element count
    #[error("{0} is not a valid element count")]
    NotACount(f64),
    /// Value variant does not match what the codec can encode
    #[error("{codec} cannot encode a {found} value (expected {expected})")]
    UnexpectedShape {
        codec: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// Decoded calendar fields do not form a valid date or time
    #[error("invalid date/time fields: {0}")]
    InvalidDateTime(String),
    /// Label has no entry in the enumeration set
    #[error("label `{label}` not found in enumeration set `{set}`")]
    UnknownLabel { set: String, label: String },
    /// Colon-separated component is not a byte-sized integer
    #[error("duration component `{0}` is not an integer in 0..=255")]
    BadComponent(String),
    /// Boolean input other than `on`/`off` (only with feature `strict_boolean`)
    #[error("`{0}` is neither `on` nor `off`")]
    UnknownToken(String),
}

/// Operation that this crate deliberately does not perform
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnsupportedError {
    /// Codec is decode-only
    #[error("encode is not implemented for {codec} codecs")]
    EncodeNotImplemented { codec: &'static str },
}

/// Call-level error for [`Transcode`](crate::conv::Transcode) operations
///
/// Each variant is fatal to the call that raised it; codecs carry no
/// state that could be left partially mutated.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// Record or List encode input lacks a required key
    #[error("cannot encode value due to missing key `{0}`")]
    MissingField(String),
    #[error(transparent)]
    Unsupported(#[from] UnsupportedError),
}

impl CodecError {
    /// Returns the name of the missing key, if this is a [`CodecError::MissingField`]
    #[must_use]
    pub fn missing_field(&self) -> Option<&str> {
        match self {
            CodecError::MissingField(key) => Some(key.as_str()),
            _ => None,
        }
    }
}

macro_rules! validation_from {
    ( $( $src:ty ),+ $(,)? ) => {
        $( impl From<$src> for CodecError {
            fn from(err: $src) -> Self {
                Self::Validation(err.into())
            }
        } )+
    };
}

validation_from![WidthError, LengthError, hex::FromHexError, ParseError, std::str::Utf8Error];

/// Type alias for Result with an error type of [`CodecError`]
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Invalid construction parameters for a codec
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{codec} `{name}`: byte length {actual} outside supported range {min}..={max}")]
    ByteLength {
        codec: &'static str,
        name: String,
        min: usize,
        max: usize,
        actual: usize,
    },
    #[error("scaled integer `{name}`: byte width {width} must be in 1..=8 and at most the byte length {byte_len}")]
    ByteWidth {
        name: String,
        width: usize,
        byte_len: usize,
    },
    #[error("scaled integer `{name}`: scale {scale} must be finite and non-zero")]
    Scale { name: String, scale: f64 },
    /// Offset-aware scaling has no encode counterpart yet
    #[error("scaled integer `{name}`: offset {offset} is not supported")]
    UnsupportedOffset { name: String, offset: i64 },
    #[error("{codec} `{name}`: declared length {declared} but sub-codecs cover {computed} bytes")]
    LengthMismatch {
        codec: &'static str,
        name: String,
        declared: usize,
        computed: usize,
    },
    #[error("record `{name}`: duplicate field `{field}`")]
    DuplicateField { name: String, field: String },
    #[error("list `{name}`: no sub-codec named `count` precedes the element sub-codec")]
    MissingCount { name: String },
    #[error("list `{name}`: expected a count and one element sub-codec, found {found} sub-codecs")]
    ListShape { name: String, found: usize },
    #[error("list `{name}`: element sub-codec `{element}` has zero byte-length")]
    ZeroWidthElement { name: String, element: String },
    #[error("`{name}`: sub-codec `{field}` declares offset {offset}, which composites do not support")]
    OffsetInComposite {
        name: String,
        field: String,
        offset: usize,
    },
    #[error("unknown byte order `{0}` (expected `little` or `big`)")]
    ByteOrder(String),
    #[error("unknown time format `{0}` (expected `VM` or `ts`)")]
    TimeFormat(String),
}

impl ConfigError {
    /// Checks that `actual` lies within `min..=max`
    pub(crate) fn check_len(
        codec: &'static str,
        name: &str,
        min: usize,
        max: usize,
        actual: usize,
    ) -> Result<(), Self> {
        if (min..=max).contains(&actual) {
            Ok(())
        } else {
            Err(ConfigError::ByteLength {
                codec,
                name: name.to_owned(),
                min,
                max,
                actual,
            })
        }
    }
}

/// Error returned by [`Registry`](crate::registry::Registry) operations
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("DID {0} is not registered")]
    NotRegistered(Did),
    #[error("DID {did}: {source}")]
    Codec {
        did: Did,
        #[source]
        source: CodecError,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    fn dummy<T: Send + Sync>() {}

    #[test]
    fn errors_threadsafe() {
        dummy::<CodecError>();
        dummy::<ConfigError>();
        dummy::<RegistryError>();
    }

    #[test]
    fn missing_field_names_key() {
        let err = CodecError::MissingField("Temperature".to_owned());
        assert_eq!(err.missing_field(), Some("Temperature"));
        assert!(err.to_string().contains("Temperature"));
    }

    #[test]
    fn width_error_is_validation() {
        let err: CodecError = WidthError::WrongWidth { exact: 2, actual: 3 }.into();
        assert!(matches!(
            err,
            CodecError::Validation(ValidationError::Width(WidthError::WrongWidth {
                exact: 2,
                actual: 3
            }))
        ));
        assert_eq!(err.missing_field(), None);
    }
}
