//! Decoded values
//!
//! [`Value`] is the structured, human-usable side of every codec in this
//! crate: `decode` produces one, `encode` consumes one. The set of variants
//! is closed and mirrors the shapes the codecs produce, so that a decoded
//! value can be fed back into the codec that produced it.
//!
//! When the `serde_impls` feature is enabled, all types in this module
//! implement `serde::Serialize`, with [`Value`] serializing untagged (a
//! `Number` becomes a JSON number, a `Record` a JSON object, and so on).

use crate::error::ValidationError;
#[cfg(feature = "serde_impls")]
use serde::{ser::SerializeMap, Serialize, Serializer};
use std::fmt::{self, Display};

/// Two-state value of a [`Boolean`](crate::prim::Boolean) codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_impls", derive(Serialize))]
#[cfg_attr(feature = "serde_impls", serde(rename_all = "lowercase"))]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    /// Returns the textual token of this switch state
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Switch::On => "on",
            Switch::Off => "off",
        }
    }

    /// Parses the literal tokens `"on"` and `"off"`
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "on" => Some(Switch::On),
            "off" => Some(Switch::Off),
            _ => None,
        }
    }
}

impl From<bool> for Switch {
    fn from(b: bool) -> Self {
        if b {
            Switch::On
        } else {
            Switch::Off
        }
    }
}

impl Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded enumeration value: always the numeric id together with its label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_impls", derive(Serialize))]
pub struct EnumValue {
    pub id: u64,
    pub text: String,
}

impl EnumValue {
    #[must_use]
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// Sentinel for an id that has no label in enumeration set `set`
    #[must_use]
    pub fn not_found(id: u64, set: &str) -> Self {
        Self {
            id,
            text: format!("not found in {set}"),
        }
    }
}

/// Decoded point in time: formatted text plus milliseconds since the Unix epoch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_impls", derive(Serialize))]
pub struct Timestamp {
    pub text: String,
    pub epoch_millis: i64,
}

/// Ordered mapping from field names to values
///
/// Insertion order is preserved, which keeps decoded records in the
/// declaration order of their sub-codecs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fields(Vec<(String, Value)>);

impl Fields {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Appends a field, replacing the value of an existing field of the same name
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    /// Looks up a field by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for Fields {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

impl IntoIterator for Fields {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(feature = "serde_impls")]
impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Structured value exchanged with a codec
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(Serialize))]
#[cfg_attr(feature = "serde_impls", serde(untagged))]
pub enum Value {
    /// Lowercase hex rendering of raw bytes
    Hex(String),
    /// Scaled engineering value
    Number(f64),
    /// Plain unsigned integer
    Unsigned(u64),
    Switch(Switch),
    Text(String),
    Enum(EnumValue),
    DateTime(Timestamp),
    Record(Fields),
    Sequence(Vec<Value>),
}

impl Value {
    /// Name of the variant, for diagnostics
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Value::Hex(_) => "hex",
            Value::Number(_) => "number",
            Value::Unsigned(_) => "unsigned",
            Value::Switch(_) => "switch",
            Value::Text(_) => "text",
            Value::Enum(_) => "enum",
            Value::DateTime(_) => "datetime",
            Value::Record(_) => "record",
            Value::Sequence(_) => "sequence",
        }
    }

    /// Interprets this value as a number.
    ///
    /// Text is accepted only if it is a plain integer or decimal literal
    /// (optional sign, digits, optional fraction, optional exponent);
    /// anything else is rejected rather than coerced to zero.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotNumeric`] for non-numeric text and
    /// [`ValidationError::UnexpectedShape`] for non-scalar values.
    pub fn as_number(&self, codec: &'static str) -> Result<f64, ValidationError> {
        match self {
            Value::Number(x) => Ok(*x),
            Value::Unsigned(n) => Ok(*n as f64),
            Value::Text(s) => parse_numeric(s),
            other => Err(other.unexpected(codec, "number")),
        }
    }

    /// Interprets this value as an unsigned integer.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a non-negative integral number.
    pub fn as_unsigned(&self, codec: &'static str) -> Result<u64, ValidationError> {
        match self {
            Value::Unsigned(n) => Ok(*n),
            Value::Number(_) | Value::Text(_) => {
                let x = self.as_number(codec)?;
                if x >= 0.0 && x.fract() == 0.0 && x < 2f64.powi(64) {
                    Ok(x as u64)
                } else {
                    Err(ValidationError::OutOfRange {
                        value: x,
                        width: 8,
                        signed: false,
                    })
                }
            }
            other => Err(other.unexpected(codec, "unsigned")),
        }
    }

    /// Interprets this value as an element count.
    ///
    /// # Errors
    ///
    /// Fails with [`ValidationError::NotACount`] for negative or fractional numbers.
    pub fn as_count(&self, codec: &'static str) -> Result<usize, ValidationError> {
        match self {
            Value::Unsigned(n) => usize::try_from(*n).map_err(|_| ValidationError::NotACount(*n as f64)),
            Value::Number(x) if *x >= 0.0 && x.fract() == 0.0 && *x < 2f64.powi(usize::BITS as i32) => {
                Ok(*x as usize)
            }
            Value::Number(x) => Err(ValidationError::NotACount(*x)),
            other => Err(other.unexpected(codec, "count")),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Hex(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_fields(&self) -> Option<&Fields> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub(crate) fn unexpected(&self, codec: &'static str, expected: &'static str) -> ValidationError {
        ValidationError::UnexpectedShape {
            codec,
            expected,
            found: self.shape(),
        }
    }
}

/// Strict numeric grammar: `[+-]? digits ( . digits? )? ( [eE] [+-]? digits )?`
///
/// Leading and trailing whitespace is ignored. Non-finite results are rejected.
fn parse_numeric(src: &str) -> Result<f64, ValidationError> {
    let reject = || ValidationError::NotNumeric(src.to_owned());
    let s = src.trim();
    let bytes = s.as_bytes();
    let mut ix = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        ix += 1;
    }
    let int_start = ix;
    while ix < bytes.len() && bytes[ix].is_ascii_digit() {
        ix += 1;
    }
    let int_digits = ix - int_start;
    let mut frac_digits = 0;
    if ix < bytes.len() && bytes[ix] == b'.' {
        ix += 1;
        let frac_start = ix;
        while ix < bytes.len() && bytes[ix].is_ascii_digit() {
            ix += 1;
        }
        frac_digits = ix - frac_start;
    }
    if int_digits + frac_digits == 0 {
        return Err(reject());
    }
    if ix < bytes.len() && matches!(bytes[ix], b'e' | b'E') {
        ix += 1;
        if matches!(bytes.get(ix), Some(b'+' | b'-')) {
            ix += 1;
        }
        let exp_start = ix;
        while ix < bytes.len() && bytes[ix].is_ascii_digit() {
            ix += 1;
        }
        if ix == exp_start {
            return Err(reject());
        }
    }
    if ix != bytes.len() {
        return Err(reject());
    }

    match s.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(reject()),
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Hex(s) | Value::Text(s) => f.write_str(s),
            Value::Number(x) => write!(f, "{x}"),
            Value::Unsigned(n) => write!(f, "{n}"),
            Value::Switch(s) => Display::fmt(s, f),
            Value::Enum(e) => write!(f, "{} ({})", e.text, e.id),
            Value::DateTime(ts) => f.write_str(&ts.text),
            Value::Record(fields) => {
                f.write_str("{")?;
                for (ix, (k, v)) in fields.iter().enumerate() {
                    if ix > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (ix, v) in items.iter().enumerate() {
                    if ix > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
        }
    }
}

macro_rules! value_from {
    ( $( $src:ty => $variant:ident ),+ $(,)? ) => {
        $( impl From<$src> for Value {
            fn from(x: $src) -> Self {
                Value::$variant(x.into())
            }
        } )+
    };
}

value_from![
    f64 => Number,
    u64 => Unsigned,
    u8 => Unsigned,
    u16 => Unsigned,
    u32 => Unsigned,
    Switch => Switch,
    String => Text,
    &str => Text,
    EnumValue => Enum,
    Timestamp => DateTime,
    Fields => Record,
    Vec<Value> => Sequence,
];

#[cfg(test)]
mod tests {
    use super::*;

    fn check_numeric(src: &str, expected: Option<f64>) {
        match (parse_numeric(src), expected) {
            (Ok(x), Some(y)) => assert_eq!(x, y, "parsing `{src}`"),
            (Err(ValidationError::NotNumeric(s)), None) => assert_eq!(s, src),
            (res, _) => panic!("unexpected result for `{src}`: {res:?}"),
        }
    }

    #[test]
    fn strict_numeric_grammar() {
        check_numeric("12.34", Some(12.34));
        check_numeric(" -7 ", Some(-7.0));
        check_numeric("+.5", Some(0.5));
        check_numeric("3.", Some(3.0));
        check_numeric("1e3", Some(1000.0));
        check_numeric("2.5E-1", Some(0.25));
        check_numeric("", None);
        check_numeric(".", None);
        check_numeric("1+1", None);
        check_numeric("inf", None);
        check_numeric("NaN", None);
        check_numeric("0x10", None);
        check_numeric("1e", None);
        check_numeric("__import__('os')", None);
    }

    #[test]
    fn counts() {
        assert_eq!(Value::Unsigned(3).as_count("List").unwrap(), 3);
        assert_eq!(Value::Number(4.0).as_count("List").unwrap(), 4);
        assert!(matches!(
            Value::Number(1.5).as_count("List"),
            Err(ValidationError::NotACount(_))
        ));
        assert!(matches!(
            Value::Text("3".into()).as_count("List"),
            Err(ValidationError::UnexpectedShape { found: "text", .. })
        ));
        assert!(Value::Number(2f64.powi(64)).as_count("List").is_err());
    }

    #[test]
    fn unsigned_rejects_two_to_the_64() {
        assert!(matches!(
            Value::Number(2f64.powi(64)).as_unsigned("Byte"),
            Err(ValidationError::OutOfRange { width: 8, signed: false, .. })
        ));
        assert_eq!(Value::Number(2f64.powi(63)).as_unsigned("Byte").unwrap(), 1 << 63);
    }

    #[test]
    fn fields_preserve_order() {
        let fields: Fields = vec![("b", Value::from(1u8)), ("a", Value::from(2u8))]
            .into_iter()
            .collect();
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(fields.get("a"), Some(&Value::Unsigned(2)));
        assert_eq!(
            Value::Record(fields).to_string(),
            "{b: 1, a: 2}"
        );
    }

    #[test]
    fn enum_sentinel() {
        let v = EnumValue::not_found(42, "Modes");
        assert_eq!(v.id, 42);
        assert_eq!(v.text, "not found in Modes");
    }

    #[cfg(feature = "serde_impls")]
    #[test]
    fn serializes_untagged() {
        let fields: Fields = vec![
            ("Count", Value::Unsigned(1)),
            ("Mode", Value::Enum(EnumValue::new(2, "Eco"))),
            ("State", Value::Switch(Switch::On)),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_value(Value::Record(fields)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Count": 1, "Mode": {"id": 2, "text": "Eco"}, "State": "on"})
        );
    }
}
