//! Sequence-type with a run-time number of elements
//!
//! This module defines [`List`], a composite made of a leading *count*
//! sub-codec and a repeated *element* sub-codec. The count is read first and
//! determines how many elements follow; the list's declared byte-length is
//! an upper bound, and whatever part of the window the elements leave unused
//! is padding.
//!
//! Encoding requires the input to be a two-entry mapping: the count (under a
//! key spelled `count` in any case) and the elements (under any other key).
//! The count must agree with the number of elements supplied.

use crate::codec::Codec;
use crate::conv::info::{Arg, CodecKind};
use crate::conv::{target::Target, Transcode};
use crate::error::{CodecError, CodecResult, ConfigError, LengthError, WidthError};
use crate::parse::Parser;
use crate::value::{Fields, Value};

/// Name the count sub-codec must carry, compared case-insensitively
pub const COUNT_FIELD: &str = "count";

fn is_count(name: &str) -> bool {
    name.eq_ignore_ascii_case(COUNT_FIELD)
}

/// Count-prefixed repetition of a single element codec, padded to a fixed width
#[derive(Debug, Clone)]
pub struct List {
    name: String,
    byte_len: usize,
    count: Box<Codec>,
    element: Box<Codec>,
}

impl List {
    /// Constructs a list from `[count, element]`.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::MissingCount`] if no sub-codec is named `count`
    /// * [`ConfigError::ListShape`] unless there are exactly two sub-codecs, the count first
    ///   and the element under a name other than `count`
    /// * [`ConfigError::ZeroWidthElement`] if the element sub-codec occupies no bytes
    /// * [`ConfigError::LengthMismatch`] if the count field alone exceeds `byte_len`
    /// * [`ConfigError::OffsetInComposite`] if a sub-codec declares an offset
    pub fn new(name: impl Into<String>, byte_len: usize, subs: Vec<Codec>) -> Result<Self, ConfigError> {
        let name = name.into();
        if !subs.iter().any(|sub| is_count(sub.name())) {
            return Err(ConfigError::MissingCount { name });
        }
        let found = subs.len();
        let mut subs = subs.into_iter();
        let (count, element) = match (subs.next(), subs.next(), subs.next()) {
            (Some(count), Some(element), None) if is_count(count.name()) && !is_count(element.name()) => {
                (count, element)
            }
            _ => return Err(ConfigError::ListShape { name, found }),
        };
        count.check_member(&name)?;
        element.check_member(&name)?;
        if element.byte_len() == 0 {
            return Err(ConfigError::ZeroWidthElement {
                name,
                element: element.name().to_owned(),
            });
        }
        if count.byte_len() > byte_len {
            return Err(ConfigError::LengthMismatch {
                codec: "List",
                name,
                declared: byte_len,
                computed: count.byte_len(),
            });
        }
        Ok(Self {
            name,
            byte_len,
            count: Box::new(count),
            element: Box::new(element),
        })
    }

    #[must_use]
    pub fn count_codec(&self) -> &Codec {
        &self.count
    }

    #[must_use]
    pub fn element_codec(&self) -> &Codec {
        &self.element
    }

    /// Largest number of elements that fit after the count field
    #[must_use]
    pub fn capacity(&self) -> usize {
        (self.byte_len - self.count.byte_len()) / self.element.byte_len()
    }

    /// Splits a two-entry input mapping into its count value and its elements
    fn split_input<'a>(&self, input: &'a Fields) -> CodecResult<(&'a Value, &'a [Value])> {
        if input.len() != 2 {
            return Err(LengthError::WrongKeyCount {
                exact: 2,
                actual: input.len(),
            }
            .into());
        }
        let (count, items) = match input.iter().partition::<Vec<_>, _>(|(k, _)| is_count(k)) {
            (count, items) if count.len() == 1 => (count[0].1, items[0].1),
            _ => return Err(CodecError::MissingField(COUNT_FIELD.to_owned())),
        };
        let items = items
            .as_sequence()
            .ok_or_else(|| items.unexpected("List", "sequence"))?;
        Ok((count, items))
    }
}

impl Transcode for List {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> usize {
        self.byte_len
    }

    fn kind(&self) -> CodecKind {
        CodecKind::List
    }

    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
        p.set_fit(self.byte_len)?;
        let n = self.count.parse(p)?.as_count("List")?;
        let items = (0..n)
            .map(|_| self.element.parse(p))
            .collect::<CodecResult<Vec<_>>>()?;
        let padding = p.remainder();
        p.skip(padding)?;
        p.enforce_target()?;

        let mut out = Fields::with_capacity(2);
        out.insert(self.count.name(), Value::Unsigned(n as u64));
        out.insert(self.element.name(), Value::Sequence(items));
        Ok(Value::Record(out))
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CodecResult<usize> {
        let input = value
            .as_fields()
            .ok_or_else(|| value.unexpected("List", "record"))?;
        let (count, items) = self.split_input(input)?;

        let declared = count.as_count("List")?;
        if declared != items.len() {
            return Err(LengthError::CountMismatch {
                declared,
                actual: items.len(),
            }
            .into());
        }
        if items.len() > self.capacity() {
            return Err(WidthError::TooWide {
                limit: self.byte_len,
                actual: self.count.byte_len() + items.len() * self.element.byte_len(),
            }
            .into());
        }

        let mut written = self.count.write_to(count, buf)?;
        for item in items {
            written += self.element.write_to(item, buf)?;
        }
        Ok(written + buf.push_zeros(self.byte_len - written))
    }

    fn args(&self) -> Vec<(&'static str, Arg)> {
        vec![(
            "fields",
            Arg::Codecs(vec![self.count.describe(), self.element.describe()]),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::fixed::FixedString;
    use crate::prim::Duration;
    use crate::raw::Raw;
    use crate::int::{Byte, ScaledInteger, Scaling};
    use crate::parse::error::{ParseError, WindowError};
    use crate::schema::Record;

    fn readings() -> List {
        List::new(
            "Readings",
            9,
            vec![
                Byte::new("Count", 1, 0).unwrap().into(),
                ScaledInteger::new("Values", 2, 2, Scaling::default().scale(10.0))
                    .unwrap()
                    .into(),
            ],
        )
        .unwrap()
    }

    fn list_value(count: u64, items: &[f64]) -> Value {
        Value::Record(
            vec![
                ("count", Value::Unsigned(count)),
                ("values", Value::Sequence(items.iter().copied().map(Value::Number).collect())),
            ]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn list_roundtrip_with_padding() {
        let codec = readings();
        let bytes = codec.encode(&list_value(3, &[1.0, 2.5, 10.0])).unwrap();
        assert_eq!(bytes, vec![3, 10, 0, 25, 0, 100, 0, 0, 0]);

        let decoded = codec.decode(&bytes).unwrap();
        let fields = decoded.as_fields().unwrap();
        assert_eq!(fields.get("Count"), Some(&Value::Unsigned(3)));
        assert_eq!(
            fields.get("Values"),
            Some(&Value::Sequence(vec![
                Value::Number(1.0),
                Value::Number(2.5),
                Value::Number(10.0)
            ]))
        );
    }

    #[test]
    fn list_empty_and_full() {
        let codec = readings();
        assert_eq!(codec.capacity(), 4);
        assert_eq!(codec.encode(&list_value(0, &[])).unwrap(), vec![0; 9]);
        assert_eq!(codec.encode(&list_value(4, &[0.1; 4])).unwrap(), vec![4, 1, 0, 1, 0, 1, 0, 1, 0]);
        assert!(matches!(
            codec.encode(&list_value(5, &[0.1; 5])),
            Err(CodecError::Validation(ValidationError::Width(WidthError::TooWide { limit: 9, actual: 11 })))
        ));
    }

    #[test]
    fn list_count_overruns_window() {
        assert!(matches!(
            readings().decode(&[5, 0, 0, 0, 0, 0, 0, 0, 0]),
            Err(CodecError::Validation(ValidationError::Parse(ParseError::Window(
                WindowError::ConsumeWouldExceedLimit { .. }
            ))))
        ));
    }

    #[test]
    fn list_input_checks() {
        let codec = readings();
        assert!(matches!(
            codec.encode(&list_value(2, &[1.0])),
            Err(CodecError::Validation(ValidationError::Length(LengthError::CountMismatch {
                declared: 2,
                actual: 1
            })))
        ));

        let no_count = Value::Record(
            vec![("n", Value::Unsigned(0)), ("values", Value::Sequence(vec![]))]
                .into_iter()
                .collect(),
        );
        match codec.encode(&no_count) {
            Err(err) => assert_eq!(err.missing_field(), Some("count")),
            Ok(bytes) => panic!("unexpected encoding {bytes:?}"),
        }

        let extra = Value::Record(
            vec![
                ("count", Value::Unsigned(0)),
                ("values", Value::Sequence(vec![])),
                ("other", Value::Unsigned(0)),
            ]
            .into_iter()
            .collect(),
        );
        assert!(matches!(
            codec.encode(&extra),
            Err(CodecError::Validation(ValidationError::Length(LengthError::WrongKeyCount {
                exact: 2,
                actual: 3
            })))
        ));
    }

    #[test]
    fn list_of_records() {
        let entry = Record::new(
            "Entries",
            2,
            vec![
                Byte::new("Code", 1, 0).unwrap().into(),
                Byte::new("Level", 1, 0).unwrap().into(),
            ],
        )
        .unwrap();
        let codec = List::new("Faults", 5, vec![Byte::new("count", 1, 0).unwrap().into(), entry.into()]).unwrap();
        let decoded = codec.decode(&[1, 0x21, 0x03, 0xee, 0xee]).unwrap();
        let entries = decoded
            .as_fields()
            .and_then(|f| f.get("Entries"))
            .and_then(Value::as_sequence)
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].as_fields().and_then(|f| f.get("Code")), Some(&Value::Unsigned(0x21)));

        assert_eq!(codec.encode(&decoded).unwrap(), vec![1, 0x21, 0x03, 0, 0]);
    }

    #[test]
    fn list_rejects_zero_width_element() {
        let count = || -> Codec { Byte::new("count", 4, 0).unwrap().into() };
        for element in [
            Codec::from(Raw::new("Items", 0)),
            Duration::new("Items", 0).into(),
            FixedString::new("Items", 0, 0).into(),
        ] {
            assert!(matches!(
                List::new("Events", 4, vec![count(), element]),
                Err(ConfigError::ZeroWidthElement { element: ref field, .. }) if field == "Items"
            ));
        }
    }

    #[test]
    fn list_construction() {
        let elem = || -> Codec { Byte::new("Values", 1, 0).unwrap().into() };
        assert!(matches!(
            List::new("Bad", 4, vec![elem()]),
            Err(ConfigError::MissingCount { .. })
        ));
        assert!(matches!(
            List::new("Bad", 4, vec![elem(), Byte::new("COUNT", 1, 0).unwrap().into()]),
            Err(ConfigError::ListShape { found: 2, .. })
        ));
        assert!(matches!(
            List::new("Bad", 0, vec![Byte::new("count", 1, 0).unwrap().into(), elem()]),
            Err(ConfigError::LengthMismatch { .. })
        ));
        assert!(matches!(
            List::new(
                "Bad",
                4,
                vec![Byte::new("count", 1, 0).unwrap().into(), Byte::new("Count", 1, 0).unwrap().into()]
            ),
            Err(ConfigError::ListShape { found: 2, .. })
        ));
        let info = readings().describe();
        let subs = info.sub_codecs();
        assert_eq!((subs[0].name.as_str(), subs[1].name.as_str()), ("Count", "Values"));
    }
}
