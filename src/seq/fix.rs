//! Sequence-type with a fixed number of repetitions
//!
//! This module defines [`Array`], which repeats each of its sub-codecs a
//! constant `array_length` times. The layout is column-major: all
//! repetitions of the first sub-codec come first, then all repetitions of the
//! second, and so on. Decoding therefore never depends on buffer content for
//! its shape.

use crate::codec::Codec;
use crate::conv::info::{Arg, CodecKind};
use crate::conv::{target::Target, Transcode};
use crate::error::{CodecResult, ConfigError};
use crate::fixed::encode_not_implemented;
use crate::parse::Parser;
use crate::value::{Fields, Value};

/// Fixed-count repetition of one or more sub-codecs
#[derive(Debug, Clone)]
pub struct Array {
    name: String,
    byte_len: usize,
    fields: Vec<Codec>,
    array_length: usize,
}

impl Array {
    /// # Errors
    ///
    /// Fails if `array_length` times the summed field lengths differs from
    /// (or overflows past) `byte_len`, if field names repeat, or if a field declares an offset.
    pub fn new(
        name: impl Into<String>,
        byte_len: usize,
        fields: Vec<Codec>,
        array_length: usize,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        for (ix, field) in fields.iter().enumerate() {
            field.check_member(&name)?;
            if fields[..ix].iter().any(|prev| prev.name() == field.name()) {
                return Err(ConfigError::DuplicateField {
                    name,
                    field: field.name().to_owned(),
                });
            }
        }
        let computed = fields
            .iter()
            .try_fold(0usize, |acc, field| acc.checked_add(field.byte_len()))
            .and_then(|row| row.checked_mul(array_length))
            .unwrap_or(usize::MAX);
        if computed != byte_len {
            return Err(ConfigError::LengthMismatch {
                codec: "Array",
                name,
                declared: byte_len,
                computed,
            });
        }
        Ok(Self {
            name,
            byte_len,
            fields,
            array_length,
        })
    }

    #[must_use]
    pub fn array_length(&self) -> usize {
        self.array_length
    }
}

impl Transcode for Array {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> usize {
        self.byte_len
    }

    fn kind(&self) -> CodecKind {
        CodecKind::Array
    }

    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
        p.set_fit(self.byte_len)?;
        let mut out = Fields::with_capacity(self.fields.len());
        for field in &self.fields {
            let items = (0..self.array_length)
                .map(|_| field.parse(p))
                .collect::<CodecResult<Vec<_>>>()?;
            out.insert(field.name(), Value::Sequence(items));
        }
        p.enforce_target()?;
        Ok(Value::Record(out))
    }

    fn write_to<U: Target>(&self, _: &Value, _: &mut U) -> CodecResult<usize> {
        encode_not_implemented(self.kind())
    }

    fn args(&self) -> Vec<(&'static str, Arg)> {
        vec![
            (
                "fields",
                Arg::Codecs(self.fields.iter().map(Transcode::describe).collect()),
            ),
            ("array_length", Arg::Unsigned(self.array_length as u64)),
        ]
    }
}
