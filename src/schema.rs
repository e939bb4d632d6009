//! Record codec
//!
//! A [`Record`] is the heterogeneous composite: an ordered list of named
//! sub-codecs laid out back to back, whose byte-lengths sum to the record's
//! own. It decodes to a [`Value::Record`] keyed by sub-codec name, in
//! declaration order, and encodes from a mapping with (at least) the same
//! keys.
//!
//! Sub-codecs may themselves be composites, to any depth. Each layer opens a
//! context window of its declared length while decoding (see
//! [`Parser::set_fit`]), so that a sub-codec can never read past the end of
//! the record containing it.

use crate::codec::Codec;
use crate::conv::info::{Arg, CodecKind};
use crate::conv::{target::Target, Transcode};
use crate::error::{CodecError, CodecResult, ConfigError};
use crate::parse::Parser;
use crate::value::{Fields, Value};

/// Ordered, fixed-layout collection of named fields
#[derive(Debug, Clone)]
pub struct Record {
    name: String,
    byte_len: usize,
    fields: Vec<Codec>,
}

impl Record {
    /// Constructs a record over `fields`, in layout order.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::LengthMismatch`] if the field lengths do not sum to `byte_len`
    /// * [`ConfigError::DuplicateField`] if two fields share a name
    /// * [`ConfigError::OffsetInComposite`] if a field declares a decode offset
    pub fn new(name: impl Into<String>, byte_len: usize, fields: Vec<Codec>) -> Result<Self, ConfigError> {
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
            .unwrap_or(usize::MAX);
        if computed != byte_len {
            return Err(ConfigError::LengthMismatch {
                codec: "Record",
                name,
                declared: byte_len,
                computed,
            });
        }
        Ok(Self {
            name,
            byte_len,
            fields,
        })
    }

    /// Sub-codecs in layout order
    #[must_use]
    pub fn fields(&self) -> &[Codec] {
        &self.fields
    }
}

impl Transcode for Record {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> usize {
        self.byte_len
    }

    fn kind(&self) -> CodecKind {
        CodecKind::Record
    }

    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
        p.set_fit(self.byte_len)?;
        let mut out = Fields::with_capacity(self.fields.len());
        for field in &self.fields {
            out.insert(field.name(), field.parse(p)?);
        }
        p.enforce_target()?;
        Ok(Value::Record(out))
    }

    /// Writes each field from the entry of the same name in a
    /// [`Value::Record`]. Entries with no matching field are ignored.
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CodecResult<usize> {
        let input = value
            .as_fields()
            .ok_or_else(|| value.unexpected("Record", "record"))?;
        let mut written = 0;
        for field in &self.fields {
            let v = input
                .get(field.name())
                .ok_or_else(|| CodecError::MissingField(field.name().to_owned()))?;
            written += field.write_to(v, buf)?;
        }
        Ok(written)
    }

    fn args(&self) -> Vec<(&'static str, Arg)> {
        vec![(
            "fields",
            Arg::Codecs(self.fields.iter().map(Transcode::describe).collect()),
        )]
    }
}
