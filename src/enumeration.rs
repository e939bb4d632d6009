//! Enumerated values and their label tables
//!
//! An [`Enumeration`] codec stores a small little-endian unsigned id and
//! resolves it against a named *enumeration set* held by an external
//! [`EnumTable`]. The table is passed to the codec at construction and only
//! ever read, so one table can be shared by every codec in a
//! [`Registry`](crate::registry::Registry) and by any number of threads.
//!
//! Decoding never fails on an unknown id: the value carries the id together
//! with a `"not found in <set>"` marker (see [`EnumValue::not_found`]).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::conv::info::{Arg, CodecKind};
use crate::conv::{target::Target, Transcode};
use crate::error::{CodecResult, ConfigError, ValidationError};
use crate::int::ByteOrder;
use crate::parse::Parser;
use crate::value::{EnumValue, Value};

/// Read-only provider of enumeration sets
///
/// Lookups report a miss as `None`; they never fail.
pub trait EnumTable: Send + Sync {
    /// Label of `id` in the set named `set`
    fn lookup(&self, set: &str, id: u64) -> Option<&str>;

    /// Id whose label in `set` equals `label`, ignoring case
    fn find_id(&self, set: &str, label: &str) -> Option<u64>;
}

/// In-memory [`EnumTable`] built from `(set, id, label)` entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticEnumTable {
    sets: BTreeMap<String, BTreeMap<u64, String>>,
}

impl StaticEnumTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one label, returning the label it replaced, if any
    pub fn insert(&mut self, set: impl Into<String>, id: u64, label: impl Into<String>) -> Option<String> {
        self.sets
            .entry(set.into())
            .or_default()
            .insert(id, label.into())
    }

    /// Adds every `(id, label)` pair of `entries` to `set`
    #[must_use]
    pub fn with_set<L: Into<String>>(
        mut self,
        set: impl Into<String>,
        entries: impl IntoIterator<Item = (u64, L)>,
    ) -> Self {
        let labels = self.sets.entry(set.into()).or_default();
        labels.extend(entries.into_iter().map(|(id, label)| (id, label.into())));
        self
    }

    /// Names of all sets, in lexicographic order
    pub fn sets(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }
}

impl<S: Into<String>, L: Into<String>> FromIterator<(S, u64, L)> for StaticEnumTable {
    fn from_iter<I: IntoIterator<Item = (S, u64, L)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (set, id, label) in iter {
            table.insert(set, id, label);
        }
        table
    }
}

impl EnumTable for StaticEnumTable {
    fn lookup(&self, set: &str, id: u64) -> Option<&str> {
        self.sets.get(set)?.get(&id).map(String::as_str)
    }

    fn find_id(&self, set: &str, label: &str) -> Option<u64> {
        self.sets
            .get(set)?
            .iter()
            .find(|(_, l)| l.eq_ignore_ascii_case(label))
            .map(|(&id, _)| id)
    }
}

/// Codec for an id drawn from a named enumeration set
#[derive(Clone)]
pub struct Enumeration {
    name: String,
    byte_len: usize,
    set: String,
    table: Arc<dyn EnumTable>,
}

impl Enumeration {
    /// # Errors
    ///
    /// Fails unless `1 <= byte_len <= 8`.
    pub fn new(
        name: impl Into<String>,
        byte_len: usize,
        set: impl Into<String>,
        table: Arc<dyn EnumTable>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        ConfigError::check_len("Enumeration", &name, 1, 8, byte_len)?;
        Ok(Self {
            name,
            byte_len,
            set: set.into(),
            table,
        })
    }

    /// Name of the enumeration set this codec resolves against
    #[must_use]
    pub fn set(&self) -> &str {
        &self.set
    }

    /// Resolves `id` to an [`EnumValue`], substituting the miss sentinel for unknown ids
    #[must_use]
    pub fn resolve(&self, id: u64) -> EnumValue {
        match self.table.lookup(&self.set, id) {
            Some(label) => EnumValue::new(id, label),
            None => {
                tracing::debug!(codec = %self.name, set = %self.set, id, "enumeration id has no label");
                EnumValue::not_found(id, &self.set)
            }
        }
    }
}

impl fmt::Debug for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumeration")
            .field("name", &self.name)
            .field("byte_len", &self.byte_len)
            .field("set", &self.set)
            .finish_non_exhaustive()
    }
}

impl Transcode for Enumeration {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> usize {
        self.byte_len
    }

    fn kind(&self) -> CodecKind {
        CodecKind::Enumeration
    }

    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
        let id = p.take_uint(self.byte_len, ByteOrder::Little)?;
        Ok(Value::Enum(self.resolve(id)))
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CodecResult<usize> {
        let label = match value {
            Value::Enum(EnumValue { text, .. }) | Value::Text(text) => text.as_str(),
            other => return Err(other.unexpected("Enumeration", "label").into()),
        };
        let id = self
            .table
            .find_id(&self.set, label)
            .ok_or_else(|| ValidationError::UnknownLabel {
                set: self.set.clone(),
                label: label.to_owned(),
            })?;
        if self.byte_len < 8 && id >> (8 * self.byte_len) != 0 {
            return Err(ValidationError::OutOfRange {
                value: id as f64,
                width: self.byte_len,
                signed: false,
            }
            .into());
        }
        let mut word = [0u8; 8];
        ByteOrder::Little.write_uint(&mut word, id, self.byte_len);
        Ok(buf.push_all(&word[..self.byte_len]))
    }

    fn args(&self) -> Vec<(&'static str, Arg)> {
        vec![("enum_set", Arg::Text(self.set.clone()))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    fn modes() -> Arc<dyn EnumTable> {
        Arc::new(StaticEnumTable::new().with_set(
            "OperatingMode",
            [(0, "Standby"), (1, "Heating"), (2, "Cooling"), (300, "Service")],
        ))
    }

    #[test]
    fn decode_known_and_unknown() {
        let codec = Enumeration::new("Mode", 1, "OperatingMode", modes()).unwrap();
        assert_eq!(
            codec.decode(&[2]).unwrap(),
            Value::Enum(EnumValue::new(2, "Cooling"))
        );
        assert_eq!(
            codec.decode(&[9]).unwrap(),
            Value::Enum(EnumValue::new(9, "not found in OperatingMode"))
        );
    }

    #[test]
    fn unknown_set_is_a_miss() {
        let codec = Enumeration::new("Mode", 1, "Missing", modes()).unwrap();
        assert_eq!(
            codec.decode(&[1]).unwrap(),
            Value::Enum(EnumValue::not_found(1, "Missing"))
        );
    }

    #[test]
    fn encode_by_label() {
        let codec = Enumeration::new("Mode", 2, "OperatingMode", modes()).unwrap();
        assert_eq!(codec.encode(&"heating".into()).unwrap(), vec![1, 0]);
        assert_eq!(
            codec.encode(&Value::Enum(EnumValue::new(0, "SERVICE"))).unwrap(),
            vec![0x2c, 0x01]
        );
        assert!(matches!(
            codec.encode(&"Defrost".into()),
            Err(CodecError::Validation(ValidationError::UnknownLabel { .. }))
        ));
    }

    #[test]
    fn encode_id_must_fit() {
        let codec = Enumeration::new("Mode", 1, "OperatingMode", modes()).unwrap();
        assert!(matches!(
            codec.encode(&"Service".into()),
            Err(CodecError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(Enumeration::new("Mode", 9, "OperatingMode", modes()).is_err());
    }

    #[test]
    fn table_from_entries() {
        let table: StaticEnumTable = vec![("A", 1, "one"), ("B", 1, "uno"), ("A", 2, "two")]
            .into_iter()
            .collect();
        assert_eq!(table.lookup("B", 1), Some("uno"));
        assert_eq!(table.find_id("A", "TWO"), Some(2));
        assert_eq!(table.sets().collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
