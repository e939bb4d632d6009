//! Self-description of codecs
//!
//! [`CodecInfo`] is the stable, documentation-oriented view of a codec:
//! its kind, byte-length, name, and kind-specific construction arguments,
//! with nested sub-codec descriptions for composites. It plays no part in
//! encoding or decoding.

#[cfg(feature = "serde_impls")]
use serde::{ser::SerializeMap, ser::SerializeStruct, Serialize, Serializer};
use std::fmt::{self, Display};

/// Closed set of codec kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CodecKind {
    Raw,
    ScaledInteger,
    Byte,
    Boolean,
    FixedString,
    VersionTriplet,
    MacAddress,
    IpAddress,
    ShortDate,
    DateTime,
    Duration,
    UnixTimestamp,
    Enumeration,
    Record,
    Array,
    List,
}

impl CodecKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CodecKind::Raw => "Raw",
            CodecKind::ScaledInteger => "ScaledInteger",
            CodecKind::Byte => "Byte",
            CodecKind::Boolean => "Boolean",
            CodecKind::FixedString => "FixedString",
            CodecKind::VersionTriplet => "VersionTriplet",
            CodecKind::MacAddress => "MacAddress",
            CodecKind::IpAddress => "IpAddress",
            CodecKind::ShortDate => "ShortDate",
            CodecKind::DateTime => "DateTime",
            CodecKind::Duration => "Duration",
            CodecKind::UnixTimestamp => "UnixTimestamp",
            CodecKind::Enumeration => "Enumeration",
            CodecKind::Record => "Record",
            CodecKind::Array => "Array",
            CodecKind::List => "List",
        }
    }
}

impl Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a single construction argument
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Bool(bool),
    Unsigned(u64),
    Integer(i64),
    Float(f64),
    Text(String),
    Codecs(Vec<CodecInfo>),
}

/// Self-description of a codec: `{codec, len, name, args}`
#[derive(Debug, Clone, PartialEq)]
pub struct CodecInfo {
    pub codec: CodecKind,
    pub len: usize,
    pub name: String,
    pub args: Vec<(&'static str, Arg)>,
}

impl CodecInfo {
    /// Looks up a construction argument by key
    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&Arg> {
        self.args.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Descriptions of nested sub-codecs, if any
    #[must_use]
    pub fn sub_codecs(&self) -> &[CodecInfo] {
        match self.arg("fields") {
            Some(Arg::Codecs(subs)) => subs,
            _ => &[],
        }
    }
}

#[cfg(feature = "serde_impls")]
impl Serialize for Arg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Arg::Bool(b) => serializer.serialize_bool(*b),
            Arg::Unsigned(n) => serializer.serialize_u64(*n),
            Arg::Integer(n) => serializer.serialize_i64(*n),
            Arg::Float(x) => serializer.serialize_f64(*x),
            Arg::Text(s) => serializer.serialize_str(s),
            Arg::Codecs(subs) => subs.serialize(serializer),
        }
    }
}

#[cfg(feature = "serde_impls")]
struct ArgMap<'a>(&'a [(&'static str, Arg)]);

#[cfg(feature = "serde_impls")]
impl Serialize for ArgMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde_impls")]
impl Serialize for CodecInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("CodecInfo", 4)?;
        st.serialize_field("codec", self.codec.as_str())?;
        st.serialize_field("len", &self.len)?;
        st.serialize_field("name", &self.name)?;
        st.serialize_field("args", &ArgMap(&self.args))?;
        st.end()
    }
}
