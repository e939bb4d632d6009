//! Model for representing and transcoding diagnostic Data Identifier payloads
//!
//! # Overview
//!
//! A diagnostic bus exchanges the values of *Data Identifiers* (DIDs) as
//! fixed-size byte buffers whose layout is defined by a device catalog.
//! This crate provides the codecs that translate between those buffers and
//! structured, human-usable [`Value`]s, together with a [`Registry`] that
//! maps each DID to its codec.
//!
//! Codecs come in two families:
//!
//!   * *Primitive* codecs interpret a single window of bytes: [`Raw`],
//!     [`ScaledInteger`], [`Byte`], [`Boolean`], [`FixedString`],
//!     [`VersionTriplet`], [`MacAddress`], [`IpAddress`], [`ShortDate`],
//!     [`DateTime`], [`Duration`], [`UnixTimestamp`], and [`Enumeration`].
//!   * *Composite* codecs are built from other codecs and nest arbitrarily:
//!     [`Record`] (heterogeneous fields), [`Array`] (fixed repetition), and
//!     [`List`] (repetition driven by an embedded count).
//!
//! Every codec implements [`Transcode`], whose provided methods
//! [`decode`](Transcode::decode), [`encode`](Transcode::encode), and
//! [`describe`](Transcode::describe) are the intended entry points. The
//! closed union [`Codec`] holds any of them, and adds a raw pass-through
//! mode ([`Mode::Raw`]) in which the byte window is exchanged as hex.
//!
//! # Byte-level model
//!
//! Decoding goes through the [`Parser`] abstraction, whose *context windows*
//! keep each composite from reading past its declared length. Encoding writes
//! into a [`Target`], and the top-level [`encode`](Transcode::encode)
//! only hands back a buffer once the whole value has been written at exactly
//! the codec's byte-length.
//!
//! # Features
//!
//!   * `check_complete_parse`: top-level decoding rejects trailing bytes
//!   * `strict_boolean`: [`Boolean`] rejects tokens other than `on`/`off`
//!   * `serde_impls`: `serde::Serialize` for [`Value`] and [`CodecInfo`]

pub mod builder;
pub mod codec;
pub mod conv;
pub mod enumeration;
pub mod error;
pub mod fixed;
pub mod int;
pub mod parse;
pub mod prelude;
pub mod prim;
pub mod raw;
pub mod registry;
pub mod schema;
pub mod seq;
pub mod time;
pub mod value;

pub use crate::builder::{strict::StrictBuilder, Builder};
pub use crate::codec::{Codec, Mode};
pub use crate::conv::{
    info::{Arg, CodecInfo, CodecKind},
    target::Target,
    Transcode,
};
pub use crate::enumeration::{EnumTable, Enumeration, StaticEnumTable};
pub use crate::error::{CodecError, CodecResult, ConfigError, RegistryError};
pub use crate::fixed::{FixedString, IpAddress, MacAddress, VersionTriplet};
pub use crate::int::{Byte, ByteOrder, ScaledInteger, Scaling};
pub use crate::parse::{error::ParseError, ParseResult, Parser, SliceParser};
pub use crate::prim::{Boolean, Duration};
pub use crate::raw::{decode_raw, encode_raw, Raw};
pub use crate::registry::{Did, Registry};
pub use crate::schema::Record;
pub use crate::seq::{fix::Array, lim::List};
pub use crate::time::{DateTime, ShortDate, TimeFormat, UnixTimestamp};
pub use crate::value::{EnumValue, Fields, Switch, Timestamp, Value};
