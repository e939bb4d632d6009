//! Common imports for building and calling codecs
//!
//! ```
//! use didcodec::prelude::*;
//!
//! let level = Byte::new("Level", 1, 0).unwrap();
//! assert_eq!(level.decode(&[7]).unwrap(), Value::Unsigned(7));
//! ```

pub use crate::codec::{Codec, Mode};
pub use crate::conv::{info::CodecInfo, Transcode};
pub use crate::enumeration::{EnumTable, Enumeration, StaticEnumTable};
pub use crate::error::{CodecError, CodecResult, ConfigError, RegistryError};
pub use crate::fixed::{FixedString, IpAddress, MacAddress, VersionTriplet};
pub use crate::int::{Byte, ByteOrder, ScaledInteger, Scaling};
pub use crate::prim::{Boolean, Duration};
pub use crate::raw::Raw;
pub use crate::registry::{Did, Registry};
pub use crate::schema::Record;
pub use crate::seq::{Array, List};
pub use crate::time::{DateTime, ShortDate, TimeFormat, UnixTimestamp};
pub use crate::value::{EnumValue, Fields, Switch, Timestamp, Value};
