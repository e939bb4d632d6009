//! Calendar codecs
//!
//! Decode-only codecs for the three date and time layouts found in device
//! data:
//!
//!   * [`ShortDate`]: `[day, month, years_since_2000]`, rendered `DD.MM.YYYY`
//!   * [`DateTime`]: either a broken-down calendar layout ([`TimeFormat::Vm`])
//!     or 48-bit little-endian Unix seconds ([`TimeFormat::Ts`])
//!   * [`UnixTimestamp`]: 32-bit little-endian Unix seconds
//!
//! All instants are interpreted in UTC and formatted as
//! `%Y-%m-%d %H:%M:%S` (see [`TEXT_FORMAT`]).

use chrono::{NaiveDate, TimeZone, Utc};
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::conv::info::{Arg, CodecKind};
use crate::conv::{target::Target, Transcode};
use crate::error::{CodecResult, ConfigError, ValidationError};
use crate::fixed::encode_not_implemented;
use crate::int::ByteOrder;
use crate::parse::Parser;
use crate::value::{Timestamp, Value};

/// `strftime`-style format of every decoded instant
pub const TEXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Resolves Unix seconds to a [`Timestamp`] in UTC
fn from_unix_seconds(secs: i64) -> Result<Timestamp, ValidationError> {
    let dt = Utc
        .timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| ValidationError::InvalidDateTime(format!("{secs} seconds since epoch")))?;
    Ok(Timestamp {
        text: dt.format(TEXT_FORMAT).to_string(),
        epoch_millis: dt.timestamp_millis(),
    })
}

/// Day-month-year date with a two-digit year offset from 2000
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortDate {
    name: String,
    byte_len: usize,
}

impl ShortDate {
    /// # Errors
    ///
    /// Fails if `byte_len` is below 3.
    pub fn new(name: impl Into<String>, byte_len: usize) -> Result<Self, ConfigError> {
        let name = name.into();
        ConfigError::check_len("ShortDate", &name, 3, usize::MAX, byte_len)?;
        Ok(Self { name, byte_len })
    }
}

impl Transcode for ShortDate {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> usize {
        self.byte_len
    }

    fn kind(&self) -> CodecKind {
        CodecKind::ShortDate
    }

    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
        let w = p.consume(self.byte_len)?;
        let year = 2000 + u32::from(w[2]);
        Ok(Value::Text(format!("{:02}.{:02}.{year}", w[0], w[1])))
    }

    fn write_to<U: Target>(&self, _: &Value, _: &mut U) -> CodecResult<usize> {
        encode_not_implemented(self.kind())
    }
}

/// Binary layout of a [`DateTime`] window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeFormat {
    /// `[century, year_low, month, day, weekday, hour, minute, second]`
    #[default]
    Vm,
    /// Unix seconds as a 48-bit little-endian unsigned integer
    Ts,
}

impl TimeFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TimeFormat::Vm => "VM",
            TimeFormat::Ts => "ts",
        }
    }

    /// Smallest window that holds this layout
    #[must_use]
    pub const fn min_len(self) -> usize {
        match self {
            TimeFormat::Vm => 8,
            TimeFormat::Ts => 6,
        }
    }
}

impl FromStr for TimeFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VM" => Ok(TimeFormat::Vm),
            "ts" => Ok(TimeFormat::Ts),
            _ => Err(ConfigError::TimeFormat(s.to_owned())),
        }
    }
}

impl Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point in time, decoded to both formatted text and epoch milliseconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    name: String,
    byte_len: usize,
    format: TimeFormat,
}

impl DateTime {
    /// # Errors
    ///
    /// Fails if `byte_len` is too short for the layout selected by `format`.
    pub fn new(name: impl Into<String>, byte_len: usize, format: TimeFormat) -> Result<Self, ConfigError> {
        let name = name.into();
        ConfigError::check_len("DateTime", &name, format.min_len(), usize::MAX, byte_len)?;
        Ok(Self {
            name,
            byte_len,
            format,
        })
    }

    #[must_use]
    pub fn format(&self) -> TimeFormat {
        self.format
    }

    fn from_fields(w: &[u8]) -> Result<Timestamp, ValidationError> {
        let year = i32::from(w[0]) * 100 + i32::from(w[1]);
        let (month, day) = (u32::from(w[2]), u32::from(w[3]));
        let (hour, minute, second) = (u32::from(w[5]), u32::from(w[6]), u32::from(w[7]));
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or_else(|| {
                ValidationError::InvalidDateTime(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                ))
            })?;
        let dt = Utc.from_utc_datetime(&naive);
        Ok(Timestamp {
            text: dt.format(TEXT_FORMAT).to_string(),
            epoch_millis: dt.timestamp_millis(),
        })
    }
}

impl Transcode for DateTime {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> usize {
        self.byte_len
    }

    fn kind(&self) -> CodecKind {
        CodecKind::DateTime
    }

    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
        let ts = match self.format {
            TimeFormat::Vm => Self::from_fields(p.consume(self.byte_len)?)?,
            TimeFormat::Ts => {
                let secs = p.take_uint(6, ByteOrder::Little)?;
                p.skip(self.byte_len - 6)?;
                from_unix_seconds(secs as i64)?
            }
        };
        Ok(Value::DateTime(ts))
    }

    fn write_to<U: Target>(&self, _: &Value, _: &mut U) -> CodecResult<usize> {
        encode_not_implemented(self.kind())
    }

    fn args(&self) -> Vec<(&'static str, Arg)> {
        vec![("time_format", Arg::Text(self.format.as_str().to_owned()))]
    }
}

/// 32-bit Unix seconds, decoded to formatted UTC text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnixTimestamp {
    name: String,
    byte_len: usize,
    offset: usize,
}

impl UnixTimestamp {
    /// # Errors
    ///
    /// Fails if `byte_len` is below 4.
    pub fn new(name: impl Into<String>, byte_len: usize, offset: usize) -> Result<Self, ConfigError> {
        let name = name.into();
        ConfigError::check_len("UnixTimestamp", &name, 4, usize::MAX, byte_len)?;
        Ok(Self {
            name,
            byte_len,
            offset,
        })
    }
}

impl Transcode for UnixTimestamp {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> usize {
        self.byte_len
    }

    fn kind(&self) -> CodecKind {
        CodecKind::UnixTimestamp
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn parse<P: Parser>(&self, p: &mut P) -> CodecResult<Value> {
        p.skip(self.offset)?;
        let secs = p.take_uint(4, ByteOrder::Little)?;
        p.skip(self.byte_len - 4)?;
        Ok(Value::Text(from_unix_seconds(secs as i64)?.text))
    }

    fn write_to<U: Target>(&self, _: &Value, _: &mut U) -> CodecResult<usize> {
        encode_not_implemented(self.kind())
    }

    fn args(&self) -> Vec<(&'static str, Arg)> {
        vec![("offset", Arg::Unsigned(self.offset as u64))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CodecError, UnsupportedError};

    fn check_datetime(codec: &DateTime, bytes: &[u8], text: &str, epoch_millis: i64) {
        assert_eq!(
            codec.decode(bytes).unwrap(),
            Value::DateTime(Timestamp {
                text: text.to_owned(),
                epoch_millis
            })
        );
    }

    #[test]
    fn short_date() {
        let codec = ShortDate::new("InstallDate", 3).unwrap();
        assert_eq!(codec.decode(&[5, 3, 24]).unwrap(), Value::Text("05.03.2024".into()));
        assert!(matches!(
            codec.encode(&"05.03.2024".into()),
            Err(CodecError::Unsupported(UnsupportedError::EncodeNotImplemented {
                codec: "ShortDate"
            }))
        ));
        assert!(ShortDate::new("InstallDate", 2).is_err());
    }

    #[test]
    fn datetime_vm_layout() {
        let codec = DateTime::new("SystemTime", 8, TimeFormat::Vm).unwrap();
        check_datetime(
            &codec,
            &[20, 24, 1, 15, 1, 12, 30, 45],
            "2024-01-15 12:30:45",
            1_705_321_845_000,
        );
        assert!(matches!(
            codec.decode(&[20, 24, 2, 30, 1, 0, 0, 0]),
            Err(CodecError::Validation(ValidationError::InvalidDateTime(_)))
        ));
    }

    #[test]
    fn datetime_ts_layout() {
        let codec = DateTime::new("LastService", 6, "ts".parse().unwrap()).unwrap();
        let secs: u64 = 1_705_321_845;
        let bytes = &secs.to_le_bytes()[..6];
        check_datetime(&codec, bytes, "2024-01-15 12:30:45", 1_705_321_845_000);
        assert!(DateTime::new("LastService", 5, TimeFormat::Ts).is_err());
        assert!(DateTime::new("SystemTime", 6, TimeFormat::Vm).is_err());
        assert!("vm".parse::<TimeFormat>().is_err());
    }

    #[test]
    fn unix_timestamp() {
        let codec = UnixTimestamp::new("ErrorTime", 4, 0).unwrap();
        assert_eq!(
            codec.decode(&0u32.to_le_bytes()).unwrap(),
            Value::Text("1970-01-01 00:00:00".into())
        );

        let shifted = UnixTimestamp::new("ErrorTime", 4, 2).unwrap();
        let mut bytes = vec![0xee, 0xee];
        bytes.extend_from_slice(&1_705_321_845u32.to_le_bytes());
        assert_eq!(
            shifted.decode(&bytes).unwrap(),
            Value::Text("2024-01-15 12:30:45".into())
        );
    }
}
