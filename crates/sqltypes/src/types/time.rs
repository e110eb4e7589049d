//! Calendar dates and times of day, stored as timezone-free text.
//!
//! Storing dates as `YYYY-MM-DD` text keeps drivers from applying timezone conversions that
//! would shift the day.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::format_description as fd,
};

use crate::{
    Dialect, Error,
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    types::{ColumnType, same_everywhere},
    value::{DataType, Value},
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = fd!("[year]-[month]-[day]");

/// A calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(pub time::Date);

impl Date {
    pub fn new(year: i32, month: u8, day: u8) -> crate::Result<Self> {
        let input = format!("{year:04}-{month:02}-{day:02}");
        let month = time::Month::try_from(month).map_err(|e| Error::parse("date", &input, e))?;
        time::Date::from_calendar_date(year, month, day)
            .map(Self)
            .map_err(|e| Error::parse("date", &input, e))
    }

    pub fn parse(input: &str) -> crate::Result<Self> {
        time::Date::parse(input, DATE_FORMAT)
            .map(Self)
            .map_err(|e| Error::parse("date", input, e))
    }

    /// Today, in UTC.
    pub fn today() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(DATE_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse(s)
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self(date)
    }
}

/// The date in the datetime's own offset, not converted to UTC.
impl From<OffsetDateTime> for Date {
    fn from(dt: OffsetDateTime) -> Self {
        Self(dt.date())
    }
}

impl From<PrimitiveDateTime> for Date {
    fn from(dt: PrimitiveDateTime) -> Self {
        Self(dt.date())
    }
}

impl Encode for Date {
    fn encode(self) -> Result<Value, EncodeError> {
        let formatted = self
            .0
            .format(DATE_FORMAT)
            .map_err(|e| EncodeError::Conversion(format!("failed to format Date: {e}")))?;
        Ok(Value::tagged_text(formatted, DataType::Date))
    }
}

impl<'r> Decode<'r> for Date {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(
            value,
            DataType::Date | DataType::Datetime | DataType::Text | DataType::Blob
        );
        let text = value.as_text()?.trim();
        // Datetime text such as `2024-01-02 03:04:05` or `2024-01-02T03:04:05Z`: keep the date.
        let date_part = text.get(..10).unwrap_or(text);
        time::Date::parse(date_part, DATE_FORMAT)
            .map(Self)
            .map_err(|e| DecodeError::Conversion(format!("invalid date {text:?}: {e}")))
    }
}

impl ColumnType for Date {
    fn data_type() -> DataType {
        DataType::Date
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        same_everywhere(dialect, "DATE")
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// A time of day with nanosecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(pub time::Time);

impl Time {
    pub fn new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> crate::Result<Self> {
        time::Time::from_hms_nano(hour, minute, second, nanosecond)
            .map(Self)
            .map_err(|e| {
                Error::parse(
                    "time",
                    &format!("{hour:02}:{minute:02}:{second:02}.{nanosecond:09}"),
                    e,
                )
            })
    }

    pub fn parse(input: &str) -> crate::Result<Self> {
        parse_time(input).ok_or_else(|| Error::parse("time", input, "expected HH:MM[:SS[.fff]]"))
    }

    pub fn hour(&self) -> u8 {
        self.0.hour()
    }

    pub fn minute(&self) -> u8 {
        self.0.minute()
    }

    pub fn second(&self) -> u8 {
        self.0.second()
    }

    pub fn nanosecond(&self) -> u32 {
        self.0.nanosecond()
    }
}

fn parse_time(input: &str) -> Option<Time> {
    let formats: &[&[BorrowedFormatItem<'_>]] = &[
        fd!("[hour]:[minute]:[second].[subsecond]"),
        fd!("[hour]:[minute]:[second]"),
        fd!("[hour]:[minute]"),
    ];
    let input = input.trim();
    formats
        .iter()
        .find_map(|format| time::Time::parse(input, format).ok())
        .map(Time)
}

fn format_time(t: &time::Time) -> Result<String, time::error::Format> {
    if t.nanosecond() == 0 {
        t.format(fd!("[hour]:[minute]:[second]"))
    } else {
        t.format(fd!("[hour]:[minute]:[second].[subsecond digits:9]"))
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let formatted = format_time(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl FromStr for Time {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse(s)
    }
}

impl From<time::Time> for Time {
    fn from(t: time::Time) -> Self {
        Self(t)
    }
}

impl Encode for Time {
    fn encode(self) -> Result<Value, EncodeError> {
        let formatted = format_time(&self.0)
            .map_err(|e| EncodeError::Conversion(format!("failed to format Time: {e}")))?;
        Ok(Value::tagged_text(formatted, DataType::Time))
    }
}

impl<'r> Decode<'r> for Time {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(value, DataType::Time | DataType::Text | DataType::Blob);
        let text = value.as_text()?;
        parse_time(text).ok_or_else(|| format!("invalid time: {text}").into())
    }
}

impl ColumnType for Time {
    fn data_type() -> DataType {
        DataType::Time
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        same_everywhere(dialect, "TIME")
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
