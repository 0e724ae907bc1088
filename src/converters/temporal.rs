use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{cast, TypeConverter};
use crate::error::{AdaError, Result};
use crate::types::{SqlValue, WireValue};

/// Digits of fractional seconds the parser sees after normalization.
const FRACTION_WIDTH: usize = 6;

/// Timestamp with a fractional-seconds component, anchored at the start.
/// ASCII digits only: the fraction is cut by byte offset.
static TIMESTAMP_FRACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2}[ T][0-9]{2}:[0-9]{2}:[0-9]{2})\.([0-9]+)")
        .expect("valid timestamp regex")
});

/// Time of day with a fractional-seconds component, anchored at the start.
static TIME_FRACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2}:[0-9]{2}:[0-9]{2})\.([0-9]+)").expect("valid time regex"));

/// Brings the fractional seconds of a gateway timestamp or time to exactly six digits.
///
/// The gateway drops trailing zeros (`09:37:17.3186` for `09:37:17.318600`);
/// short fractions are right-padded with zeros, longer ones are truncated.
/// Strings that do not start with a timestamp or time followed by a fraction
/// are returned unchanged.
pub fn normalize_fraction(raw: &str) -> Cow<'_, str> {
    for pattern in [&*TIMESTAMP_FRACTION, &*TIME_FRACTION] {
        if let Some(caps) = pattern.captures(raw) {
            let (Some(whole), Some(head), Some(digits)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            let digits = digits.as_str();
            let kept = &digits[..digits.len().min(FRACTION_WIDTH)];
            return Cow::Owned(format!(
                "{}.{:0<width$}{}",
                head.as_str(),
                kept,
                &raw[whole.end()..],
                width = FRACTION_WIDTH
            ));
        }
    }
    Cow::Borrowed(raw)
}

/// A chrono type that one of the temporal converters produces.
pub trait Temporal: Copy + fmt::Debug + Send + Sync + 'static {
    const NAME: &'static str;

    /// Literal accepted by the gateway.
    fn format_bind(&self) -> String;

    /// Parses a normalized gateway string.
    fn parse(raw: &str) -> std::result::Result<Self, ParseError>;

    /// Native values accepted on bind.
    fn from_native(value: &SqlValue) -> Option<Self>;

    fn into_native(self) -> SqlValue;
}

impl Temporal for NaiveDate {
    const NAME: &'static str = "date";

    fn format_bind(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }

    fn parse(raw: &str) -> std::result::Result<Self, ParseError> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    }

    fn from_native(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Date(d) => Some(*d),
            // A timestamp bound to a date column keeps its date part.
            SqlValue::Timestamp(ts) => Some(ts.date()),
            _ => None,
        }
    }

    fn into_native(self) -> SqlValue {
        SqlValue::Date(self)
    }
}

impl Temporal for NaiveTime {
    const NAME: &'static str = "time";

    fn format_bind(&self) -> String {
        self.format("%H:%M:%S%.3f").to_string()
    }

    fn parse(raw: &str) -> std::result::Result<Self, ParseError> {
        NaiveTime::parse_from_str(raw, "%H:%M:%S%.f")
    }

    fn from_native(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Time(t) => Some(*t),
            _ => None,
        }
    }

    fn into_native(self) -> SqlValue {
        SqlValue::Time(self)
    }
}

impl Temporal for NaiveDateTime {
    const NAME: &'static str = "timestamp";

    fn format_bind(&self) -> String {
        self.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
    }

    fn parse(raw: &str) -> std::result::Result<Self, ParseError> {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
    }

    fn from_native(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    fn into_native(self) -> SqlValue {
        SqlValue::Timestamp(self)
    }
}

/// Parses a gateway string into `T`, padding truncated fractional seconds first.
pub fn parse_temporal<T: Temporal>(raw: &str) -> Result<T> {
    let normalized = normalize_fraction(raw);
    T::parse(&normalized).map_err(|e| AdaError::conversion(T::NAME, raw, e))
}

/// Converter for date, time and timestamp columns.
///
/// Binds to the gateway's literal syntax with fractional seconds truncated to
/// milliseconds, and parses results with `parse_temporal`.
pub struct TemporalConverter<T> {
    sql_type: &'static str,
    cast: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Temporal> TemporalConverter<T> {
    /// Converter that casts the placeholder to `sql_type`.
    pub const fn new(sql_type: &'static str) -> Self {
        Self {
            sql_type,
            cast: true,
            _marker: PhantomData,
        }
    }

    /// Converter that leaves the placeholder bare.
    pub const fn plain(sql_type: &'static str) -> Self {
        Self {
            sql_type,
            cast: false,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TemporalConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporalConverter")
            .field("sql_type", &self.sql_type)
            .field("cast", &self.cast)
            .finish()
    }
}

impl<T: Temporal> TypeConverter for TemporalConverter<T> {
    fn sql_type(&self) -> &str {
        self.sql_type
    }

    fn bind(&self, value: &SqlValue) -> Result<WireValue> {
        match value {
            SqlValue::Null => Ok(WireValue::Null),
            SqlValue::Text(s) => Ok(WireValue::String(s.clone())),
            other => T::from_native(other)
                .map(|v| WireValue::String(v.format_bind()))
                .ok_or_else(|| AdaError::type_mismatch(self.sql_type, T::NAME, other.kind())),
        }
    }

    fn bind_expression(&self, placeholder: &str) -> String {
        if self.cast {
            cast(placeholder, self.sql_type)
        } else {
            placeholder.to_string()
        }
    }

    fn result(&self, value: WireValue) -> Result<SqlValue> {
        match value {
            WireValue::Null => Ok(SqlValue::Null),
            WireValue::String(s) => parse_temporal::<T>(&s).map(Temporal::into_native),
            other => Err(AdaError::type_mismatch(self.sql_type, "string", other)),
        }
    }
}
