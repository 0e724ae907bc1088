use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{AdaError, Result};

/// Represents a native column value on the application side of the converters.
/// Converters turn these into `WireValue`s on bind and back on result.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Int32(i32),
    Int64(i64),
    Bool(bool),
    Float64(f64),
    Decimal(Decimal),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Json(serde_json::Value),
    Uuid(Uuid),
    /// Label of an enum member.
    Enum(String),
    Array(Vec<SqlValue>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Text(_) => "text",
            SqlValue::Int32(_) => "int32",
            SqlValue::Int64(_) => "int64",
            SqlValue::Bool(_) => "bool",
            SqlValue::Float64(_) => "float64",
            SqlValue::Decimal(_) => "decimal",
            SqlValue::Date(_) => "date",
            SqlValue::Time(_) => "time",
            SqlValue::Timestamp(_) => "timestamp",
            SqlValue::Json(_) => "json",
            SqlValue::Uuid(_) => "uuid",
            SqlValue::Enum(_) => "enum",
            SqlValue::Array(_) => "array",
        }
    }

    /// Converts the value into a JSON document.
    /// Temporal values become ISO-8601 strings; arrays become JSON arrays.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            SqlValue::Null => Value::Null,
            SqlValue::Text(s) | SqlValue::Enum(s) => Value::String(s.clone()),
            SqlValue::Int32(i) => Value::from(*i),
            SqlValue::Int64(i) => Value::from(*i),
            SqlValue::Bool(b) => Value::Bool(*b),
            SqlValue::Float64(f) => Value::from(*f),
            SqlValue::Decimal(d) => Value::String(d.to_string()),
            SqlValue::Date(d) => Value::String(d.to_string()),
            SqlValue::Time(t) => Value::String(t.to_string()),
            SqlValue::Timestamp(ts) => Value::String(ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            SqlValue::Json(v) => v.clone(),
            SqlValue::Uuid(u) => Value::String(u.to_string()),
            SqlValue::Array(items) => Value::Array(items.iter().map(SqlValue::to_json).collect()),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int32(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int64(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float64(value)
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        SqlValue::Decimal(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        SqlValue::Date(value)
    }
}

impl From<NaiveTime> for SqlValue {
    fn from(value: NaiveTime) -> Self {
        SqlValue::Time(value)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(value: NaiveDateTime) -> Self {
        SqlValue::Timestamp(value)
    }
}

impl From<serde_json::Value> for SqlValue {
    fn from(value: serde_json::Value) -> Self {
        SqlValue::Json(value)
    }
}

impl From<Uuid> for SqlValue {
    fn from(value: Uuid) -> Self {
        SqlValue::Uuid(value)
    }
}

impl<T: Into<SqlValue>> From<Vec<T>> for SqlValue {
    fn from(value: Vec<T>) -> Self {
        SqlValue::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

/// Typed extraction of a converted column value.
pub trait FromSqlValue: Sized {
    fn from_sql_value(value: &SqlValue) -> Result<Self>;
}

fn wrong_kind(expected: &'static str, value: &SqlValue) -> AdaError {
    AdaError::type_mismatch("row value", expected, value.kind())
}

macro_rules! from_sql_value {
    ($ty:ty, $expected:literal, $($pat:pat => $out:expr),+ $(,)?) => {
        impl FromSqlValue for $ty {
            fn from_sql_value(value: &SqlValue) -> Result<Self> {
                match value {
                    $($pat => Ok($out),)+
                    other => Err(wrong_kind($expected, other)),
                }
            }
        }
    };
}

from_sql_value!(String, "text",
    SqlValue::Text(s) => s.clone(),
    SqlValue::Enum(s) => s.clone(),
);
from_sql_value!(i32, "int32", SqlValue::Int32(i) => *i);
from_sql_value!(i64, "int64",
    SqlValue::Int64(i) => *i,
    SqlValue::Int32(i) => i64::from(*i),
);
from_sql_value!(bool, "bool", SqlValue::Bool(b) => *b);
from_sql_value!(f64, "float64", SqlValue::Float64(f) => *f);
from_sql_value!(Decimal, "decimal", SqlValue::Decimal(d) => *d);
from_sql_value!(NaiveDate, "date", SqlValue::Date(d) => *d);
from_sql_value!(NaiveTime, "time", SqlValue::Time(t) => *t);
from_sql_value!(NaiveDateTime, "timestamp", SqlValue::Timestamp(ts) => *ts);
from_sql_value!(Uuid, "uuid", SqlValue::Uuid(u) => *u);
from_sql_value!(serde_json::Value, "json", SqlValue::Json(v) => v.clone());

impl<T: FromSqlValue> FromSqlValue for Option<T> {
    fn from_sql_value(value: &SqlValue) -> Result<Self> {
        match value {
            SqlValue::Null => Ok(None),
            other => T::from_sql_value(other).map(Some),
        }
    }
}

impl<T: FromSqlValue> FromSqlValue for Vec<T> {
    fn from_sql_value(value: &SqlValue) -> Result<Self> {
        match value {
            SqlValue::Array(items) => items.iter().map(T::from_sql_value).collect(),
            other => Err(wrong_kind("array", other)),
        }
    }
}
