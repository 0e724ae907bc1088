use std::str::FromStr;

use rust_decimal::Decimal;

use super::{cast, TypeConverter};
use crate::error::{AdaError, Result};
use crate::types::{SqlValue, WireValue};

/// Text columns. Strings in, strings out.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextConverter;

impl TypeConverter for TextConverter {
    fn sql_type(&self) -> &str {
        "TEXT"
    }

    fn bind(&self, value: &SqlValue) -> Result<WireValue> {
        match value {
            SqlValue::Null => Ok(WireValue::Null),
            SqlValue::Text(s) | SqlValue::Enum(s) => Ok(WireValue::String(s.clone())),
            other => Err(AdaError::type_mismatch(self.sql_type(), "text", other.kind())),
        }
    }

    fn result(&self, value: WireValue) -> Result<SqlValue> {
        match value {
            WireValue::Null => Ok(SqlValue::Null),
            WireValue::String(s) => Ok(SqlValue::Text(s)),
            other => Err(AdaError::type_mismatch(self.sql_type(), "string", other)),
        }
    }
}

/// 32-bit integer columns. The gateway returns every integer as a long.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerConverter;

impl TypeConverter for IntegerConverter {
    fn sql_type(&self) -> &str {
        "INTEGER"
    }

    fn bind(&self, value: &SqlValue) -> Result<WireValue> {
        match value {
            SqlValue::Null => Ok(WireValue::Null),
            SqlValue::Int32(i) => Ok(WireValue::Long(i64::from(*i))),
            SqlValue::Int64(i) => Ok(WireValue::Long(*i)),
            other => Err(AdaError::type_mismatch(self.sql_type(), "int32", other.kind())),
        }
    }

    fn result(&self, value: WireValue) -> Result<SqlValue> {
        match value {
            WireValue::Null => Ok(SqlValue::Null),
            WireValue::Long(i) => i32::try_from(i)
                .map(SqlValue::Int32)
                .map_err(|e| AdaError::conversion(self.sql_type(), i, e)),
            other => Err(AdaError::type_mismatch(self.sql_type(), "long", other)),
        }
    }
}

/// 64-bit integer columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigIntConverter;

impl TypeConverter for BigIntConverter {
    fn sql_type(&self) -> &str {
        "BIGINT"
    }

    fn bind(&self, value: &SqlValue) -> Result<WireValue> {
        match value {
            SqlValue::Null => Ok(WireValue::Null),
            SqlValue::Int32(i) => Ok(WireValue::Long(i64::from(*i))),
            SqlValue::Int64(i) => Ok(WireValue::Long(*i)),
            other => Err(AdaError::type_mismatch(self.sql_type(), "int64", other.kind())),
        }
    }

    fn result(&self, value: WireValue) -> Result<SqlValue> {
        match value {
            WireValue::Null => Ok(SqlValue::Null),
            WireValue::Long(i) => Ok(SqlValue::Int64(i)),
            other => Err(AdaError::type_mismatch(self.sql_type(), "long", other)),
        }
    }
}

/// Boolean columns. MySQL stores booleans as TINYINT(1) and returns 0 or 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanConverter;

impl TypeConverter for BooleanConverter {
    fn sql_type(&self) -> &str {
        "BOOLEAN"
    }

    fn bind(&self, value: &SqlValue) -> Result<WireValue> {
        match value {
            SqlValue::Null => Ok(WireValue::Null),
            SqlValue::Bool(b) => Ok(WireValue::Bool(*b)),
            other => Err(AdaError::type_mismatch(self.sql_type(), "bool", other.kind())),
        }
    }

    fn result(&self, value: WireValue) -> Result<SqlValue> {
        match value {
            WireValue::Null => Ok(SqlValue::Null),
            WireValue::Bool(b) => Ok(SqlValue::Bool(b)),
            WireValue::Long(0) => Ok(SqlValue::Bool(false)),
            WireValue::Long(1) => Ok(SqlValue::Bool(true)),
            other => Err(AdaError::conversion(self.sql_type(), other, "not a boolean")),
        }
    }
}

/// Double precision columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatConverter;

impl TypeConverter for FloatConverter {
    fn sql_type(&self) -> &str {
        "DOUBLE PRECISION"
    }

    fn bind(&self, value: &SqlValue) -> Result<WireValue> {
        match value {
            SqlValue::Null => Ok(WireValue::Null),
            SqlValue::Float64(f) => Ok(WireValue::Double(*f)),
            SqlValue::Int32(i) => Ok(WireValue::Double(f64::from(*i))),
            // Magnitudes above 2^53 lose precision.
            SqlValue::Int64(i) => Ok(WireValue::Double(*i as f64)),
            other => Err(AdaError::type_mismatch(self.sql_type(), "float64", other.kind())),
        }
    }

    fn result(&self, value: WireValue) -> Result<SqlValue> {
        match value {
            WireValue::Null => Ok(SqlValue::Null),
            WireValue::Double(f) => Ok(SqlValue::Float64(f)),
            WireValue::Long(i) => Ok(SqlValue::Float64(i as f64)),
            other => Err(AdaError::type_mismatch(self.sql_type(), "double", other)),
        }
    }
}

/// Exact numeric columns. The gateway returns decimals as strings to keep precision.
#[derive(Debug, Clone, Copy)]
pub struct NumericConverter {
    sql_type: &'static str,
    cast: bool,
}

impl NumericConverter {
    pub const fn new(sql_type: &'static str) -> Self {
        Self {
            sql_type,
            cast: true,
        }
    }

    pub const fn plain(sql_type: &'static str) -> Self {
        Self {
            sql_type,
            cast: false,
        }
    }
}

impl TypeConverter for NumericConverter {
    fn sql_type(&self) -> &str {
        self.sql_type
    }

    fn bind(&self, value: &SqlValue) -> Result<WireValue> {
        match value {
            SqlValue::Null => Ok(WireValue::Null),
            SqlValue::Decimal(d) => Ok(WireValue::String(d.to_string())),
            SqlValue::Int32(i) => Ok(WireValue::Long(i64::from(*i))),
            SqlValue::Int64(i) => Ok(WireValue::Long(*i)),
            other => Err(AdaError::type_mismatch(self.sql_type, "decimal", other.kind())),
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
            WireValue::String(s) => Decimal::from_str(&s)
                .map(SqlValue::Decimal)
                .map_err(|e| AdaError::conversion(self.sql_type, &s, e)),
            WireValue::Long(i) => Ok(SqlValue::Decimal(Decimal::from(i))),
            WireValue::Double(f) => Decimal::try_from(f)
                .map(SqlValue::Decimal)
                .map_err(|e| AdaError::conversion(self.sql_type, f, e)),
            other => Err(AdaError::type_mismatch(self.sql_type, "string", other)),
        }
    }
}
