use uuid::Uuid;

use super::{cast, TypeConverter};
use crate::error::{AdaError, Result};
use crate::types::{SqlValue, WireValue};

/// UUID columns, sent as hyphenated text.
#[derive(Debug, Clone, Copy)]
pub struct UuidConverter {
    sql_type: &'static str,
    cast: bool,
}

impl UuidConverter {
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

    fn parse(&self, raw: &str) -> Result<Uuid> {
        Uuid::parse_str(raw).map_err(|e| AdaError::conversion(self.sql_type, raw, e))
    }
}

impl TypeConverter for UuidConverter {
    fn sql_type(&self) -> &str {
        self.sql_type
    }

    fn bind(&self, value: &SqlValue) -> Result<WireValue> {
        match value {
            SqlValue::Null => Ok(WireValue::Null),
            SqlValue::Uuid(u) => Ok(WireValue::String(u.hyphenated().to_string())),
            SqlValue::Text(s) => Ok(WireValue::String(self.parse(s)?.hyphenated().to_string())),
            other => Err(AdaError::type_mismatch(self.sql_type, "uuid", other.kind())),
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
            WireValue::String(s) => self.parse(&s).map(SqlValue::Uuid),
            other => Err(AdaError::type_mismatch(self.sql_type, "string", other)),
        }
    }
}
