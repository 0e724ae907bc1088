//! Aurora MySQL through the Data API.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Backend, CharsetQuery, Dialect};
use crate::converters::{ColSpecs, JsonConverter, NumericConverter, TemporalConverter, UuidConverter};
use crate::error::{DriverError, ErrorCode};
use crate::types::ColumnKind;

/// Vendor code embedded in gateway error messages.
static MYSQL_ERROR_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)error code:?\s*(\d+)").expect("valid error code regex"));

/// MySQL dialect: temporal columns are cast so the backend parses the literal
/// instead of comparing strings. There are no array or UUID types, and enums
/// are matched by label without a cast.
#[derive(Debug, Clone)]
pub struct AuroraMySqlDataApiDialect {
    colspecs: ColSpecs,
}

impl AuroraMySqlDataApiDialect {
    pub fn new() -> Self {
        // Fractional precision is explicit: a bare TIME or DATETIME cast drops milliseconds.
        let colspecs = ColSpecs::base("mysql")
            .with(
                ColumnKind::Date,
                Arc::new(TemporalConverter::<NaiveDate>::new("DATE")),
            )
            .with(
                ColumnKind::Time,
                Arc::new(TemporalConverter::<NaiveTime>::new("TIME(3)")),
            )
            .with(
                ColumnKind::Timestamp,
                Arc::new(TemporalConverter::<NaiveDateTime>::new("DATETIME(3)")),
            )
            .with(ColumnKind::Numeric, Arc::new(NumericConverter::plain("DECIMAL")))
            .with(ColumnKind::Json, Arc::new(JsonConverter::plain("JSON")))
            .with(ColumnKind::Uuid, Arc::new(UuidConverter::plain("CHAR(36)")));
        Self { colspecs }
    }
}

impl Default for AuroraMySqlDataApiDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for AuroraMySqlDataApiDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn backend(&self) -> Backend {
        Backend::MySql
    }

    fn supports_native_decimal(&self) -> bool {
        true
    }

    fn colspecs(&self) -> &ColSpecs {
        &self.colspecs
    }

    fn charset_query(&self) -> CharsetQuery {
        CharsetQuery {
            sql: "SHOW VARIABLES LIKE 'character_set_client'",
            column: 1,
        }
    }

    fn extract_error_code(&self, error: &DriverError) -> Option<ErrorCode> {
        if let Some(code) = &error.code {
            return Some(code.clone());
        }
        MYSQL_ERROR_CODE
            .captures(&error.message)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .map(ErrorCode::Numeric)
    }
}
