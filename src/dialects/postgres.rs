//! Aurora PostgreSQL through the Data API.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Backend, CharsetQuery, Dialect};
use crate::converters::{ColSpecs, JsonConverter, NumericConverter, TemporalConverter, UuidConverter};
use crate::error::{DriverError, ErrorCode};
use crate::types::ColumnKind;

/// SQLSTATE embedded in gateway error messages.
static SQLSTATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"SQLState:\s*([0-9A-Z]{5})").expect("valid sqlstate regex"));

/// PostgreSQL dialect.
///
/// Every gateway parameter arrives as text, a number, a boolean or null, so
/// JSON, JSONB, UUID, temporal, numeric and enum parameters are cast to their
/// column type, and arrays are rebuilt from a delimited string.
#[derive(Debug, Clone)]
pub struct AuroraPostgresDataApiDialect {
    colspecs: ColSpecs,
}

impl AuroraPostgresDataApiDialect {
    pub fn new() -> Self {
        let colspecs = ColSpecs::base("postgresql")
            .with(ColumnKind::Json, Arc::new(JsonConverter::new("JSON")))
            .with(ColumnKind::Jsonb, Arc::new(JsonConverter::new("JSONB")))
            .with(ColumnKind::Uuid, Arc::new(UuidConverter::new("UUID")))
            .with(
                ColumnKind::Date,
                Arc::new(TemporalConverter::<NaiveDate>::new("DATE")),
            )
            .with(
                ColumnKind::Time,
                Arc::new(TemporalConverter::<NaiveTime>::new("TIME")),
            )
            .with(
                ColumnKind::Timestamp,
                Arc::new(TemporalConverter::<NaiveDateTime>::new("TIMESTAMP")),
            )
            .with(ColumnKind::Numeric, Arc::new(NumericConverter::new("NUMERIC")))
            .cast_enums()
            .with_arrays();
        Self { colspecs }
    }
}

impl Default for AuroraPostgresDataApiDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for AuroraPostgresDataApiDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    /// The gateway reports zero updated records for some multi-row statements.
    fn supports_sane_multi_rowcount(&self) -> bool {
        false
    }

    fn colspecs(&self) -> &ColSpecs {
        &self.colspecs
    }

    fn charset_query(&self) -> CharsetQuery {
        CharsetQuery {
            sql: "SHOW client_encoding",
            column: 0,
        }
    }

    fn extract_error_code(&self, error: &DriverError) -> Option<ErrorCode> {
        if let Some(code) = &error.code {
            return Some(code.clone());
        }
        SQLSTATE
            .captures(&error.message)
            .and_then(|caps| caps.get(1))
            .map(|m| ErrorCode::SqlState(m.as_str().to_string()))
    }
}
