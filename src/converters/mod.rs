//! Column-type converters.
//!
//! Every converter pairs a bind transform (native `SqlValue` to gateway
//! `WireValue`), an optional bind expression wrapped around the statement
//! placeholder, and a result transform (gateway value back to `SqlValue`).
//! The gateway has no parameter types beyond strings, numbers, booleans and
//! null, so converters for richer types encode to text and ask the backend to
//! cast the placeholder.

mod array;
mod enumeration;
mod json;
mod scalar;
mod temporal;
mod uuid_type;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::trace;

use crate::error::{AdaError, Result};
use crate::types::{ColumnKind, ColumnType, SqlValue, WireValue};

pub use array::{ArrayConverter, ARRAY_DELIMITER};
pub use enumeration::EnumConverter;
pub use json::JsonConverter;
pub use scalar::{
    BigIntConverter, BooleanConverter, FloatConverter, IntegerConverter, NumericConverter,
    TextConverter,
};
pub use temporal::{normalize_fraction, parse_temporal, Temporal, TemporalConverter};
pub use uuid_type::UuidConverter;

/// Bind and result transforms for one column type.
///
/// Implementations hold no mutable state and are shared across every column
/// of the matching type.
pub trait TypeConverter: Send + Sync + fmt::Debug {
    /// SQL name of the type, used for casts and error messages.
    fn sql_type(&self) -> &str;

    /// Native value to the value sent to the driver.
    fn bind(&self, value: &SqlValue) -> Result<WireValue>;

    /// SQL fragment that replaces the bare placeholder in the statement.
    fn bind_expression(&self, placeholder: &str) -> String {
        placeholder.to_string()
    }

    /// Value returned by the driver to the native value.
    fn result(&self, value: WireValue) -> Result<SqlValue>;
}

pub(crate) fn cast(placeholder: &str, sql_type: &str) -> String {
    format!("CAST({} AS {})", placeholder, sql_type)
}

/// Mapping from column kinds to converters, the dialect's type-dispatch table.
///
/// Built from `ColSpecs::base` and updated with dialect overrides. Parameterized
/// types (enums and arrays) get their converter built once per declared type.
#[derive(Clone)]
pub struct ColSpecs {
    dialect: &'static str,
    converters: HashMap<ColumnKind, Arc<dyn TypeConverter>>,
    cast_enums: bool,
    arrays: bool,
    /// Enum and array converters by declared type.
    parameterized: Arc<Mutex<HashMap<ColumnType, Arc<dyn TypeConverter>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ColSpecs {
    /// Pass-through converters with no backend casts.
    pub fn base(dialect: &'static str) -> Self {
        use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

        let mut converters: HashMap<ColumnKind, Arc<dyn TypeConverter>> = HashMap::new();
        converters.insert(ColumnKind::Text, Arc::new(TextConverter));
        converters.insert(ColumnKind::Integer, Arc::new(IntegerConverter));
        converters.insert(ColumnKind::BigInt, Arc::new(BigIntConverter));
        converters.insert(ColumnKind::Boolean, Arc::new(BooleanConverter));
        converters.insert(ColumnKind::Float, Arc::new(FloatConverter));
        converters.insert(ColumnKind::Numeric, Arc::new(NumericConverter::plain("NUMERIC")));
        converters.insert(
            ColumnKind::Date,
            Arc::new(TemporalConverter::<NaiveDate>::plain("DATE")),
        );
        converters.insert(
            ColumnKind::Time,
            Arc::new(TemporalConverter::<NaiveTime>::plain("TIME")),
        );
        converters.insert(
            ColumnKind::Timestamp,
            Arc::new(TemporalConverter::<NaiveDateTime>::plain("TIMESTAMP")),
        );
        converters.insert(ColumnKind::Json, Arc::new(JsonConverter::plain("JSON")));
        converters.insert(ColumnKind::Jsonb, Arc::new(JsonConverter::plain("JSONB")));
        converters.insert(ColumnKind::Uuid, Arc::new(UuidConverter::plain("UUID")));

        Self {
            dialect,
            converters,
            cast_enums: false,
            arrays: false,
            parameterized: Arc::default(),
        }
    }

    /// Replaces the converter for a column kind.
    pub fn with(mut self, kind: ColumnKind, converter: Arc<dyn TypeConverter>) -> Self {
        self.converters.insert(kind, converter);
        self.parameterized = Arc::default();
        self
    }

    /// Enum parameters are cast to the enum's database type.
    pub fn cast_enums(mut self) -> Self {
        self.cast_enums = true;
        self.parameterized = Arc::default();
        self
    }

    /// Allows array columns.
    pub fn with_arrays(mut self) -> Self {
        self.arrays = true;
        self.parameterized = Arc::default();
        self
    }

    /// Selects the converter for a declared column type.
    ///
    /// Enum and array converters are built on first use and shared by every
    /// later lookup of the same declared type.
    pub fn resolve(&self, column_type: &ColumnType) -> Result<Arc<dyn TypeConverter>> {
        match column_type {
            ColumnType::Enum { .. } | ColumnType::Array(_) => {
                if let Some(converter) = lock(&self.parameterized).get(column_type) {
                    return Ok(Arc::clone(converter));
                }
                let built = self.build(column_type)?;
                trace!(dialect = self.dialect, %column_type, "built converter");
                let mut parameterized = lock(&self.parameterized);
                let converter = parameterized.entry(column_type.clone()).or_insert(built);
                Ok(Arc::clone(converter))
            }
            other => self
                .converters
                .get(&other.kind())
                .cloned()
                .ok_or_else(|| self.unsupported(other)),
        }
    }

    fn build(&self, column_type: &ColumnType) -> Result<Arc<dyn TypeConverter>> {
        match column_type {
            ColumnType::Enum { name, variants } => Ok(Arc::new(EnumConverter::new(
                name.clone(),
                variants.clone(),
                self.cast_enums,
            ))),
            ColumnType::Array(element) => {
                if !self.arrays || matches!(**element, ColumnType::Array(_)) {
                    return Err(self.unsupported(column_type));
                }
                let inner = self.resolve(element)?;
                Ok(Arc::new(ArrayConverter::new(inner)))
            }
            other => Err(self.unsupported(other)),
        }
    }

    fn unsupported(&self, column_type: &ColumnType) -> AdaError {
        AdaError::UnsupportedType {
            dialect: self.dialect.to_string(),
            sql_type: column_type.to_string(),
        }
    }
}

impl fmt::Debug for ColSpecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.converters.keys().map(|k| k.to_string()).collect();
        kinds.sort();
        f.debug_struct("ColSpecs")
            .field("dialect", &self.dialect)
            .field("kinds", &kinds)
            .field("cast_enums", &self.cast_enums)
            .field("arrays", &self.arrays)
            .finish()
    }
}
