use tracing::trace;

use crate::converters::TypeConverter;
use crate::dialects::Dialect;
use crate::error::Result;
use crate::traits::ColumnRef;
use crate::types::{SqlParameter, SqlValue};

/// Collects statement parameters while SQL is being built.
///
/// Each bound value goes through its column's converter; the returned SQL
/// fragment is the placeholder wrapped in the converter's bind expression.
pub struct ParamBinder<'a> {
    dialect: &'a dyn Dialect,
    params: Vec<SqlParameter>,
}

impl<'a> ParamBinder<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            params: Vec::new(),
        }
    }

    /// Binds a value for `column` and returns the SQL fragment to use in its place.
    pub fn bind(&mut self, column: &ColumnRef, value: &SqlValue) -> Result<String> {
        let converter = self.dialect.converter(&column.column_type)?;
        self.bind_with(converter.as_ref(), value)
    }

    /// Binds a value with an explicit converter.
    pub fn bind_with(&mut self, converter: &dyn TypeConverter, value: &SqlValue) -> Result<String> {
        let index = self.params.len() + 1;
        let wire = converter.bind(value)?;
        trace!(index, sql_type = converter.sql_type(), ?wire, "bound parameter");
        self.params
            .push(SqlParameter::new(self.dialect.parameter_name(index), wire));
        Ok(converter.bind_expression(&self.dialect.placeholder(index)))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn into_params(self) -> Vec<SqlParameter> {
        self.params
    }
}
