use crate::builders::ParamBinder;
use crate::converters::TextConverter;
use crate::error::Result;
use crate::traits::{Column, ColumnRef};
use crate::types::SqlValue;

/// Represents a WHERE clause condition.
/// Supports basic comparison operations and logical combinations.
#[derive(Debug, Clone)]
pub enum WhereClause {
    /// column = value
    Eq(ColumnRef, SqlValue),
    /// column LIKE pattern
    Like(ColumnRef, String),
    /// column IS NULL
    IsNull(ColumnRef),
    /// clause AND clause
    And(Box<WhereClause>, Box<WhereClause>),
    /// clause OR clause
    Or(Box<WhereClause>, Box<WhereClause>),
}

impl WhereClause {
    /// Creates an equality condition: column = value
    pub fn eq<C: Column, V: Into<SqlValue>>(column: &C, value: V) -> Self {
        WhereClause::Eq(ColumnRef::from_column(column), value.into())
    }

    /// Creates a pattern match condition: column LIKE pattern
    pub fn like<C: Column>(column: &C, pattern: impl Into<String>) -> Self {
        WhereClause::Like(ColumnRef::from_column(column), pattern.into())
    }

    /// Creates a null check: column IS NULL
    pub fn is_null<C: Column>(column: &C) -> Self {
        WhereClause::IsNull(ColumnRef::from_column(column))
    }

    /// Combines this clause with another using AND
    pub fn and(self, other: WhereClause) -> Self {
        WhereClause::And(Box::new(self), Box::new(other))
    }

    /// Combines this clause with another using OR
    pub fn or(self, other: WhereClause) -> Self {
        WhereClause::Or(Box::new(self), Box::new(other))
    }

    /// Builds the SQL string, binding values through the binder.
    /// Values are converted by their column's converter and the placeholder
    /// is wrapped in the converter's bind expression.
    pub fn build_sql(&self, binder: &mut ParamBinder<'_>) -> Result<String> {
        match self {
            WhereClause::Eq(col, value) => {
                let expr = binder.bind(col, value)?;
                Ok(format!("{} = {}", col.qualified_name(), expr))
            }
            WhereClause::Like(col, pattern) => {
                // The pattern is text whatever the column type is.
                let expr = binder.bind_with(&TextConverter, &SqlValue::Text(pattern.clone()))?;
                Ok(format!("{} LIKE {}", col.qualified_name(), expr))
            }
            WhereClause::IsNull(col) => Ok(format!("{} IS NULL", col.qualified_name())),
            WhereClause::And(left, right) => {
                let left_sql = left.build_sql(binder)?;
                let right_sql = right.build_sql(binder)?;
                Ok(format!("({}) AND ({})", left_sql, right_sql))
            }
            WhereClause::Or(left, right) => {
                let left_sql = left.build_sql(binder)?;
                let right_sql = right.build_sql(binder)?;
                Ok(format!("({}) OR ({})", left_sql, right_sql))
            }
        }
    }
}
