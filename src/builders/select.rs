use std::sync::Arc;

use tracing::debug;

use super::ParamBinder;
use crate::clauses::WhereClause;
use crate::converters::TypeConverter;
use crate::dialects::Dialect;
use crate::error::Result;
use crate::traits::{Column, ColumnRef, DataApiDriver, Table};
use crate::types::{QueryResult, SqlParameter};

/// Entry point for building a SELECT query.
/// Must call `.columns()` to proceed.
pub struct Select {
    driver: Arc<dyn DataApiDriver>,
    dialect: Arc<dyn Dialect>,
}

impl Select {
    pub(crate) fn new(driver: Arc<dyn DataApiDriver>, dialect: Arc<dyn Dialect>) -> Self {
        Self { driver, dialect }
    }

    /// Specify the columns to select.
    /// Accepts a slice of column references.
    pub fn columns(self, cols: &[&dyn Column]) -> SelectWithColumns {
        let columns = cols.iter().map(|c| ColumnRef::from_column(*c)).collect();
        SelectWithColumns {
            driver: self.driver,
            dialect: self.dialect,
            columns,
        }
    }
}

/// SELECT builder after columns have been specified.
/// Must call `.from()` to proceed.
pub struct SelectWithColumns {
    driver: Arc<dyn DataApiDriver>,
    dialect: Arc<dyn Dialect>,
    columns: Vec<ColumnRef>,
}

impl SelectWithColumns {
    /// Specify the table to select from.
    pub fn from<T: Table>(self, _table: T) -> SelectWithTable {
        SelectWithTable {
            driver: self.driver,
            dialect: self.dialect,
            columns: self.columns,
            table: T::qualified_name(),
            where_clause: None,
            limit: None,
        }
    }
}

/// SELECT builder after table has been specified.
/// Can optionally add WHERE clause, LIMIT, or execute directly.
pub struct SelectWithTable {
    driver: Arc<dyn DataApiDriver>,
    dialect: Arc<dyn Dialect>,
    columns: Vec<ColumnRef>,
    table: String,
    where_clause: Option<WhereClause>,
    limit: Option<u64>,
}

impl SelectWithTable {
    /// Add a WHERE clause to the query.
    pub fn where_(mut self, clause: WhereClause) -> Self {
        self.where_clause = Some(clause);
        self
    }

    /// Add a LIMIT to the query.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Build the SQL query string and parameters.
    fn build_sql(&self) -> Result<(String, Vec<SqlParameter>)> {
        let mut sql = String::with_capacity(256);
        let mut binder = ParamBinder::new(self.dialect.as_ref());

        // SELECT clause
        sql.push_str("SELECT ");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&col.qualified_name());
        }

        // FROM clause
        sql.push_str(" FROM ");
        sql.push_str(&self.table);

        // WHERE clause
        if let Some(ref where_clause) = self.where_clause {
            sql.push_str(" WHERE ");
            let where_sql = where_clause.build_sql(&mut binder)?;
            sql.push_str(&where_sql);
        }

        // LIMIT clause
        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&limit.to_string());
        }

        Ok((sql, binder.into_params()))
    }

    /// Result converters for the selected columns, in select order.
    fn result_converters(&self) -> Result<Vec<Arc<dyn TypeConverter>>> {
        self.columns
            .iter()
            .map(|col| self.dialect.converter(&col.column_type))
            .collect()
    }

    /// Execute the query and return the converted result.
    pub async fn execute(self) -> Result<QueryResult> {
        let (sql, params) = self.build_sql()?;
        let converters = self.result_converters()?;
        debug!(dialect = self.dialect.name(), %sql, params = params.len(), "executing select");
        let raw_result = self.driver.execute(&sql, &params).await?;
        QueryResult::from_raw(raw_result, &converters)
    }
}
