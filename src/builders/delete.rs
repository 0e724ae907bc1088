use std::sync::Arc;

use tracing::debug;

use super::ParamBinder;
use crate::clauses::WhereClause;
use crate::dialects::Dialect;
use crate::error::Result;
use crate::traits::{DataApiDriver, Table};
use crate::types::SqlParameter;

/// Entry point for building a DELETE statement.
/// Must call `.from()` to proceed.
pub struct Delete {
    driver: Arc<dyn DataApiDriver>,
    dialect: Arc<dyn Dialect>,
}

impl Delete {
    pub(crate) fn new(driver: Arc<dyn DataApiDriver>, dialect: Arc<dyn Dialect>) -> Self {
        Self { driver, dialect }
    }

    /// Specify the table to delete from.
    pub fn from<T: Table>(self, _table: T) -> DeleteFrom {
        DeleteFrom {
            driver: self.driver,
            dialect: self.dialect,
            table: T::qualified_name(),
            where_clause: None,
        }
    }
}

/// DELETE builder after the table has been specified.
/// Without a WHERE clause every row is deleted.
pub struct DeleteFrom {
    driver: Arc<dyn DataApiDriver>,
    dialect: Arc<dyn Dialect>,
    table: String,
    where_clause: Option<WhereClause>,
}

impl DeleteFrom {
    /// Add a WHERE clause to the statement.
    pub fn where_(mut self, clause: WhereClause) -> Self {
        self.where_clause = Some(clause);
        self
    }

    fn build_sql(&self) -> Result<(String, Vec<SqlParameter>)> {
        let mut binder = ParamBinder::new(self.dialect.as_ref());
        let mut sql = format!("DELETE FROM {}", self.table);
        if let Some(ref where_clause) = self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clause.build_sql(&mut binder)?);
        }
        Ok((sql, binder.into_params()))
    }

    /// Execute the statement and return the number of deleted records.
    pub async fn execute(self) -> Result<u64> {
        let (sql, params) = self.build_sql()?;
        debug!(dialect = self.dialect.name(), %sql, params = params.len(), "executing delete");
        let raw_result = self.driver.execute(&sql, &params).await?;
        Ok(raw_result.rows_affected)
    }
}
