use std::sync::Arc;

use tracing::debug;

use super::ParamBinder;
use crate::dialects::Dialect;
use crate::error::Result;
use crate::traits::{Column, ColumnRef, DataApiDriver, Table};
use crate::types::{SqlParameter, SqlValue};

/// Entry point for building an INSERT statement.
/// Must call `.into_table()` to proceed.
pub struct Insert {
    driver: Arc<dyn DataApiDriver>,
    dialect: Arc<dyn Dialect>,
}

impl Insert {
    pub(crate) fn new(driver: Arc<dyn DataApiDriver>, dialect: Arc<dyn Dialect>) -> Self {
        Self { driver, dialect }
    }

    /// Specify the table to insert into.
    pub fn into_table<T: Table>(self, _table: T) -> InsertInto {
        InsertInto {
            driver: self.driver,
            dialect: self.dialect,
            table: T::qualified_name(),
            values: Vec::new(),
        }
    }
}

/// INSERT builder after the table has been specified.
/// Add values with `.value()`, then execute.
pub struct InsertInto {
    driver: Arc<dyn DataApiDriver>,
    dialect: Arc<dyn Dialect>,
    table: String,
    values: Vec<(ColumnRef, SqlValue)>,
}

impl InsertInto {
    /// Set the value of a column.
    pub fn value<C: Column, V: Into<SqlValue>>(mut self, column: &C, value: V) -> Self {
        self.values.push((ColumnRef::from_column(column), value.into()));
        self
    }

    fn build_sql(&self) -> Result<(String, Vec<SqlParameter>)> {
        let mut binder = ParamBinder::new(self.dialect.as_ref());
        let mut names = Vec::with_capacity(self.values.len());
        let mut exprs = Vec::with_capacity(self.values.len());

        for (col, value) in &self.values {
            names.push(col.column.as_str());
            exprs.push(binder.bind(col, value)?);
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            names.join(", "),
            exprs.join(", ")
        );
        Ok((sql, binder.into_params()))
    }

    /// Execute the statement and return the number of inserted records.
    pub async fn execute(self) -> Result<u64> {
        let (sql, params) = self.build_sql()?;
        debug!(dialect = self.dialect.name(), %sql, params = params.len(), "executing insert");
        let raw_result = self.driver.execute(&sql, &params).await?;
        Ok(raw_result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::InMemoryTestDriver;
    use crate::dialects::{AuroraMySqlDataApiDialect, AuroraPostgresDataApiDialect};
    use crate::types::{ColumnType, WireValue};
    use serde_json::json;

    struct Docs;
    struct DocsColumns {
        pub name: DocsName,
        pub body: DocsBody,
    }
    struct DocsName;
    struct DocsBody;

    impl Table for Docs {
        type Columns = DocsColumns;
        fn table_name() -> &'static str {
            "docs"
        }
        fn columns() -> Self::Columns {
            DocsColumns {
                name: DocsName,
                body: DocsBody,
            }
        }
    }

    impl Column for DocsName {
        fn column_name(&self) -> &'static str {
            "name"
        }
        fn table_name(&self) -> &'static str {
            "docs"
        }
        fn column_type(&self) -> ColumnType {
            ColumnType::Text
        }
    }

    impl Column for DocsBody {
        fn column_name(&self) -> &'static str {
            "body"
        }
        fn table_name(&self) -> &'static str {
            "docs"
        }
        fn column_type(&self) -> ColumnType {
            ColumnType::Jsonb
        }
    }

    fn insert(dialect: Arc<dyn Dialect>) -> InsertInto {
        Insert::new(Arc::new(InMemoryTestDriver::new()), dialect)
            .into_table(Docs)
            .value(&Docs::columns().name, "readme")
            .value(&Docs::columns().body, json!({"foo": [1, 2, 3]}))
    }

    #[test]
    fn test_build_insert_postgres() {
        let (sql, params) = insert(Arc::new(AuroraPostgresDataApiDialect::new()))
            .build_sql()
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO docs (name, body) VALUES (:p1, CAST(:p2 AS JSONB))"
        );
        assert_eq!(params[1].value, WireValue::from(r#"{"foo":[1,2,3]}"#));
    }

    #[test]
    fn test_build_insert_mysql() {
        let (sql, _) = insert(Arc::new(AuroraMySqlDataApiDialect::new()))
            .build_sql()
            .unwrap();
        assert_eq!(sql, "INSERT INTO docs (name, body) VALUES (:p1, :p2)");
    }
}
