use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    converters::TypeConverter,
    error::{AdaError, Result},
    types::{FromSqlValue, SqlValue, WireValue},
    Column,
};

/// Driver-agnostic raw result from a statement.
/// Values are still in their gateway representation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQueryResult {
    /// Column names in order
    pub columns: Vec<String>,
    /// Rows, where each row is a vector of wire values in column order
    pub rows: Vec<Vec<WireValue>>,
    /// Number of records changed by a DML statement
    pub rows_affected: u64,
}

impl RawQueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<WireValue>>) -> Self {
        Self {
            columns,
            rows,
            rows_affected: 0,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn affected(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            ..Self::default()
        }
    }
}

/// Conversion for values that have no declared column type.
impl From<WireValue> for SqlValue {
    fn from(value: WireValue) -> Self {
        match value {
            WireValue::Null => SqlValue::Null,
            WireValue::Bool(b) => SqlValue::Bool(b),
            WireValue::Long(i) => SqlValue::Int64(i),
            WireValue::Double(f) => SqlValue::Float64(f),
            WireValue::String(s) => SqlValue::Text(s),
            WireValue::Array(items) => SqlValue::Array(items.into_iter().map(Into::into).collect()),
        }
    }
}

/// A single row result from a query.
/// Values have been through their column's result converter and are accessed by column name.
#[derive(Debug, Clone)]
pub struct Row {
    values: HashMap<String, SqlValue>,
}

impl Row {
    /// Creates a new Row from column names and converted values.
    pub(crate) fn new(columns: &[String], values: Vec<SqlValue>) -> Self {
        let values = columns
            .iter()
            .zip(values)
            .map(|(col, val)| (col.clone(), val))
            .collect();
        Self { values }
    }

    /// Gets a value by column.
    pub fn get<T: Column + ?Sized>(&self, column: &T) -> Result<&SqlValue> {
        self.values
            .get(column.column_name())
            .ok_or_else(|| AdaError::ColumnNotFound(column.qualified_name()))
    }

    /// Gets a value by column and extracts it as a Rust type.
    pub fn get_as<V: FromSqlValue, T: Column + ?Sized>(&self, column: &T) -> Result<V> {
        V::from_sql_value(self.get(column)?)
    }

    /// Gets a value by its result column name.
    pub fn get_by_name(&self, name: &str) -> Result<&SqlValue> {
        self.values
            .get(name)
            .ok_or_else(|| AdaError::ColumnNotFound(name.to_string()))
    }

    /// Returns all column names in this row.
    pub fn columns(&self) -> Vec<&str> {
        self.values.keys().map(|s| s.as_str()).collect()
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of a query execution, containing zero or more rows.
#[derive(Debug)]
pub struct QueryResult {
    columns: Vec<String>,
    rows: Vec<Row>,
    rows_affected: u64,
}

impl QueryResult {
    /// Creates a QueryResult from a RawQueryResult, converting the value at
    /// position `i` of every row with `converters[i]`. Positions without a
    /// converter use the plain `WireValue` mapping.
    pub fn from_raw(raw: RawQueryResult, converters: &[Arc<dyn TypeConverter>]) -> Result<Self> {
        let rows = raw
            .rows
            .into_iter()
            .map(|values| {
                let converted = values
                    .into_iter()
                    .enumerate()
                    .map(|(i, value)| match converters.get(i) {
                        Some(converter) => converter.result(value),
                        None => Ok(SqlValue::from(value)),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Row::new(&raw.columns, converted))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            columns: raw.columns,
            rows,
            rows_affected: raw.rows_affected,
        })
    }

    /// Extracts a single row from the result.
    /// Returns an error if the result contains zero or more than one row.
    pub fn single_row(self) -> Result<Row> {
        let actual = self.rows.len();
        let mut rows = self.rows.into_iter();
        match (rows.next(), rows.next()) {
            (Some(row), None) => Ok(row),
            _ => Err(AdaError::UnexpectedRowCount {
                expected: 1,
                actual,
            }),
        }
    }

    /// Returns all rows from the result.
    pub fn rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns a reference to the rows without consuming the result.
    pub fn rows_ref(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the column names from this result.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of records changed by the statement.
    pub fn rows_affected(&self) -> u64 {
        self.rows_affected
    }

    /// Returns the number of rows in this result.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if this result contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::{IntegerConverter, TemporalConverter};
    use crate::types::ColumnType;
    use chrono::NaiveDate;

    // Test column implementations
    struct IdColumn;
    struct BirthdayColumn;
    struct MissingColumn;

    impl Column for IdColumn {
        fn column_name(&self) -> &'static str {
            "id"
        }
        fn table_name(&self) -> &'static str {
            "test"
        }
        fn column_type(&self) -> ColumnType {
            ColumnType::Integer
        }
    }

    impl Column for BirthdayColumn {
        fn column_name(&self) -> &'static str {
            "birthday"
        }
        fn table_name(&self) -> &'static str {
            "test"
        }
        fn column_type(&self) -> ColumnType {
            ColumnType::Date
        }
    }

    impl Column for MissingColumn {
        fn column_name(&self) -> &'static str {
            "missing"
        }
        fn table_name(&self) -> &'static str {
            "test"
        }
        fn column_type(&self) -> ColumnType {
            ColumnType::Text
        }
    }

    fn converters() -> Vec<Arc<dyn TypeConverter>> {
        vec![
            Arc::new(IntegerConverter),
            Arc::new(TemporalConverter::<NaiveDate>::new("DATE")),
        ]
    }

    #[test]
    fn test_row_get() {
        let raw = RawQueryResult::new(
            vec!["id".to_string(), "birthday".to_string()],
            vec![vec![WireValue::Long(1), WireValue::from("1970-01-01")]],
        );
        let row = QueryResult::from_raw(raw, &converters())
            .unwrap()
            .single_row()
            .unwrap();

        assert_eq!(row.get(&IdColumn).unwrap(), &SqlValue::Int32(1));
        assert_eq!(
            row.get_as::<NaiveDate, _>(&BirthdayColumn).unwrap(),
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
        );
        assert!(row.get(&MissingColumn).is_err());
    }

    #[test]
    fn test_from_raw_without_converters() {
        let raw = RawQueryResult::new(
            vec!["schemaname".to_string()],
            vec![vec![WireValue::from("public")]],
        );
        let row = QueryResult::from_raw(raw, &[]).unwrap().single_row().unwrap();
        assert_eq!(
            row.get_by_name("schemaname").unwrap(),
            &SqlValue::Text("public".into())
        );
    }

    #[test]
    fn test_from_raw_propagates_conversion_error() {
        let raw = RawQueryResult::new(
            vec!["id".to_string(), "birthday".to_string()],
            vec![vec![WireValue::Long(1), WireValue::from("not a date")]],
        );
        let err = QueryResult::from_raw(raw, &converters()).unwrap_err();
        assert!(matches!(err, AdaError::Conversion { .. }));
    }

    #[test]
    fn test_query_result_single_row_error_on_empty() {
        let raw = RawQueryResult::new(vec!["id".to_string()], vec![]);
        let result = QueryResult::from_raw(raw, &[]).unwrap();
        let err = result.single_row().unwrap_err();
        match err {
            AdaError::UnexpectedRowCount { expected, actual } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 0);
            }
            _ => panic!("Expected UnexpectedRowCount error"),
        }
    }

    #[test]
    fn test_query_result_single_row_error_on_multiple() {
        let raw = RawQueryResult::new(
            vec!["id".to_string()],
            vec![vec![WireValue::Long(1)], vec![WireValue::Long(2)]],
        );
        let result = QueryResult::from_raw(raw, &[]).unwrap();
        let err = result.single_row().unwrap_err();
        match err {
            AdaError::UnexpectedRowCount { expected, actual } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 2);
            }
            _ => panic!("Expected UnexpectedRowCount error"),
        }
    }
}
