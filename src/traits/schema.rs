use crate::types::ColumnType;

/// A typed column. The declared `ColumnType` picks the converter that
/// values of this column go through.
pub trait Column {
    /// Returns the column name as it appears in the database.
    fn column_name(&self) -> &'static str;

    /// Returns the table name this column belongs to.
    fn table_name(&self) -> &'static str;

    /// Returns the semantic type that selects the column's converter.
    fn column_type(&self) -> ColumnType;

    /// Returns the fully qualified column name (table.column).
    fn qualified_name(&self) -> String {
        format!("{}.{}", self.table_name(), self.column_name())
    }
}

/// A reference to a column, used internally by query builders.
/// This allows storing column information without requiring the original Column type.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
    pub column_type: ColumnType,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            column_type,
        }
    }

    pub fn from_column<C: Column + ?Sized>(col: &C) -> Self {
        Self {
            table: col.table_name().to_string(),
            column: col.column_name().to_string(),
            column_type: col.column_type(),
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }
}

/// A table the builders can target.
///
/// Gateway connections carry no search path, so a table outside the
/// database's default schema must name its schema to be found.
pub trait Table {
    /// Column accessors, one field per column.
    type Columns;

    fn table_name() -> &'static str;

    fn schema() -> Option<&'static str> {
        None
    }

    /// `schema.table`, or the bare table name without a schema.
    fn qualified_name() -> String {
        Self::schema().map_or_else(
            || Self::table_name().to_string(),
            |schema| format!("{}.{}", schema, Self::table_name()),
        )
    }

    fn columns() -> Self::Columns;
}
