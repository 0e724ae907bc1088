mod column_type;
mod row;
mod sql_value;
mod wire_value;

pub use column_type::{ColumnKind, ColumnType};
pub use row::{QueryResult, RawQueryResult, Row};
pub use sql_value::{FromSqlValue, SqlValue};
pub use wire_value::{SqlParameter, WireValue};
