mod driver;
mod schema;

pub use driver::{DataApiDriver, DriverConnector};
pub use schema::{Column, ColumnRef, Table};
