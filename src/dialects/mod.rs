//! Dialect descriptors.
//!
//! A dialect tells the query layer which driver carries its statements, which
//! converter handles each column type, and how its backend reports character
//! sets and error codes. Dialects never execute SQL themselves.
//!
//! # Usage
//!
//! ```rust
//! use adars::dialects::{register_dialects, Dialect, DialectRegistry};
//!
//! let mut registry = DialectRegistry::new();
//! let builtins = register_dialects(&mut registry);
//! let postgres = registry.load("postgresql+auroradataapi").unwrap();
//! assert_eq!(postgres.name(), builtins.postgres.name());
//! ```

mod mysql;
mod postgres;
mod registry;

use std::fmt;
use std::sync::Arc;

use crate::config::{ConnectOptions, DataApiUrl};
use crate::converters::{ColSpecs, TypeConverter};
use crate::error::{DriverError, ErrorCode, Result};
use crate::types::ColumnType;

pub use mysql::AuroraMySqlDataApiDialect;
pub use postgres::AuroraPostgresDataApiDialect;
pub use registry::{register_dialects, DialectRegistry, RegisteredDialects, REGISTRY_DRIVER};

/// Name of the driver both dialects delegate network I/O to.
pub const DRIVER_NAME: &str = "aurora_data_api";

/// SQL backend behind the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    MySql,
    Postgres,
}

/// Statement that reports the connection's character set, and the position
/// of the value in its single result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharsetQuery {
    pub sql: &'static str,
    pub column: usize,
}

/// A dialect descriptor for one backend.
pub trait Dialect: Send + Sync + fmt::Debug {
    /// Backend name, e.g. `postgresql`.
    fn name(&self) -> &'static str;

    fn backend(&self) -> Backend;

    /// Driver that handles network I/O for this dialect.
    fn driver(&self) -> &'static str {
        DRIVER_NAME
    }

    /// The gateway connection has no implicit schema.
    fn default_schema_name(&self) -> Option<&str> {
        None
    }

    fn supports_native_decimal(&self) -> bool {
        false
    }

    /// Whether the row count of a multi-row statement can be trusted.
    fn supports_sane_multi_rowcount(&self) -> bool {
        true
    }

    fn supports_statement_cache(&self) -> bool {
        true
    }

    /// The dialect's type-dispatch table.
    fn colspecs(&self) -> &ColSpecs;

    /// Selects the converter for a declared column type.
    fn converter(&self, column_type: &ColumnType) -> Result<Arc<dyn TypeConverter>> {
        self.colspecs().resolve(column_type)
    }

    /// Name of the `index`-th (1-based) statement parameter.
    fn parameter_name(&self, index: usize) -> String {
        format!("p{}", index)
    }

    /// Placeholder for the `index`-th (1-based) parameter as written in SQL.
    fn placeholder(&self, index: usize) -> String {
        format!(":{}", self.parameter_name(index))
    }

    fn charset_query(&self) -> CharsetQuery;

    /// Error code of a driver-raised error, for error classification.
    fn extract_error_code(&self, error: &DriverError) -> Option<ErrorCode>;

    /// Driver connection arguments for a connection URL.
    fn create_connect_args(&self, url: &DataApiUrl) -> ConnectOptions {
        ConnectOptions::from_url(url)
    }
}
