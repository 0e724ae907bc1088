//! adars - Aurora Data API dialects for a type-safe query builder
//!
//! Statements are sent through an HTTP gateway driver instead of a native
//! wire protocol. The gateway only carries strings, numbers, booleans, nulls
//! and arrays of those, so each column type has a converter that encodes
//! values on bind, asks the backend to cast the parameter, and decodes the
//! values that come back.
//!
//! # Example
//! ```ignore
//! use adars::{AdaClient, DialectRegistry, WhereClause, Table, Column};
//!
//! // Register the dialects and connect through an external driver
//! let registry = DialectRegistry::with_builtins();
//! let client = AdaClient::connect(
//!     "postgresql+auroradataapi://:@/mydb?aurora_cluster_arn=...&secret_arn=...",
//!     &registry,
//!     &connector,
//! )
//! .await?;
//! let querier = client.querier();
//!
//! // Execute a SELECT query
//! let row = querier
//!     .select()
//!     .columns(&[&Users::columns().id, &Users::columns().added])
//!     .from(Users)
//!     .where_(WhereClause::eq(&Users::columns().name, "John"))
//!     .execute()
//!     .await?
//!     .single_row()?;
//!
//! let added: NaiveDateTime = row.get_as(&Users::columns().added)?;
//! ```

pub mod builders;
pub mod clauses;
pub mod config;
pub mod converters;
pub mod dialects;
pub mod drivers;
pub mod error;
pub mod querier;
pub mod traits;
pub mod types;

mod client;

// Re-export main types for convenient access
pub use clauses::WhereClause;
pub use client::AdaClient;
pub use config::{ConnectOptions, DataApiUrl};
pub use dialects::{register_dialects, Dialect, DialectRegistry};
pub use error::{AdaError, DriverError, ErrorCode, Result};
pub use querier::Querier;
pub use traits::{Column, ColumnRef, DataApiDriver, DriverConnector, Table};
pub use types::{ColumnType, FromSqlValue, QueryResult, RawQueryResult, Row, SqlValue, WireValue};
