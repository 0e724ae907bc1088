use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ConnectOptions;
use crate::error::Result;
use crate::types::{RawQueryResult, SqlParameter};

/// Trait for the gateway driver.
/// The driver owns everything network-facing:
/// - Talking HTTP to the Data API
/// - Sending named parameters as gateway scalars
/// - Returning result rows as `WireValue`s
///
/// Execution failures are reported as `AdaError::Driver`, with the backend
/// error code when the gateway supplies one.
#[async_trait]
pub trait DataApiDriver: Send + Sync {
    /// Execute a SQL statement with the given parameters.
    /// Parameters use named placeholders (`:p1`, `:p2`, etc.)
    async fn execute(&self, sql: &str, params: &[SqlParameter]) -> Result<RawQueryResult>;
}

/// Opens driver connections from parsed connection options.
#[async_trait]
pub trait DriverConnector: Send + Sync {
    async fn connect(&self, options: &ConnectOptions) -> Result<Arc<dyn DataApiDriver>>;
}
