use std::sync::Arc;

use tracing::debug;

use crate::config::DataApiUrl;
use crate::dialects::{Dialect, DialectRegistry};
use crate::error::{AdaError, ErrorCode, Result};
use crate::querier::Querier;
use crate::traits::{DataApiDriver, DriverConnector};
use crate::types::{QueryResult, SqlParameter, SqlValue};

/// Main entry point for adars.
/// Pairs a dialect with a gateway driver and provides query building capabilities.
pub struct AdaClient {
    dialect: Arc<dyn Dialect>,
    driver: Arc<dyn DataApiDriver>,
}

impl AdaClient {
    /// Connect through the dialect named by the URL scheme.
    ///
    /// # Example
    /// ```ignore
    /// let registry = DialectRegistry::with_builtins();
    /// let client = AdaClient::connect(
    ///     "postgresql+auroradataapi://:@/mydb?aurora_cluster_arn=arn:...&secret_arn=arn:...",
    ///     &registry,
    ///     &connector,
    /// )
    /// .await?;
    /// ```
    pub async fn connect(
        url: &str,
        registry: &DialectRegistry,
        connector: &dyn DriverConnector,
    ) -> Result<Self> {
        let url = DataApiUrl::parse(url)?;
        let dialect = registry.load(&url.dialect_name())?;
        let options = dialect.create_connect_args(&url);
        debug!(
            dialect = dialect.name(),
            driver = dialect.driver(),
            database = ?options.database,
            "connecting"
        );
        let driver = connector.connect(&options).await?;
        Ok(Self { dialect, driver })
    }

    /// Create a new client from a dialect and an already connected driver.
    pub fn new(dialect: Arc<dyn Dialect>, driver: Arc<dyn DataApiDriver>) -> Self {
        Self { dialect, driver }
    }

    pub fn dialect(&self) -> &Arc<dyn Dialect> {
        &self.dialect
    }

    /// Create a Querier for building and executing statements.
    pub fn querier(&self) -> Querier {
        Querier::new(Arc::clone(&self.driver), Arc::clone(&self.dialect))
    }

    /// Execute literal SQL. Result values are mapped without column types.
    pub async fn execute(&self, sql: &str, params: &[SqlParameter]) -> Result<QueryResult> {
        debug!(dialect = self.dialect.name(), %sql, params = params.len(), "executing");
        let raw_result = self.driver.execute(sql, params).await?;
        QueryResult::from_raw(raw_result, &[])
    }

    /// Ask the backend for the connection's character set.
    pub async fn detect_charset(&self) -> Result<String> {
        let query = self.dialect.charset_query();
        let raw_result = self.driver.execute(query.sql, &[]).await?;
        let row = raw_result
            .rows
            .into_iter()
            .next()
            .ok_or(AdaError::UnexpectedRowCount {
                expected: 1,
                actual: 0,
            })?;
        let value = row.into_iter().nth(query.column).ok_or_else(|| {
            AdaError::ColumnNotFound(format!("{} (column {})", query.sql, query.column))
        })?;
        match SqlValue::from(value) {
            SqlValue::Text(charset) => Ok(charset),
            other => Err(AdaError::type_mismatch("charset", "text", other.kind())),
        }
    }

    /// Backend error code of a driver-raised error, if there is one.
    pub fn error_code(&self, error: &AdaError) -> Option<ErrorCode> {
        match error {
            AdaError::Driver(driver_error) => self.dialect.extract_error_code(driver_error),
            _ => None,
        }
    }
}
