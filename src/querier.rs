use std::sync::Arc;

use crate::builders::{Delete, Insert, Select};
use crate::dialects::Dialect;
use crate::traits::DataApiDriver;

/// Query builder factory.
/// Created from an AdaClient and used to build and execute statements.
pub struct Querier {
    driver: Arc<dyn DataApiDriver>,
    dialect: Arc<dyn Dialect>,
}

impl Querier {
    pub(crate) fn new(driver: Arc<dyn DataApiDriver>, dialect: Arc<dyn Dialect>) -> Self {
        Self { driver, dialect }
    }

    /// Start building a SELECT query.
    pub fn select(&self) -> Select {
        Select::new(Arc::clone(&self.driver), Arc::clone(&self.dialect))
    }

    /// Start building an INSERT statement.
    pub fn insert(&self) -> Insert {
        Insert::new(Arc::clone(&self.driver), Arc::clone(&self.dialect))
    }

    /// Start building a DELETE statement.
    pub fn delete(&self) -> Delete {
        Delete::new(Arc::clone(&self.driver), Arc::clone(&self.dialect))
    }
}
