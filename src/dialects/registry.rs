use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::{AuroraMySqlDataApiDialect, AuroraPostgresDataApiDialect, Dialect};
use crate::error::{AdaError, Result};

/// Driver segment of the registry keys, as in `postgresql.auroradataapi`.
pub const REGISTRY_DRIVER: &str = "auroradataapi";

/// Registry of dialects by name.
///
/// Constructed explicitly and passed to `AdaClient::connect`; there is no
/// process-wide registry.
#[derive(Debug, Default, Clone)]
pub struct DialectRegistry {
    dialects: HashMap<String, Arc<dyn Dialect>>,
}

impl DialectRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with both Data API dialects registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_dialects(&mut registry);
        registry
    }

    /// Register a dialect under `name` (`backend.driver`).
    pub fn register(&mut self, name: impl Into<String>, dialect: Arc<dyn Dialect>) {
        let name = normalize(&name.into());
        debug!(dialect = %name, "registering dialect");
        self.dialects.insert(name, dialect);
    }

    /// Look up a dialect. Accepts `backend.driver` and the URL form `backend+driver`.
    pub fn load(&self, name: &str) -> Result<Arc<dyn Dialect>> {
        self.dialects
            .get(&normalize(name))
            .cloned()
            .ok_or_else(|| AdaError::UnknownDialect(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.dialects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn normalize(name: &str) -> String {
    name.replace('+', ".")
}

/// The two descriptors created by `register_dialects`.
#[derive(Debug, Clone)]
pub struct RegisteredDialects {
    pub mysql: Arc<AuroraMySqlDataApiDialect>,
    pub postgres: Arc<AuroraPostgresDataApiDialect>,
}

/// Registers `mysql.auroradataapi` and `postgresql.auroradataapi` and returns
/// the descriptors. Call once while setting up the host application.
pub fn register_dialects(registry: &mut DialectRegistry) -> RegisteredDialects {
    let mysql = Arc::new(AuroraMySqlDataApiDialect::new());
    let postgres = Arc::new(AuroraPostgresDataApiDialect::new());

    registry.register(
        format!("{}.{}", mysql.name(), REGISTRY_DRIVER),
        mysql.clone() as Arc<dyn Dialect>,
    );
    registry.register(
        format!("{}.{}", postgres.name(), REGISTRY_DRIVER),
        postgres.clone() as Arc<dyn Dialect>,
    );

    RegisteredDialects { mysql, postgres }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialects::Backend;

    #[test]
    fn test_register_dialects() {
        let mut registry = DialectRegistry::new();
        let registered = register_dialects(&mut registry);

        assert_eq!(
            registry.names(),
            vec!["mysql.auroradataapi", "postgresql.auroradataapi"]
        );

        let mysql = registry.load("mysql.auroradataapi").unwrap();
        assert_eq!(mysql.backend(), Backend::MySql);
        assert_eq!(registered.mysql.backend(), Backend::MySql);

        let postgres = registry.load("postgresql+auroradataapi").unwrap();
        assert_eq!(postgres.backend(), Backend::Postgres);
        assert_eq!(registered.postgres.name(), "postgresql");
    }

    #[test]
    fn test_unknown_dialect() {
        let registry = DialectRegistry::with_builtins();
        let err = registry.load("sqlite.auroradataapi").unwrap_err();
        assert!(matches!(err, AdaError::UnknownDialect(name) if name == "sqlite.auroradataapi"));
    }
}
