use std::sync::Arc;

use adars::dialects::{
    register_dialects, AuroraMySqlDataApiDialect, AuroraPostgresDataApiDialect, Backend,
    DRIVER_NAME,
};
use adars::drivers::{InMemoryTestConnector, InMemoryTestDriver, InMemoryTestResponseBuilder};
use adars::types::WireValue;
use adars::{AdaClient, AdaError, DataApiDriver, Dialect, DialectRegistry, DriverError, ErrorCode};

const CLUSTER_ARN: &str = "arn:aws:rds:us-east-1:123456789012:cluster:orders";
const SECRET_ARN: &str = "arn:aws:secretsmanager:us-east-1:123456789012:secret:orders-ro";

fn url(scheme: &str) -> String {
    format!(
        "{}://:@/orders?aurora_cluster_arn={}&secret_arn={}&region_name=us-east-1",
        scheme, CLUSTER_ARN, SECRET_ARN
    )
}

#[test]
fn test_both_dialects_are_registered() {
    let mut registry = DialectRegistry::new();
    let registered = register_dialects(&mut registry);

    let mysql = registry.load("mysql.auroradataapi").unwrap();
    let postgres = registry.load("postgresql+auroradataapi").unwrap();

    assert_eq!(mysql.backend(), Backend::MySql);
    assert_eq!(postgres.backend(), Backend::Postgres);
    assert_eq!(mysql.driver(), DRIVER_NAME);
    assert_eq!(postgres.driver(), DRIVER_NAME);
    assert_eq!(registered.mysql.name(), "mysql");
    assert_eq!(registered.postgres.name(), "postgresql");
}

#[test]
fn test_unknown_dialect() {
    let registry = DialectRegistry::with_builtins();
    let err = registry.load("sqlite.auroradataapi").unwrap_err();
    assert!(matches!(err, AdaError::UnknownDialect(name) if name == "sqlite.auroradataapi"));
}

#[tokio::test]
async fn test_connect_through_registry() {
    let driver = Arc::new(InMemoryTestDriver::new());
    let connector = InMemoryTestConnector::new(Arc::clone(&driver));
    let registry = DialectRegistry::with_builtins();

    let client = AdaClient::connect(&url("postgresql+auroradataapi"), &registry, &connector)
        .await
        .unwrap();

    assert_eq!(client.dialect().name(), "postgresql");

    let connections = connector.connections();
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].database.as_deref(), Some("orders"));
    assert_eq!(connections[0].aurora_cluster_arn.as_deref(), Some(CLUSTER_ARN));
    assert_eq!(connections[0].secret_arn.as_deref(), Some(SECRET_ARN));
    assert_eq!(
        connections[0].extra.get("region_name").map(String::as_str),
        Some("us-east-1")
    );
}

#[tokio::test]
async fn test_connect_without_secret_fails() {
    let connector = InMemoryTestConnector::new(Arc::new(InMemoryTestDriver::new()));
    let registry = DialectRegistry::with_builtins();

    let err = AdaClient::connect(
        &format!("mysql+auroradataapi://:@/orders?aurora_cluster_arn={}", CLUSTER_ARN),
        &registry,
        &connector,
    )
    .await
    .err()
    .unwrap();

    assert!(matches!(err, AdaError::ConnectionFailed(_)));
    assert!(connector.connections().is_empty());
}

#[tokio::test]
async fn test_connect_unregistered_scheme() {
    let connector = InMemoryTestConnector::new(Arc::new(InMemoryTestDriver::new()));
    let err = AdaClient::connect(
        &url("postgresql+auroradataapi"),
        &DialectRegistry::new(),
        &connector,
    )
    .await
    .err()
    .unwrap();

    assert!(matches!(err, AdaError::UnknownDialect(_)));
}

#[tokio::test]
async fn test_mysql_charset_reads_second_column() {
    let driver = Arc::new(
        InMemoryTestDriver::new().with_response(
            InMemoryTestResponseBuilder::new()
                .columns(&["Variable_name", "Value"])
                .row([
                    WireValue::from("character_set_client"),
                    WireValue::from("utf8mb4"),
                ])
                .build(),
        ),
    );
    let client = AdaClient::new(
        Arc::new(AuroraMySqlDataApiDialect::new()),
        Arc::clone(&driver) as Arc<dyn DataApiDriver>,
    );

    assert_eq!(client.detect_charset().await.unwrap(), "utf8mb4");
    driver.assert_last_query("SHOW VARIABLES LIKE 'character_set_client'", &[]);
}

#[tokio::test]
async fn test_postgres_charset_reads_first_column() {
    let driver = Arc::new(
        InMemoryTestDriver::new().with_response(
            InMemoryTestResponseBuilder::new()
                .columns(&["client_encoding"])
                .row([WireValue::from("UTF8")])
                .build(),
        ),
    );
    let client = AdaClient::new(
        Arc::new(AuroraPostgresDataApiDialect::new()),
        Arc::clone(&driver) as Arc<dyn DataApiDriver>,
    );

    assert_eq!(client.detect_charset().await.unwrap(), "UTF8");
    driver.assert_last_query("SHOW client_encoding", &[]);
}

#[tokio::test]
async fn test_charset_without_rows() {
    let driver = Arc::new(InMemoryTestDriver::new());
    let client = AdaClient::new(
        Arc::new(AuroraPostgresDataApiDialect::new()),
        driver as Arc<dyn DataApiDriver>,
    );

    let err = client.detect_charset().await.unwrap_err();
    assert!(matches!(
        err,
        AdaError::UnexpectedRowCount {
            expected: 1,
            actual: 0
        }
    ));
}

#[tokio::test]
async fn test_driver_errors_carry_backend_codes() {
    let driver = Arc::new(
        InMemoryTestDriver::new()
            .with_error(DriverError::new(
                "Database error code: 1062. Message: Duplicate entry '1' for key 'PRIMARY'",
            ))
            .with_error(DriverError::new("connection reset")),
    );
    let client = AdaClient::new(
        Arc::new(AuroraMySqlDataApiDialect::new()),
        Arc::clone(&driver) as Arc<dyn DataApiDriver>,
    );

    let err = client
        .execute("INSERT INTO orders (id) VALUES (1)", &[])
        .await
        .unwrap_err();
    assert_eq!(client.error_code(&err), Some(ErrorCode::Numeric(1062)));

    let err = client.execute("SELECT 1", &[]).await.unwrap_err();
    assert_eq!(client.error_code(&err), None);
}

#[tokio::test]
async fn test_postgres_sqlstate() {
    let driver = Arc::new(
        InMemoryTestDriver::new()
            .with_error(DriverError::new(
                "ERROR: relation \"missing\" does not exist; SQLState: 42P01",
            ))
            .with_error(
                DriverError::new("duplicate key")
                    .with_code(ErrorCode::SqlState("23505".to_string())),
            ),
    );
    let client = AdaClient::new(
        Arc::new(AuroraPostgresDataApiDialect::new()),
        Arc::clone(&driver) as Arc<dyn DataApiDriver>,
    );

    let err = client.execute("SELECT * FROM missing", &[]).await.unwrap_err();
    assert_eq!(
        client.error_code(&err),
        Some(ErrorCode::SqlState("42P01".to_string()))
    );

    let err = client.execute("INSERT INTO t VALUES (1)", &[]).await.unwrap_err();
    assert_eq!(
        client.error_code(&err),
        Some(ErrorCode::SqlState("23505".to_string()))
    );

    // Errors raised before the driver have no backend code.
    let unknown = AdaError::UnknownDialect("x".to_string());
    assert_eq!(client.error_code(&unknown), None);
}

#[tokio::test]
async fn test_untyped_execute_maps_plain_values() {
    let driver = Arc::new(
        InMemoryTestDriver::new().with_response(
            InMemoryTestResponseBuilder::new()
                .columns(&["n", "label", "ok", "missing"])
                .row([
                    WireValue::Long(7),
                    WireValue::from("seven"),
                    WireValue::Bool(true),
                    WireValue::Null,
                ])
                .build(),
        ),
    );
    let client = AdaClient::new(
        Arc::new(AuroraPostgresDataApiDialect::new()),
        driver as Arc<dyn DataApiDriver>,
    );

    let row = client
        .execute("SELECT 7, 'seven', true, NULL", &[])
        .await
        .unwrap()
        .single_row()
        .unwrap();

    assert_eq!(row.get_by_name("n").unwrap(), &adars::SqlValue::Int64(7));
    assert_eq!(
        row.get_by_name("label").unwrap(),
        &adars::SqlValue::Text("seven".into())
    );
    assert_eq!(row.get_by_name("ok").unwrap(), &adars::SqlValue::Bool(true));
    assert!(row.get_by_name("missing").unwrap().is_null());
}
