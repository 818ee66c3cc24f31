use crate::db::{connect_with_config, test_connection, DATABASE_URL};
use configs::DatabaseConfig;
use sea_orm::{DatabaseBackend, Statement, ConnectionTrait};
use anyhow::Result;

use super::try_setup_db;

/// Test basic database connection
#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let Some(db) = try_setup_db().await else { return Ok(()) };

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1 as test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let test_value: i32 = row.try_get("", "test")?;
    assert_eq!(test_value, 1);
    Ok(())
}

/// Test connection with custom pool configuration
#[tokio::test]
async fn test_custom_config_connection() -> Result<()> {
    if try_setup_db().await.is_none() { return Ok(()); }

    let config = DatabaseConfig {
        url: DATABASE_URL.clone(),
        max_connections: 3,
        min_connections: 1,
        connect_timeout_secs: 10,
        idle_timeout_secs: 60,
        max_lifetime_secs: 300,
        acquire_timeout_secs: 10,
        sqlx_logging: false,
    };
    let db = connect_with_config(&config).await?;
    test_connection(&db).await?;

    // pool should serve concurrent queries beyond max_connections by queueing
    let mut handles = vec![];
    for _ in 0..5 {
        let db = db.clone();
        handles.push(tokio::spawn(async move { test_connection(&db).await }));
    }
    for h in handles {
        h.await??;
    }
    Ok(())
}
