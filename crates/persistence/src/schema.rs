//! ScyllaDB schema creation

use crate::error::PersistenceError;
use scylla::Session;

/// Create the keyspace if it doesn't exist
pub async fn create_keyspace(
    session: &Session,
    keyspace: &str,
    replication_factor: u8,
) -> Result<(), PersistenceError> {
    let query = format!(
        "CREATE KEYSPACE IF NOT EXISTS {} WITH replication = {{'class': 'SimpleStrategy', 'replication_factor': {}}}",
        keyspace, replication_factor
    );

    session
        .query_unpaged(query, &[])
        .await
        .map_err(|e| PersistenceError::SchemaError(format!("Failed to create keyspace: {}", e)))?;

    Ok(())
}

/// Create all required tables
pub async fn create_tables(session: &Session, keyspace: &str) -> Result<(), PersistenceError> {
    // Usage ledger (single row, daily buckets as JSON)
    let usage_table = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {}.usage_ledger (
            singleton INT,
            total BIGINT,
            daily_json TEXT,
            updated_at BIGINT,
            PRIMARY KEY (singleton)
        )
    "#,
        keyspace
    );

    session.query_unpaged(usage_table, &[]).await.map_err(|e| {
        PersistenceError::SchemaError(format!("Failed to create usage_ledger table: {}", e))
    })?;

    tracing::info!("All tables created successfully");
    Ok(())
}
