//! Usage ledger in ScyllaDB

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;

use crate::client::ScyllaClient;
use crate::error::PersistenceError;
use crate::ledger::UsageLedger;
use crate::store::UsageStore;

/// Ledger stored as one row of `usage_ledger`
///
/// Writes are last-writer-wins, so only one process should record usage
/// against a keyspace.
pub struct ScyllaUsageStore {
    client: ScyllaClient,
}

impl ScyllaUsageStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UsageStore for ScyllaUsageStore {
    async fn load(&self) -> Result<UsageLedger, PersistenceError> {
        let query = format!(
            "SELECT total, daily_json FROM {}.usage_ledger WHERE singleton = 1",
            self.client.keyspace()
        );

        let result = self.client.session().query_unpaged(query, &[]).await?;

        if let Some(rows) = result.rows {
            if let Some(row) = rows.into_iter().next() {
                let (total, daily_json): (i64, String) = row
                    .into_typed()
                    .map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

                let total = u64::try_from(total)
                    .map_err(|_| PersistenceError::InvalidData(format!("negative total {}", total)))?;
                let daily: BTreeMap<String, u64> = serde_json::from_str(&daily_json)?;

                return Ok(UsageLedger { total, daily });
            }
        }

        Ok(UsageLedger::default())
    }

    async fn save(&self, ledger: &UsageLedger) -> Result<(), PersistenceError> {
        let daily_json = serde_json::to_string(&ledger.daily)?;
        let total = i64::try_from(ledger.total)
            .map_err(|_| PersistenceError::InvalidData(format!("total overflows BIGINT: {}", ledger.total)))?;

        let query = format!(
            "INSERT INTO {}.usage_ledger (singleton, total, daily_json, updated_at) VALUES (1, ?, ?, ?)",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(query, (total, &daily_json, Utc::now().timestamp_millis()))
            .await?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "scylla"
    }
}
