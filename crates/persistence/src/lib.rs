//! Usage ledger persistence and quota tracking
//!
//! Provides:
//! - `UsageLedger`: cumulative and per-day translated character counts
//! - `UsageStore` backends: JSON file, ScyllaDB, in-memory
//! - `QuotaTracker`: serialized recording, limit checks, windowed stats

pub mod client;
pub mod error;
pub mod ledger;
pub mod quota;
pub mod schema;
pub mod scylla_store;
pub mod store;

use std::sync::Arc;

use chitti_config::{PersistenceConfig, StorageBackend};

pub use client::{ScyllaClient, ScyllaConfig};
pub use error::PersistenceError;
pub use ledger::UsageLedger;
pub use quota::{QuotaError, QuotaTracker, UsageStats};
pub use scylla_store::ScyllaUsageStore;
pub use store::{FileUsageStore, InMemoryUsageStore, UsageStore};

/// Open the configured ledger store
pub async fn create_usage_store(
    config: &PersistenceConfig,
) -> Result<Arc<dyn UsageStore>, PersistenceError> {
    match config.backend {
        StorageBackend::File => {
            tracing::info!(path = %config.usage_path, "Usage ledger on local file");
            Ok(Arc::new(FileUsageStore::new(&config.usage_path)))
        }
        StorageBackend::Scylla => {
            let client = ScyllaClient::connect(ScyllaConfig::from(config)).await?;
            client.ensure_schema().await?;
            Ok(Arc::new(ScyllaUsageStore::new(client)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Usage ledger in memory only, counts reset on restart");
            Ok(Arc::new(InMemoryUsageStore::new()))
        }
    }
}
