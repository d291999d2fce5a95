//! Character quota tracking
//!
//! Every translation call reports its input length here. The tracker owns
//! the ledger store and serializes read-modify-write cycles behind a
//! read/write lock, so concurrent turns never lose an increment and stats
//! always see a complete write.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;

use chitti_config::constants::quota::{MONTH_DAYS, WEEK_DAYS, YEAR_DAYS};

use crate::error::PersistenceError;
use crate::store::UsageStore;

#[derive(Error, Debug)]
pub enum QuotaError {
    /// Recorded, but the cumulative total is now past the limit
    #[error("Character quota exceeded: {total} > {limit}")]
    Exceeded { total: u64, limit: u64 },

    #[error(transparent)]
    Storage(#[from] PersistenceError),
}

/// Windowed usage aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageStats {
    pub today: u64,
    pub week: u64,
    pub month: u64,
    pub year: u64,
    pub total: u64,
    pub limit: u64,
}

pub struct QuotaTracker {
    store: Arc<dyn UsageStore>,
    limit: u64,
    lock: RwLock<()>,
}

impl QuotaTracker {
    pub fn new(store: Arc<dyn UsageStore>, limit: u64) -> Self {
        Self {
            store,
            limit,
            lock: RwLock::new(()),
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Record `chars` against today's local date
    pub async fn record(&self, chars: u64) -> Result<(), QuotaError> {
        self.record_on(today(), chars).await
    }

    /// Record `chars` against `date`.
    ///
    /// The ledger is persisted before the limit is checked, so an
    /// `Exceeded` error always describes usage that has been saved.
    pub async fn record_on(&self, date: NaiveDate, chars: u64) -> Result<(), QuotaError> {
        let _guard = self.lock.write().await;

        let mut ledger = self.store.load().await?;
        ledger.add(date, chars);
        self.store.save(&ledger).await?;

        tracing::debug!(chars, total = ledger.total, limit = self.limit, "Recorded translation usage");

        if ledger.total > self.limit {
            return Err(QuotaError::Exceeded {
                total: ledger.total,
                limit: self.limit,
            });
        }

        Ok(())
    }

    /// Aggregates anchored on today's local date
    pub async fn stats(&self) -> Result<UsageStats, PersistenceError> {
        self.stats_on(today()).await
    }

    pub async fn stats_on(&self, today: NaiveDate) -> Result<UsageStats, PersistenceError> {
        let _guard = self.lock.read().await;
        let ledger = self.store.load().await?;

        Ok(UsageStats {
            today: ledger.sum_window(today, 1),
            week: ledger.sum_window(today, WEEK_DAYS),
            month: ledger.sum_window(today, MONTH_DAYS),
            year: ledger.sum_window(today, YEAR_DAYS),
            total: ledger.total,
            limit: self.limit,
        })
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileUsageStore, InMemoryUsageStore};
    use chrono::Days;

    fn tracker(limit: u64) -> (QuotaTracker, Arc<InMemoryUsageStore>) {
        let store = Arc::new(InMemoryUsageStore::new());
        (QuotaTracker::new(store.clone(), limit), store)
    }

    #[tokio::test]
    async fn test_record_then_stats() {
        let (tracker, _) = tracker(450_000);
        tracker.record(12).await.unwrap();
        tracker.record(30).await.unwrap();

        let stats = tracker.stats().await.unwrap();
        assert_eq!(stats.today, 42);
        assert_eq!(stats.total, 42);
        assert_eq!(stats.limit, 450_000);
    }

    #[tokio::test]
    async fn test_windows_are_monotonic() {
        let (tracker, _) = tracker(u64::MAX);
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        for (days_ago, chars) in [(0u64, 1u64), (3, 10), (20, 100), (200, 1000), (400, 10000)] {
            let date = today.checked_sub_days(Days::new(days_ago)).unwrap();
            tracker.record_on(date, chars).await.unwrap();
        }

        let stats = tracker.stats_on(today).await.unwrap();
        assert_eq!(stats.today, 1);
        assert_eq!(stats.week, 11);
        assert_eq!(stats.month, 111);
        assert_eq!(stats.year, 1111);
        assert_eq!(stats.total, 11111);
        assert!(stats.today <= stats.week && stats.week <= stats.month && stats.month <= stats.year);
    }

    #[tokio::test]
    async fn test_exceeding_limit_persists_first() {
        let (tracker, store) = tracker(450_000);

        let err = tracker.record(500_000).await.unwrap_err();
        assert!(matches!(
            err,
            QuotaError::Exceeded { total: 500_000, limit: 450_000 }
        ));

        let ledger = store.load().await.unwrap();
        assert_eq!(ledger.total, 500_000);
        assert_eq!(tracker.stats().await.unwrap().today, 500_000);
    }

    #[tokio::test]
    async fn test_limit_is_strictly_greater() {
        let (tracker, _) = tracker(100);
        assert!(tracker.record(100).await.is_ok());
        assert!(tracker.record(1).await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_records_do_not_lose_updates() {
        let (tracker, _) = tracker(u64::MAX);
        let tracker = Arc::new(tracker);

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let t = tracker.clone();
                tokio::spawn(async move { t.record(3).await })
            })
            .collect();
        for h in handles {
            h.await.unwrap().unwrap();
        }

        assert_eq!(tracker.stats().await.unwrap().total, 150);
    }

    #[tokio::test]
    async fn test_file_backed_tracker_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usage.json");
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        {
            let tracker = QuotaTracker::new(Arc::new(FileUsageStore::new(&path)), 1_000);
            tracker.record_on(date, 400).await.unwrap();
        }

        let tracker = QuotaTracker::new(Arc::new(FileUsageStore::new(&path)), 1_000);
        tracker.record_on(date, 400).await.unwrap();
        let stats = tracker.stats_on(date).await.unwrap();
        assert_eq!(stats.today, 800);
        assert_eq!(stats.total, 800);
    }
}
