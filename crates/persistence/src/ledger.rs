//! Cumulative translation character ledger

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date key format for `daily`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Persisted usage counters
///
/// `total` equals the sum of `daily`; both only ever grow. Entries outside
/// every reporting window are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLedger {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub daily: BTreeMap<String, u64>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `chars` to the total and to `date`'s bucket
    pub fn add(&mut self, date: NaiveDate, chars: u64) {
        self.total = self.total.saturating_add(chars);
        let bucket = self
            .daily
            .entry(date.format(DATE_FORMAT).to_string())
            .or_insert(0);
        *bucket = bucket.saturating_add(chars);
    }

    /// Count recorded on one date
    pub fn on(&self, date: NaiveDate) -> u64 {
        self.daily
            .get(&date.format(DATE_FORMAT).to_string())
            .copied()
            .unwrap_or(0)
    }

    /// Sum over the `days` calendar days ending at `today`, inclusive.
    ///
    /// Keys that do not parse as dates are ignored.
    pub fn sum_window(&self, today: NaiveDate, days: u32) -> u64 {
        if days == 0 {
            return 0;
        }
        let start = today
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .unwrap_or(NaiveDate::MIN);

        self.daily
            .iter()
            .filter_map(|(key, count)| {
                NaiveDate::parse_from_str(key, DATE_FORMAT)
                    .ok()
                    .map(|d| (d, *count))
            })
            .filter(|(d, _)| *d >= start && *d <= today)
            .map(|(_, count)| count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_add_keeps_total_in_sync() {
        let mut ledger = UsageLedger::new();
        ledger.add(date("2024-03-01"), 10);
        ledger.add(date("2024-03-01"), 5);
        ledger.add(date("2024-03-02"), 7);
        assert_eq!(ledger.total, 22);
        assert_eq!(ledger.total, ledger.daily.values().sum::<u64>());
        assert_eq!(ledger.on(date("2024-03-01")), 15);
        assert_eq!(ledger.on(date("2024-03-03")), 0);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let mut ledger = UsageLedger::new();
        let today = date("2024-03-10");
        ledger.add(today, 1);
        ledger.add(date("2024-03-04"), 10); // 6 days ago: inside 7-day window
        ledger.add(date("2024-03-03"), 100); // 7 days ago: outside
        ledger.add(date("2024-03-11"), 1000); // future: never counted

        assert_eq!(ledger.sum_window(today, 1), 1);
        assert_eq!(ledger.sum_window(today, 7), 11);
        assert_eq!(ledger.sum_window(today, 30), 111);
        assert_eq!(ledger.sum_window(today, 0), 0);
    }

    #[test]
    fn test_unparsable_keys_skipped() {
        let mut ledger = UsageLedger::new();
        ledger.daily.insert("not-a-date".to_string(), 50);
        ledger.add(date("2024-03-10"), 5);
        assert_eq!(ledger.sum_window(date("2024-03-10"), 365), 5);
    }

    #[test]
    fn test_file_format_compatibility() {
        let json = r#"{"total": 42, "daily": {"2024-01-01": 40, "2024-01-02": 2}}"#;
        let ledger: UsageLedger = serde_json::from_str(json).unwrap();
        assert_eq!(ledger.total, 42);
        assert_eq!(ledger.on(date("2024-01-02")), 2);

        let empty: UsageLedger = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, UsageLedger::default());
    }
}
