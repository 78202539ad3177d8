//! In-memory session cache for fetched price series.
//!
//! One explicit object, owned by the worker and injected into the pipeline —
//! not ambient process state. Entries live for the session; there is no
//! eviction and nothing touches disk. Repeated lookups for a ticker hand out
//! the same `Arc`, so re-renders never re-download.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::data::provider::{DataError, DataProvider};
use crate::domain::PriceSeries;

/// Session-scoped memo of ticker → price series.
#[derive(Debug, Default)]
pub struct SessionCache {
    entries: HashMap<String, Arc<PriceSeries>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached series for a ticker, if any.
    pub fn get(&self, ticker: &str) -> Option<Arc<PriceSeries>> {
        self.entries.get(ticker).cloned()
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.entries.contains_key(ticker)
    }

    /// Return the cached series for `ticker`, fetching through `provider` on
    /// first request. The fetch range only applies to the first request for a
    /// ticker in this session.
    pub fn get_or_fetch(
        &mut self,
        provider: &dyn DataProvider,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Arc<PriceSeries>, DataError> {
        if let Some(series) = self.entries.get(ticker) {
            tracing::debug!(ticker, "session cache hit");
            return Ok(Arc::clone(series));
        }

        tracing::debug!(ticker, provider = provider.name(), "session cache miss, fetching");
        let series = provider.fetch(ticker, start, end)?;
        if series.is_empty() {
            return Err(DataError::EmptyHistory {
                ticker: ticker.to_string(),
            });
        }
        let series = Arc::new(series);
        self.entries.insert(ticker.to_string(), Arc::clone(&series));
        Ok(series)
    }

    /// Drop a ticker so the next request refetches.
    pub fn invalidate(&mut self, ticker: &str) {
        self.entries.remove(ticker);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceBar;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider that counts how many times it is asked to fetch.
    struct CountingProvider {
        fetches: AtomicUsize,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
            }
        }
    }

    impl DataProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn fetch(
            &self,
            ticker: &str,
            start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<PriceSeries, DataError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if ticker == "BAD" {
                return Err(DataError::SymbolNotFound {
                    ticker: ticker.into(),
                });
            }
            let bars = (0..5)
                .map(|i| PriceBar {
                    date: start + chrono::Duration::days(i),
                    open: 10.0,
                    high: 11.0,
                    low: 9.0,
                    close: 10.0 + i as f64,
                    volume: 100,
                    adj_close: 10.0 + i as f64,
                })
                .collect();
            Ok(PriceSeries::new(ticker, bars))
        }
    }

    fn range() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
    }

    #[test]
    fn second_get_returns_same_arc_without_refetch() {
        let provider = CountingProvider::new();
        let mut cache = SessionCache::new();
        let (start, end) = range();

        let a = cache.get_or_fetch(&provider, "AAPL", start, end).unwrap();
        let b = cache.get_or_fetch(&provider, "AAPL", start, end).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn distinct_tickers_fetch_separately() {
        let provider = CountingProvider::new();
        let mut cache = SessionCache::new();
        let (start, end) = range();

        cache.get_or_fetch(&provider, "AAPL", start, end).unwrap();
        cache.get_or_fetch(&provider, "MSFT", start, end).unwrap();
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_fetch_is_not_cached() {
        let provider = CountingProvider::new();
        let mut cache = SessionCache::new();
        let (start, end) = range();

        assert!(cache.get_or_fetch(&provider, "BAD", start, end).is_err());
        assert!(!cache.contains("BAD"));
        // A retry hits the provider again rather than a cached error.
        assert!(cache.get_or_fetch(&provider, "BAD", start, end).is_err());
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn invalidate_forces_refetch() {
        let provider = CountingProvider::new();
        let mut cache = SessionCache::new();
        let (start, end) = range();

        cache.get_or_fetch(&provider, "AAPL", start, end).unwrap();
        cache.invalidate("AAPL");
        cache.get_or_fetch(&provider, "AAPL", start, end).unwrap();
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 2);
    }
}
