//! Synthetic data provider — seeded geometric random walk over trading days.
//!
//! Used for offline demos and tests where Yahoo is unreachable. The walk is
//! deterministic per (seed, ticker), so charts look stable across runs.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{DataError, DataProvider};
use crate::domain::{PriceBar, PriceSeries};

/// Deterministic offline provider.
pub struct SyntheticProvider {
    seed: u64,
    daily_drift: f64,
    daily_vol: f64,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            daily_drift: 0.0003,
            daily_vol: 0.015,
        }
    }

    /// Per-ticker seed so different tickers get different walks.
    fn ticker_seed(&self, ticker: &str) -> u64 {
        let mut h = self.seed;
        for b in ticker.bytes() {
            h = h.wrapping_mul(31).wrapping_add(b as u64);
        }
        h
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new(42)
    }
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        if end < start {
            return Err(DataError::Other(format!(
                "invalid range: {start} to {end}"
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.ticker_seed(ticker));
        let mut close = 50.0 + rng.gen_range(0.0..150.0);
        let mut bars = Vec::new();
        let mut date = start;

        while date <= end {
            // Trading days only.
            if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                let shock: f64 = rng.gen_range(-1.0..1.0);
                let ret = self.daily_drift + self.daily_vol * shock;
                let open = close;
                close = (close * (1.0 + ret)).max(0.01);
                let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.005));
                let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.005));
                bars.push(PriceBar {
                    date,
                    open,
                    high,
                    low,
                    close,
                    volume: rng.gen_range(500_000..5_000_000),
                    adj_close: close,
                });
            }
            date += Duration::days(1);
        }

        if bars.is_empty() {
            return Err(DataError::EmptyHistory {
                ticker: ticker.to_string(),
            });
        }

        Ok(PriceSeries::new(ticker, bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekdays_only_and_ascending() {
        let p = SyntheticProvider::default();
        let series = p
            .fetch(
                "AAPL",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            )
            .unwrap();
        for bar in series.bars() {
            assert!(!matches!(bar.date.weekday(), Weekday::Sat | Weekday::Sun));
        }
        let dates = series.dates();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn deterministic_per_seed_and_ticker() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let a = SyntheticProvider::new(7).fetch("MSFT", start, end).unwrap();
        let b = SyntheticProvider::new(7).fetch("MSFT", start, end).unwrap();
        assert_eq!(a.closes(), b.closes());

        let c = SyntheticProvider::new(7).fetch("GOOG", start, end).unwrap();
        assert_ne!(a.closes(), c.closes());
    }

    #[test]
    fn reversed_range_is_an_error() {
        let p = SyntheticProvider::default();
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(p.fetch("AAPL", start, end).is_err());
    }
}
