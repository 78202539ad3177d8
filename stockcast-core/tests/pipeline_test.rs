//! End-to-end pipeline tests against the synthetic provider and a scripted
//! mock, covering the cache contract and both user-facing error kinds.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use stockcast_core::data::provider::{DataError, DataProvider};
use stockcast_core::data::synthetic::SyntheticProvider;
use stockcast_core::domain::{PriceBar, PriceSeries};
use stockcast_core::pipeline::{run_pipeline, PipelineError, PipelineInput};
use stockcast_core::SessionCache;

/// Scripted provider: counts fetches, errors on unknown tickers, and can
/// serve deliberately short or truncated histories.
struct ScriptedProvider {
    fetches: AtomicUsize,
}

impl ScriptedProvider {
    fn new() -> Self {
        Self {
            fetches: AtomicUsize::new(0),
        }
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

fn flat_bars(start: NaiveDate, n: usize) -> Vec<PriceBar> {
    (0..n)
        .map(|i| {
            let close = 100.0 + (i % 7) as f64;
            PriceBar {
                date: start + Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 10_000,
                adj_close: close,
            }
        })
        .collect()
}

impl DataProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match ticker {
            "AAPL" => Ok(PriceSeries::new(ticker, flat_bars(start, 400))),
            "TINY" => Ok(PriceSeries::new(ticker, flat_bars(start, 1))),
            "DELISTED" => Ok(PriceSeries::new(ticker, flat_bars(start, 30))),
            _ => Err(DataError::SymbolNotFound {
                ticker: ticker.into(),
            }),
        }
    }
}

fn input(ticker: &str, years: u8) -> PipelineInput {
    PipelineInput {
        ticker: ticker.into(),
        start: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2016, 6, 1).unwrap(),
        horizon_years: years,
    }
}

#[test]
fn aapl_one_year_scenario() {
    let provider = ScriptedProvider::new();
    let mut cache = SessionCache::new();

    let out = run_pipeline(&mut cache, &provider, &input("AAPL", 1)).unwrap();

    assert!(!out.series.is_empty());
    assert_eq!(
        out.series.first_date().unwrap(),
        NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()
    );

    let last_history = out.series.last_date().unwrap();
    assert_eq!(
        out.forecast.last_date().unwrap(),
        last_history + Duration::days(365)
    );
    assert!(!out.cache_hit);
}

#[test]
fn second_run_hits_cache_and_shares_the_series() {
    let provider = ScriptedProvider::new();
    let mut cache = SessionCache::new();

    let first = run_pipeline(&mut cache, &provider, &input("AAPL", 1)).unwrap();
    let second = run_pipeline(&mut cache, &provider, &input("AAPL", 3)).unwrap();

    assert_eq!(provider.fetch_count(), 1);
    assert!(second.cache_hit);
    assert!(Arc::ptr_eq(&first.series, &second.series));
    // Horizon change still re-forecasts.
    assert_eq!(second.forecast.future_points().len(), 3 * 365);
}

#[test]
fn invalid_ticker_surfaces_data_unavailable() {
    let provider = ScriptedProvider::new();
    let mut cache = SessionCache::new();

    let err = run_pipeline(&mut cache, &provider, &input("NOPE", 1)).unwrap_err();
    match err {
        PipelineError::DataUnavailable(DataError::SymbolNotFound { ticker }) => {
            assert_eq!(ticker, "NOPE")
        }
        other => panic!("expected DataUnavailable, got {other}"),
    }
    assert!(cache.is_empty());
}

#[test]
fn too_few_points_surfaces_insufficient_data() {
    let provider = ScriptedProvider::new();
    let mut cache = SessionCache::new();

    let err = run_pipeline(&mut cache, &provider, &input("TINY", 1)).unwrap_err();
    assert!(matches!(err, PipelineError::Forecast(_)));
    assert!(err.to_string().contains("insufficient data"));
}

#[test]
fn truncated_history_is_flagged_not_rejected() {
    let provider = ScriptedProvider::new();
    let mut cache = SessionCache::new();

    let out = run_pipeline(&mut cache, &provider, &input("DELISTED", 1)).unwrap();
    assert!(out.truncated);
    assert_eq!(out.series.len(), 30);
}

#[test]
fn dates_strictly_increasing_for_every_watchlist_ticker() {
    let provider = SyntheticProvider::default();
    let mut cache = SessionCache::new();

    for ticker in ["AAPL", "GOOG", "MSFT", "GME"] {
        let out = run_pipeline(&mut cache, &provider, &input(ticker, 2)).unwrap();
        let dates = out.series.dates();
        assert!(
            dates.windows(2).all(|w| w[0] < w[1]),
            "{ticker} dates not strictly increasing"
        );
    }
    assert_eq!(cache.len(), 4);
}
