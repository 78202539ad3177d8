//! The dashboard pipeline — one explicit function per user interaction.
//!
//! Ticker or horizon changes call `run_pipeline` with the current inputs;
//! nothing re-executes implicitly. The cache is passed in, never ambient.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::cache::SessionCache;
use crate::data::provider::{DataError, DataProvider};
use crate::domain::PriceSeries;
use crate::forecast::{self, Forecast, ForecastError};

/// Days of prediction per horizon year.
pub const DAYS_PER_YEAR: usize = 365;

/// Horizon bounds, in years.
pub const MIN_HORIZON_YEARS: u8 = 1;
pub const MAX_HORIZON_YEARS: u8 = 4;

/// Everything one interaction needs.
#[derive(Debug, Clone)]
pub struct PipelineInput {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub horizon_years: u8,
}

impl PipelineInput {
    /// Horizon in days, with the years clamped to the supported range.
    pub fn horizon_days(&self) -> usize {
        let years = self
            .horizon_years
            .clamp(MIN_HORIZON_YEARS, MAX_HORIZON_YEARS);
        years as usize * DAYS_PER_YEAR
    }
}

/// One interaction's worth of output, ready for rendering.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub series: Arc<PriceSeries>,
    pub forecast: Forecast,
    /// Whether the series came from the session cache.
    pub cache_hit: bool,
    /// History ends well before the requested end date (delisted ticker).
    pub truncated: bool,
}

/// Failure of either stage, surfaced to the UI as a message.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("data unavailable: {0}")]
    DataUnavailable(#[from] DataError),

    #[error("forecast failed: {0}")]
    Forecast(#[from] ForecastError),
}

/// Fetch (through the cache), then fit and predict.
pub fn run_pipeline(
    cache: &mut SessionCache,
    provider: &dyn DataProvider,
    input: &PipelineInput,
) -> Result<PipelineOutput, PipelineError> {
    let cache_hit = cache.contains(&input.ticker);
    let series = cache.get_or_fetch(provider, &input.ticker, input.start, input.end)?;
    let forecast = forecast::forecast(&series, input.horizon_days())?;
    let truncated = series.is_truncated(input.end);

    if truncated {
        tracing::warn!(
            ticker = %input.ticker,
            last = %series.last_date().map(|d| d.to_string()).unwrap_or_default(),
            "history ends well before requested end date"
        );
    }

    Ok(PipelineOutput {
        series,
        forecast,
        cache_hit,
        truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_days_is_years_times_365() {
        let mut input = PipelineInput {
            ticker: "AAPL".into(),
            start: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            horizon_years: 1,
        };
        assert_eq!(input.horizon_days(), 365);
        input.horizon_years = 4;
        assert_eq!(input.horizon_days(), 1460);
    }

    #[test]
    fn horizon_years_clamped_to_bounds() {
        let mut input = PipelineInput {
            ticker: "AAPL".into(),
            start: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            horizon_years: 0,
        };
        assert_eq!(input.horizon_days(), 365);
        input.horizon_years = 9;
        assert_eq!(input.horizon_days(), 4 * 365);
    }
}
