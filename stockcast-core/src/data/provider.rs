//! Data provider trait and structured error types.
//!
//! The `DataProvider` trait abstracts over market-data sources (Yahoo
//! Finance, the synthetic generator, test mocks) so the cache and pipeline
//! never care where bars come from. The session cache sits above this trait;
//! providers don't know about it.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::PriceSeries;

/// Why a fetch produced no usable data.
///
/// All of these surface to the user as "data unavailable"; the variants
/// stay structured so the TUI and CLI can show something more useful than a
/// generic message. None of them are retried at this layer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("ticker not found: {ticker}")]
    SymbolNotFound { ticker: String },

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("provider returned no history for {ticker}")]
    EmptyHistory { ticker: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for market-data providers.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for a ticker over a date range, canonicalized into a
    /// `PriceSeries` (dates unique, ascending).
    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError>;

    /// Whether the provider is currently willing to serve requests
    /// (not rate-limited, not blocked).
    fn is_available(&self) -> bool {
        true
    }
}
