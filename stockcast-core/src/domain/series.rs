//! Validated price series — the canonical shape every downstream consumer
//! (tables, charts, the forecast adapter) relies on.
//!
//! Construction canonicalizes provider output: bars are sorted by date
//! ascending, duplicate dates collapse to the last occurrence, and bars with
//! non-finite prices are dropped. After `new` returns, dates are unique and
//! strictly increasing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::bar::PriceBar;

/// Ordered daily history for one ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a canonical series from raw provider bars.
    pub fn new(ticker: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        bars.retain(PriceBar::is_complete);
        // Stable sort, then keep the last bar for each date.
        bars.sort_by_key(|b| b.date);
        let mut deduped: Vec<PriceBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(prev) if prev.date == bar.date => *prev = bar,
                _ => deduped.push(bar),
            }
        }
        Self {
            ticker: ticker.into(),
            bars: deduped,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Last `n` bars, oldest first.
    pub fn tail(&self, n: usize) -> &[PriceBar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    /// Closing prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// A delisted or suspended ticker returns history that stops well before
    /// the requested end date. Flagged, not rejected — the dashboard shows
    /// what it has plus a warning.
    pub fn is_truncated(&self, requested_end: NaiveDate) -> bool {
        match self.last_date() {
            Some(last) => (requested_end - last).num_days() > 30,
            None => false,
        }
    }
}
