//! Daily OHLCV price bar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar date of open/high/low/close/volume for a single ticker.
///
/// Immutable once fetched; providers hand these to `PriceSeries::new`,
/// which canonicalizes ordering and duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adj_close: f64,
}

impl PriceBar {
    /// True when every price field is a finite number.
    pub fn is_complete(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.adj_close.is_finite()
    }
}
