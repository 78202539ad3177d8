//! Forecasting — the seasonal-trend model and the adapter that feeds it.
//!
//! The adapter reshapes a `PriceSeries` into the two-column (`ds`, `y`)
//! frame the model consumes, fits, and predicts over the history plus a
//! future horizon. Output carries uncertainty bounds and the additive
//! component breakdown (trend, weekly, yearly) for display.

pub mod adapter;
pub mod model;

pub use adapter::{forecast, training_frame, MIN_TRAINING_POINTS};
pub use model::{ForecastModel, SeasonalTrend, TrainedModel, TrainedSeasonalTrend};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a forecast could not be produced.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("insufficient data: {have} points, need at least {need}")]
    InsufficientData { have: usize, need: usize },

    #[error("invalid horizon: {0} days")]
    InvalidHorizon(usize),

    #[error("frame error: {0}")]
    Frame(String),
}

impl From<polars::error::PolarsError> for ForecastError {
    fn from(err: polars::error::PolarsError) -> Self {
        ForecastError::Frame(err.to_string())
    }
}

/// One predicted date: point estimate, uncertainty bounds, and the additive
/// components that sum (with the residual) to `yhat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
    pub trend: f64,
    pub weekly: f64,
    pub yearly: f64,
}

/// Full forecast for one ticker: the in-sample fit followed by the future
/// horizon, plus the seasonal profiles for the components view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub ticker: String,
    pub points: Vec<ForecastPoint>,
    pub last_history_date: NaiveDate,
    pub horizon_days: usize,
    /// Centered weekly effect, Monday..Sunday.
    pub weekly_profile: [f64; 7],
    /// Centered yearly effect, January..December.
    pub yearly_profile: [f64; 12],
}

impl Forecast {
    /// Points strictly beyond the last historical date.
    pub fn future_points(&self) -> &[ForecastPoint] {
        let idx = self
            .points
            .partition_point(|p| p.date <= self.last_history_date);
        &self.points[idx..]
    }

    /// In-sample fit over the historical dates.
    pub fn fitted_points(&self) -> &[ForecastPoint] {
        let idx = self
            .points
            .partition_point(|p| p.date <= self.last_history_date);
        &self.points[..idx]
    }

    /// Final predicted date.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}
