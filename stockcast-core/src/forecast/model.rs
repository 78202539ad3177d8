//! Additive seasonal-trend forecast model.
//!
//! Decomposes a daily series into y(t) = trend(t) + weekly(t) + yearly(t)
//! + residual:
//!
//! - trend: ordinary least squares over day offsets
//! - weekly: centered per-weekday mean of the detrended residual
//!   (needs at least two weeks of data)
//! - yearly: centered per-month mean of the remaining residual
//!   (needs at least two years of span)
//!
//! Uncertainty bounds come from the residual standard deviation and a normal
//! quantile, widening with the square root of days past the end of history.

use chrono::{Datelike, NaiveDate};
use statrs::distribution::{ContinuousCDF, Normal};

use super::{ForecastError, ForecastPoint};

/// Width of the uncertainty interval (matches the usual 80% default).
const INTERVAL_WIDTH: f64 = 0.80;

/// Minimum observations before the weekly component is estimated.
const WEEKLY_MIN_POINTS: usize = 14;

/// Minimum calendar span (days) before the yearly component is estimated.
const YEARLY_MIN_SPAN_DAYS: i64 = 730;

/// A model that can be fitted to a (date, value) series.
pub trait ForecastModel {
    type Trained: TrainedModel;

    fn fit(&self, dates: &[NaiveDate], values: &[f64]) -> Result<Self::Trained, ForecastError>;

    fn name(&self) -> &'static str;
}

/// A fitted model that predicts over arbitrary dates.
pub trait TrainedModel {
    fn predict(&self, dates: &[NaiveDate]) -> Vec<ForecastPoint>;
}

/// Untrained seasonal-trend model.
#[derive(Debug, Clone, Default)]
pub struct SeasonalTrend;

/// Fitted seasonal-trend model.
#[derive(Debug, Clone)]
pub struct TrainedSeasonalTrend {
    origin: NaiveDate,
    last_fit_date: NaiveDate,
    intercept: f64,
    slope: f64,
    weekly: [f64; 7],
    yearly: [f64; 12],
    sigma: f64,
    z: f64,
}

impl ForecastModel for SeasonalTrend {
    type Trained = TrainedSeasonalTrend;

    fn fit(&self, dates: &[NaiveDate], values: &[f64]) -> Result<Self::Trained, ForecastError> {
        let n = dates.len().min(values.len());
        if n < 2 {
            return Err(ForecastError::InsufficientData { have: n, need: 2 });
        }

        let origin = dates[0];
        let t: Vec<f64> = dates[..n]
            .iter()
            .map(|d| (*d - origin).num_days() as f64)
            .collect();
        let y = &values[..n];

        let (intercept, slope) = ols_line(&t, y);

        // Detrend.
        let mut resid: Vec<f64> = t
            .iter()
            .zip(y.iter())
            .map(|(ti, yi)| yi - (intercept + slope * ti))
            .collect();

        let weekly = if n >= WEEKLY_MIN_POINTS {
            let profile = centered_bin_means(dates[..n].iter().zip(resid.iter()), |d| {
                d.weekday().num_days_from_monday() as usize
            });
            for (d, r) in dates[..n].iter().zip(resid.iter_mut()) {
                *r -= profile[d.weekday().num_days_from_monday() as usize];
            }
            profile
        } else {
            [0.0; 7]
        };

        let span_days = (dates[n - 1] - origin).num_days();
        let yearly = if span_days >= YEARLY_MIN_SPAN_DAYS {
            let profile = centered_bin_means(dates[..n].iter().zip(resid.iter()), |d| {
                d.month0() as usize
            });
            for (d, r) in dates[..n].iter().zip(resid.iter_mut()) {
                *r -= profile[d.month0() as usize];
            }
            profile
        } else {
            [0.0; 12]
        };

        let sigma = sample_std(&resid);
        let normal = Normal::new(0.0, 1.0).expect("standard normal is valid");
        let z = normal.inverse_cdf(0.5 + INTERVAL_WIDTH / 2.0);

        Ok(TrainedSeasonalTrend {
            origin,
            last_fit_date: dates[n - 1],
            intercept,
            slope,
            weekly,
            yearly,
            sigma,
            z,
        })
    }

    fn name(&self) -> &'static str {
        "seasonal_trend"
    }
}

impl TrainedModel for TrainedSeasonalTrend {
    fn predict(&self, dates: &[NaiveDate]) -> Vec<ForecastPoint> {
        dates
            .iter()
            .map(|&date| {
                let t = (date - self.origin).num_days() as f64;
                let trend = self.intercept + self.slope * t;
                let weekly = self.weekly[date.weekday().num_days_from_monday() as usize];
                let yearly = self.yearly[date.month0() as usize];
                let yhat = trend + weekly + yearly;

                // Widen with distance past the end of history.
                let ahead = (date - self.last_fit_date).num_days().max(0) as f64;
                let margin = self.z * self.sigma * (1.0 + ahead).sqrt();

                ForecastPoint {
                    date,
                    yhat,
                    yhat_lower: yhat - margin,
                    yhat_upper: yhat + margin,
                    trend,
                    weekly,
                    yearly,
                }
            })
            .collect()
    }
}

impl TrainedSeasonalTrend {
    pub fn weekly_profile(&self) -> [f64; 7] {
        self.weekly
    }

    pub fn yearly_profile(&self) -> [f64; 12] {
        self.yearly
    }
}

/// Least-squares (intercept, slope) over points (t, y).
fn ols_line(t: &[f64], y: &[f64]) -> (f64, f64) {
    let n = t.len() as f64;
    let t_mean = t.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut num = 0.0;
    let mut den = 0.0;
    for (ti, yi) in t.iter().zip(y.iter()) {
        num += (ti - t_mean) * (yi - y_mean);
        den += (ti - t_mean) * (ti - t_mean);
    }

    // Dates are unique so den is only zero for a single point, which the
    // caller rejects — keep the guard anyway.
    let slope = if den.abs() > f64::EPSILON { num / den } else { 0.0 };
    (y_mean - slope * t_mean, slope)
}

/// Per-bin residual means, centered so the profile sums to zero across the
/// bins that actually occurred. Empty bins stay at zero.
fn centered_bin_means<'a, const K: usize>(
    pairs: impl Iterator<Item = (&'a NaiveDate, &'a f64)>,
    bin_of: impl Fn(&NaiveDate) -> usize,
) -> [f64; K] {
    let mut sums = [0.0; K];
    let mut counts = [0usize; K];
    for (d, r) in pairs {
        let b = bin_of(d);
        sums[b] += r;
        counts[b] += 1;
    }

    let mut profile = [0.0; K];
    let mut occupied = 0usize;
    let mut total = 0.0;
    for i in 0..K {
        if counts[i] > 0 {
            profile[i] = sums[i] / counts[i] as f64;
            total += profile[i];
            occupied += 1;
        }
    }
    if occupied > 0 {
        let mean = total / occupied as f64;
        for (i, p) in profile.iter_mut().enumerate() {
            if counts[i] > 0 {
                *p -= mean;
            }
        }
    }
    profile
}

/// Sample standard deviation, zero for fewer than two points.
fn sample_std(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1.0);
    var.sqrt()
}
