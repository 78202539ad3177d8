//! Forecast adapter — reshape, fit, predict.
//!
//! Mirrors the dashboard's data flow: take the validated price series,
//! select the closing-price column, relabel it into the two columns the
//! model consumes (`ds` date, `y` value), fit, extend the timeline by the
//! horizon, predict.

use chrono::{Duration, NaiveDate};
use polars::prelude::*;

use super::model::{ForecastModel, SeasonalTrend, TrainedModel};
use super::{Forecast, ForecastError};
use crate::domain::PriceSeries;

/// Fewest historical points the model will accept.
pub const MIN_TRAINING_POINTS: usize = 2;

/// Two-column training frame: `ds` (date) and `y` (closing price).
pub fn training_frame(series: &PriceSeries) -> Result<DataFrame, ForecastError> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let ds: Vec<i32> = series
        .bars()
        .iter()
        .map(|b| (b.date - epoch).num_days() as i32)
        .collect();
    let y: Vec<f64> = series.closes();

    let df = DataFrame::new(vec![
        Column::new("ds".into(), ds).cast(&DataType::Date)?,
        Column::new("y".into(), y),
    ])?;
    Ok(df)
}

/// Read the (`ds`, `y`) columns back out of a training frame.
fn frame_columns(df: &DataFrame) -> Result<(Vec<NaiveDate>, Vec<f64>), ForecastError> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();

    let ds_ca = df.column("ds")?.date()?;
    let y_ca = df.column("y")?.f64()?;

    let n = df.height();
    let mut dates = Vec::with_capacity(n);
    let mut values = Vec::with_capacity(n);
    for i in 0..n {
        let days = ds_ca
            .get(i)
            .ok_or_else(|| ForecastError::Frame(format!("null ds at row {i}")))?;
        let y = y_ca
            .get(i)
            .ok_or_else(|| ForecastError::Frame(format!("null y at row {i}")))?;
        dates.push(epoch + Duration::days(days as i64));
        values.push(y);
    }
    Ok((dates, values))
}

/// History dates plus one entry per future calendar day.
fn extended_timeline(history: &[NaiveDate], horizon_days: usize) -> Vec<NaiveDate> {
    let mut timeline = history.to_vec();
    if let Some(&last) = history.last() {
        timeline.extend((1..=horizon_days as i64).map(|i| last + Duration::days(i)));
    }
    timeline
}

/// Fit the seasonal-trend model on a price series and predict over the
/// history plus `horizon_days` future calendar days.
pub fn forecast(series: &PriceSeries, horizon_days: usize) -> Result<Forecast, ForecastError> {
    if horizon_days == 0 {
        return Err(ForecastError::InvalidHorizon(0));
    }
    if series.len() < MIN_TRAINING_POINTS {
        return Err(ForecastError::InsufficientData {
            have: series.len(),
            need: MIN_TRAINING_POINTS,
        });
    }

    let frame = training_frame(series)?;
    let (dates, values) = frame_columns(&frame)?;

    let trained = SeasonalTrend.fit(&dates, &values)?;
    let timeline = extended_timeline(&dates, horizon_days);
    let points = trained.predict(&timeline);

    // len >= MIN_TRAINING_POINTS, so last exists.
    let last_history_date = *dates.last().unwrap();

    Ok(Forecast {
        ticker: series.ticker().to_string(),
        points,
        last_history_date,
        horizon_days,
        weekly_profile: trained.weekly_profile(),
        yearly_profile: trained.yearly_profile(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceBar;

    fn series(n: usize) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        let bars = (0..n)
            .map(|i| {
                let close = 100.0 + i as f64 * 0.1;
                PriceBar {
                    date: start + Duration::days(i as i64),
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1_000,
                    adj_close: close,
                }
            })
            .collect();
        PriceSeries::new("AAPL", bars)
    }

    #[test]
    fn frame_has_ds_and_y() {
        let frame = training_frame(&series(10)).unwrap();
        assert_eq!(frame.height(), 10);
        assert!(frame.column("ds").is_ok());
        assert!(frame.column("y").is_ok());
    }

    #[test]
    fn frame_roundtrips_dates_and_closes() {
        let s = series(10);
        let frame = training_frame(&s).unwrap();
        let (dates, values) = frame_columns(&frame).unwrap();
        assert_eq!(dates, s.dates());
        assert_eq!(values, s.closes());
    }

    #[test]
    fn horizon_extends_exactly() {
        let s = series(100);
        let f = forecast(&s, 365).unwrap();
        let last_history = s.last_date().unwrap();
        assert_eq!(f.last_history_date, last_history);
        assert_eq!(f.last_date().unwrap(), last_history + Duration::days(365));
        assert_eq!(f.future_points().len(), 365);
        assert_eq!(f.points.len(), 100 + 365);
    }

    #[test]
    fn one_point_is_insufficient() {
        let s = series(1);
        assert!(matches!(
            forecast(&s, 30),
            Err(ForecastError::InsufficientData { have: 1, need: 2 })
        ));
    }

    #[test]
    fn zero_horizon_rejected() {
        let s = series(10);
        assert!(matches!(
            forecast(&s, 0),
            Err(ForecastError::InvalidHorizon(0))
        ));
    }

    #[test]
    fn future_points_start_after_history() {
        let s = series(30);
        let f = forecast(&s, 10).unwrap();
        for p in f.future_points() {
            assert!(p.date > f.last_history_date);
        }
        for p in f.fitted_points() {
            assert!(p.date <= f.last_history_date);
        }
    }
}
