//! Shared chart plumbing for the history, forecast, and components panels.
//!
//! All price charts use days-since-first-bar as the x axis so history and
//! forecast datasets share one scale. The `ChartWindow` turns the full x
//! range into axis bounds; ratatui clips points outside the bounds, so the
//! datasets themselves never need slicing.

use chrono::NaiveDate;
use ratatui::text::Span;
use ratatui::widgets::Axis;

use crate::app::ChartWindow;
use crate::theme;

/// Days from the chart origin to `date`, as an x coordinate.
pub fn x_value(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}

/// Min/max over the y values that fall inside the visible x bounds,
/// padded by 5% so lines don't hug the frame.
pub fn y_bounds(points: &[(f64, f64)], x_bounds: [f64; 2]) -> [f64; 2] {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &(x, y) in points {
        if x >= x_bounds[0] && x <= x_bounds[1] {
            min = min.min(y);
            max = max.max(y);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let padding = (max - min).abs().max(1.0) * 0.05;
    [min - padding, max + padding]
}

/// X axis labeled with the dates at the visible edges.
pub fn date_axis(origin: NaiveDate, x_bounds: [f64; 2]) -> Axis<'static> {
    let label = |x: f64| {
        let date = origin + chrono::Duration::days(x.round() as i64);
        Span::styled(date.format("%Y-%m-%d").to_string(), theme::muted())
    };
    Axis::default()
        .style(theme::muted())
        .bounds(x_bounds)
        .labels(vec![label(x_bounds[0]), label(x_bounds[1])])
}

/// Y axis labeled with the price bounds.
pub fn price_axis(y_bounds: [f64; 2]) -> Axis<'static> {
    Axis::default()
        .style(theme::muted())
        .bounds(y_bounds)
        .labels(vec![
            Span::styled(format!("{:.2}", y_bounds[0]), theme::muted()),
            Span::styled(format!("{:.2}", y_bounds[1]), theme::muted()),
        ])
}

/// Visible x bounds for a chart spanning `origin..=last`.
pub fn window_bounds(window: &ChartWindow, origin: NaiveDate, last: NaiveDate) -> [f64; 2] {
    window.bounds(0.0, x_value(origin, last))
}
