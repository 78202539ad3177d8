//! Panel 3 — Forecast: history with the point forecast and its bounds.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use stockcast_core::PipelineOutput;

use crate::app::AppState;
use crate::theme;
use crate::ui::chart;

const TAIL_ROWS: usize = 10;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(output) = &app.result else {
        render_empty(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(TAIL_ROWS as u16 + 3),
        ])
        .split(area);

    render_chart(f, chunks[0], app, output);
    render_tail(f, chunks[1], output);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("No forecast yet.", theme::muted())),
        Line::from(""),
        Line::from(Span::styled(
            "Select a ticker in Panel 1 and press Enter to run one.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &AppState, output: &PipelineOutput) {
    let forecast = &output.forecast;
    let (Some(origin), Some(last)) = (output.series.first_date(), forecast.last_date()) else {
        render_empty(f, area);
        return;
    };

    let history: Vec<(f64, f64)> = output
        .series
        .bars()
        .iter()
        .map(|b| (chart::x_value(origin, b.date), b.close))
        .collect();
    let yhat: Vec<(f64, f64)> = forecast
        .points
        .iter()
        .map(|p| (chart::x_value(origin, p.date), p.yhat))
        .collect();
    let lower: Vec<(f64, f64)> = forecast
        .future_points()
        .iter()
        .map(|p| (chart::x_value(origin, p.date), p.yhat_lower))
        .collect();
    let upper: Vec<(f64, f64)> = forecast
        .future_points()
        .iter()
        .map(|p| (chart::x_value(origin, p.date), p.yhat_upper))
        .collect();

    let x_bounds = chart::window_bounds(&app.forecast_window, origin, last);
    let mut y_bounds = chart::y_bounds(&history, x_bounds);
    for set in [&yhat, &lower, &upper] {
        let [lo, hi] = chart::y_bounds(set, x_bounds);
        y_bounds[0] = y_bounds[0].min(lo);
        y_bounds[1] = y_bounds[1].max(hi);
    }

    let datasets = vec![
        Dataset::default()
            .name("close")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::POSITIVE))
            .graph_type(GraphType::Line)
            .data(&history),
        Dataset::default()
            .name("forecast")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::ACCENT))
            .graph_type(GraphType::Line)
            .data(&yhat),
        Dataset::default()
            .name("lower")
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(theme::NEUTRAL))
            .graph_type(GraphType::Line)
            .data(&lower),
        Dataset::default()
            .name("upper")
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(theme::NEUTRAL))
            .graph_type(GraphType::Line)
            .data(&upper),
    ];

    let widget = Chart::new(datasets)
        .x_axis(chart::date_axis(origin, x_bounds))
        .y_axis(chart::price_axis(y_bounds));

    f.render_widget(widget, area);
}

fn render_tail(f: &mut Frame, area: Rect, output: &PipelineOutput) {
    let future = output.forecast.future_points();
    let start = future.len().saturating_sub(TAIL_ROWS);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(
            "{:<12} {:>10} {:>10} {:>10}",
            "Date", "Forecast", "Lower", "Upper"
        ),
        theme::accent_bold(),
    )));

    for p in &future[start..] {
        lines.push(Line::from(Span::styled(
            format!(
                "{:<12} {:>10.2} {:>10.2} {:>10.2}",
                p.date.format("%Y-%m-%d"),
                p.yhat,
                p.yhat_lower,
                p.yhat_upper
            ),
            theme::muted(),
        )));
    }

    let source = if output.cache_hit { "cache" } else { "provider" };
    lines.push(Line::from(Span::styled(
        format!(
            "{} future day(s), history from {}",
            future.len(),
            source
        ),
        theme::neutral(),
    )));

    f.render_widget(Paragraph::new(lines), area);
}
