//! Panel 4 — Components: trend line plus the weekly and yearly profiles.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use stockcast_core::Forecast;

use crate::app::AppState;
use crate::theme;
use crate::ui::chart;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(output) = &app.result else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Run a forecast first to see its components.",
                theme::muted(),
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_trend(f, chunks[0], &output.forecast);
    render_profiles(f, chunks[1], &output.forecast);
}

fn render_trend(f: &mut Frame, area: Rect, forecast: &Forecast) {
    let (Some(first), Some(last)) = (
        forecast.points.first().map(|p| p.date),
        forecast.last_date(),
    ) else {
        return;
    };

    let data: Vec<(f64, f64)> = forecast
        .points
        .iter()
        .map(|p| (chart::x_value(first, p.date), p.trend))
        .collect();

    let x_bounds = [0.0, chart::x_value(first, last).max(1.0)];
    let y_bounds = chart::y_bounds(&data, x_bounds);

    let dataset = Dataset::default()
        .name("trend")
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&data);

    let widget = Chart::new(vec![dataset])
        .x_axis(chart::date_axis(first, x_bounds))
        .y_axis(chart::price_axis(y_bounds));

    f.render_widget(widget, area);
}

fn render_profiles(f: &mut Frame, area: Rect, forecast: &Forecast) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled("Weekly", theme::accent_bold())));
    for (name, &v) in WEEKDAYS.iter().zip(forecast.weekly_profile.iter()) {
        lines.push(profile_line(name, v));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Yearly", theme::accent_bold())));
    for (name, &v) in MONTHS.iter().zip(forecast.yearly_profile.iter()) {
        lines.push(profile_line(name, v));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn profile_line(name: &str, value: f64) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {name:<4}"), theme::muted()),
        Span::styled(format!("{value:>+8.3}  "), theme::change(value)),
        Span::styled(bar(value), theme::change(value)),
    ])
}

/// Tiny horizontal bar so the profile reads at a glance.
fn bar(value: f64) -> String {
    let n = (value.abs() * 4.0).round().min(12.0) as usize;
    "#".repeat(n)
}
