//! Panel 2 — History: close-price chart plus the most recent daily bars.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use stockcast_core::PriceSeries;

use crate::app::AppState;
use crate::theme;
use crate::ui::chart;

const RECENT_ROWS: usize = 10;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(output) = &app.result else {
        render_empty(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(RECENT_ROWS as u16 + 3),
        ])
        .split(area);

    render_chart(f, chunks[0], app, &output.series);
    render_recent(f, chunks[1], &output.series, output.truncated);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No data loaded yet.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Go to Tickers (press 1), pick a symbol, and press Enter.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &AppState, series: &PriceSeries) {
    let (Some(origin), Some(last)) = (series.first_date(), series.last_date()) else {
        render_empty(f, area);
        return;
    };

    let data: Vec<(f64, f64)> = series
        .bars()
        .iter()
        .map(|b| (chart::x_value(origin, b.date), b.close))
        .collect();

    let x_bounds = chart::window_bounds(&app.history_window, origin, last);
    let y_bounds = chart::y_bounds(&data, x_bounds);

    let dataset = Dataset::default()
        .name("close")
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::POSITIVE))
        .graph_type(GraphType::Line)
        .data(&data);

    let widget = Chart::new(vec![dataset])
        .x_axis(chart::date_axis(origin, x_bounds))
        .y_axis(chart::price_axis(y_bounds));

    f.render_widget(widget, area);
}

fn render_recent(f: &mut Frame, area: Rect, series: &PriceSeries, truncated: bool) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        format!(
            "{:<12} {:>10} {:>10} {:>10} {:>10} {:>12}",
            "Date", "Open", "High", "Low", "Close", "Volume"
        ),
        theme::accent_bold(),
    )));

    let bars = series.tail(RECENT_ROWS);
    let mut prev_close = None;
    for bar in bars {
        let style = match prev_close {
            Some(prev) => theme::change(bar.close - prev),
            None => theme::muted(),
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12}",
                bar.date.format("%Y-%m-%d"),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume
            ),
            style,
        )));
        prev_close = Some(bar.close);
    }

    if truncated {
        lines.push(Line::from(Span::styled(
            "History ends before the requested range (possibly delisted).",
            theme::warning(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
