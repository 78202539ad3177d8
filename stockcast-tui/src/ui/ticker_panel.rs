//! Panel 1 — Tickers: watchlist, selection, and the horizon control.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled("Watchlist", theme::accent_bold())));
    lines.push(Line::from(""));

    for (i, ticker) in app.tickers.watchlist.tickers.iter().enumerate() {
        let cursor = if i == app.tickers.cursor { ">" } else { " " };
        let selected = app.tickers.selected.as_deref() == Some(ticker.as_str());
        let mark = if selected { "*" } else { " " };
        let cached = if app.tickers.fetched.contains(ticker) {
            Span::styled(" [cached]", theme::positive())
        } else {
            Span::raw("")
        };

        let style = if selected {
            theme::accent_bold()
        } else if i == app.tickers.cursor {
            theme::accent()
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {cursor} {mark} {ticker:<6}"), style),
            cached,
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Horizon: ", theme::muted()),
        Span::styled(horizon_gauge(app.horizon_years), theme::accent()),
        Span::styled(
            format!(" {} year(s)", app.horizon_years),
            theme::accent_bold(),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        format!(
            "Range:   {} to {}",
            app.start.format("%Y-%m-%d"),
            app.end.format("%Y-%m-%d")
        ),
        theme::muted(),
    )));

    if app.tickers.fetch_in_progress {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Working...", theme::warning())));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[j/k]move [Enter]forecast [h/l]horizon [r]refresh",
        theme::neutral(),
    )));

    f.render_widget(Paragraph::new(lines), area);
}

/// Four-step slider, one block per year.
fn horizon_gauge(years: u8) -> String {
    let filled = years.clamp(1, 4) as usize;
    let mut out = String::from("[");
    for i in 0..4 {
        out.push(if i < filled { '#' } else { '-' });
    }
    out.push(']');
    out
}
