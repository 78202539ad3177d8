//! Panel 5 — Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {k:<12}"), theme::accent()),
            Span::styled(desc, theme::muted()),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Global", theme::accent_bold())),
        key("1-5", "jump to panel"),
        key("Tab / S-Tab", "next / previous panel"),
        key("e", "error history overlay"),
        key("q", "quit"),
        Line::from(""),
        Line::from(Span::styled("Tickers", theme::accent_bold())),
        key("j / k", "move cursor"),
        key("Enter/Space", "select ticker and run the forecast"),
        key("h / l", "shrink / grow the horizon (1-4 years)"),
        key("r", "refetch history, bypassing the session cache"),
        Line::from(""),
        Line::from(Span::styled("History & Forecast charts", theme::accent_bold())),
        key("h / l", "pan left / right"),
        key("+ / -", "zoom in / out"),
        key("0", "reset the view"),
        Line::from(""),
        Line::from(Span::styled(
            "Forecasts are rough decompositions, not investment advice.",
            theme::neutral(),
        )),
    ];

    f.render_widget(Paragraph::new(lines), area);
}
