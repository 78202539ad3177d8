//! Stockcast TUI — five-panel terminal dashboard.
//!
//! Panels:
//! 1. Tickers — watchlist, selection, forecast horizon
//! 2. History — daily close chart and recent bars
//! 3. Forecast — point forecast with uncertainty bounds
//! 4. Components — trend line plus weekly/yearly profiles
//! 5. Help — keyboard shortcuts

mod app;
mod input;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use stockcast_core::data::{CircuitBreaker, SyntheticProvider, Watchlist, YahooProvider};
use stockcast_core::DataProvider;

use crate::app::{AppState, ErrorCategory};
use crate::worker::{WorkerCommand, WorkerResponse};

/// All fetches start here; the original watchlist never predates it.
const HISTORY_START: &str = "2015-01-01";

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Date range
    let start: NaiveDate = HISTORY_START.parse().expect("valid start date literal");
    let end = chrono::Local::now().date_naive();

    // Provider: live Yahoo by default, deterministic walk when offline.
    let provider: Box<dyn DataProvider> = if std::env::var_os("STOCKCAST_SYNTHETIC").is_some() {
        Box::new(SyntheticProvider::default())
    } else {
        Box::new(YahooProvider::new(Arc::new(
            CircuitBreaker::default_provider(),
        )))
    };

    // Watchlist: STOCKCAST_WATCHLIST points at a TOML file, else the
    // built-in four-stock set.
    let (watchlist, watchlist_warning) = load_watchlist(std::env::var_os("STOCKCAST_WATCHLIST"));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx, provider);

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, watchlist, start, end);
    if let Some(warning) = watchlist_warning {
        app.set_warning(warning);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Resolve the watchlist from an optional TOML path. A bad file falls back
/// to the default set and surfaces a status-bar warning rather than aborting.
fn load_watchlist(path: Option<std::ffi::OsString>) -> (Watchlist, Option<String>) {
    let Some(path) = path else {
        return (Watchlist::default(), None);
    };
    match Watchlist::from_file(std::path::Path::new(&path)) {
        Ok(watchlist) => (watchlist, None),
        Err(e) => (
            Watchlist::default(),
            Some(format!("watchlist fell back to defaults: {e}")),
        ),
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::PipelineStarted { ticker } => {
            app.set_status(format!("Fetching {ticker}..."));
        }
        WorkerResponse::PipelineDone { output } => {
            app.tickers.fetch_in_progress = false;
            app.tickers.fetched.insert(output.series.ticker().to_string());

            let future_days = output.forecast.future_points().len();
            if output.truncated {
                app.set_warning(format!(
                    "{}: history ends early (delisted?), forecast may be stale",
                    output.series.ticker()
                ));
            } else {
                app.set_status(format!(
                    "{}: {} bars, {} day forecast{}",
                    output.series.ticker(),
                    output.series.len(),
                    future_days,
                    if output.cache_hit { " (cached)" } else { "" }
                ));
            }

            app.result = Some(*output);
        }
        WorkerResponse::PipelineFailed {
            category,
            message,
            context,
        } => {
            app.tickers.fetch_in_progress = false;
            let cat = match category.as_str() {
                "network" => ErrorCategory::Network,
                "data" => ErrorCategory::Data,
                "forecast" => ErrorCategory::Forecast,
                _ => ErrorCategory::Other,
            };
            app.push_error(cat, message, context);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watchlist_defaults_without_env() {
        let (watchlist, warning) = load_watchlist(None);
        assert_eq!(watchlist, Watchlist::default());
        assert!(warning.is_none());
    }

    #[test]
    fn watchlist_loads_from_toml_path() {
        let path = std::env::temp_dir().join("stockcast_tui_watchlist_test.toml");
        std::fs::write(&path, r#"tickers = ["SPY", "QQQ"]"#).unwrap();
        let (watchlist, warning) = load_watchlist(Some(path.clone().into_os_string()));
        std::fs::remove_file(&path).ok();
        assert_eq!(watchlist.tickers, vec!["SPY", "QQQ"]);
        assert!(warning.is_none());
    }

    #[test]
    fn bad_watchlist_path_falls_back_with_warning() {
        let (watchlist, warning) = load_watchlist(Some("/nonexistent/wl.toml".into()));
        assert_eq!(watchlist, Watchlist::default());
        assert!(warning.unwrap().contains("fell back to defaults"));
    }
}
