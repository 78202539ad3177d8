//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels,
//! and every run's result lands in `AppState::result` for the panels to read.

use std::collections::{HashSet, VecDeque};
use std::sync::mpsc::{Receiver, Sender};

use chrono::{NaiveDate, NaiveDateTime};

use stockcast_core::data::Watchlist;
use stockcast_core::{PipelineInput, PipelineOutput};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Tickers,
    History,
    Forecast,
    Components,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Tickers => 0,
            Panel::History => 1,
            Panel::Forecast => 2,
            Panel::Components => 3,
            Panel::Help => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Tickers),
            1 => Some(Panel::History),
            2 => Some(Panel::Forecast),
            3 => Some(Panel::Components),
            4 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Tickers => "Tickers",
            Panel::History => "History",
            Panel::Forecast => "Forecast",
            Panel::Components => "Components",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 5).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 4) % 5).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Forecast,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Forecast => "FCST",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// Ticker panel state — watchlist cursor and selection.
#[derive(Debug)]
pub struct TickerPanelState {
    pub watchlist: Watchlist,
    pub cursor: usize,
    pub selected: Option<String>,
    /// Tickers whose history the worker has fetched this session.
    pub fetched: HashSet<String>,
    pub fetch_in_progress: bool,
}

impl TickerPanelState {
    pub fn new(watchlist: Watchlist) -> Self {
        Self {
            watchlist,
            cursor: 0,
            selected: None,
            fetched: HashSet::new(),
            fetch_in_progress: false,
        }
    }

    pub fn cursor_ticker(&self) -> Option<&str> {
        self.watchlist.tickers.get(self.cursor).map(String::as_str)
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.watchlist.len() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}

/// Visible x-range of a chart, as a zoom factor plus a pan offset.
///
/// `zoom` is the fraction of the full range shown (1.0 = everything);
/// `offset` slides the window from the left edge (0.0) to the right (1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartWindow {
    zoom: f64,
    offset: f64,
}

impl Default for ChartWindow {
    fn default() -> Self {
        Self { zoom: 1.0, offset: 1.0 }
    }
}

impl ChartWindow {
    const MIN_ZOOM: f64 = 0.05;

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 0.8).max(Self::MIN_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom * 1.25).min(1.0);
    }

    pub fn pan_left(&mut self) {
        self.offset = (self.offset - 0.1).max(0.0);
    }

    pub fn pan_right(&mut self) {
        self.offset = (self.offset + 0.1).min(1.0);
    }

    pub fn reset(&mut self) {
        *self = ChartWindow::default();
    }

    pub fn is_default(&self) -> bool {
        *self == ChartWindow::default()
    }

    /// Map the full data range to the visible x-axis bounds.
    pub fn bounds(&self, x_min: f64, x_max: f64) -> [f64; 2] {
        let range = (x_max - x_min).max(1.0);
        let width = range * self.zoom;
        let start = x_min + (range - width) * self.offset;
        [start, start + width]
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Panel states
    pub tickers: TickerPanelState,
    pub horizon_years: u8,
    pub result: Option<PipelineOutput>,
    pub history_window: ChartWindow,
    pub forecast_window: ChartWindow,

    // Date range for every fetch
    pub start: NaiveDate,
    pub end: NaiveDate,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        watchlist: Watchlist,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            active_panel: Panel::Tickers,
            running: true,
            tickers: TickerPanelState::new(watchlist),
            horizon_years: 1,
            result: None,
            history_window: ChartWindow::default(),
            forecast_window: ChartWindow::default(),
            start,
            end,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::Welcome,
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    /// Adjust the forecast horizon, clamped to 1..=4 years.
    /// Returns true when the value actually changed.
    pub fn adjust_horizon(&mut self, delta: i8) -> bool {
        let next = (self.horizon_years as i8 + delta).clamp(1, 4) as u8;
        let changed = next != self.horizon_years;
        self.horizon_years = next;
        changed
    }

    /// Ask the worker to run the pipeline for the selected ticker.
    /// With `refresh` the worker drops the cached series first.
    pub fn request_forecast(&mut self, refresh: bool) {
        let Some(ticker) = self.tickers.selected.clone() else {
            self.set_warning("No ticker selected — press Enter on a ticker first");
            return;
        };
        let input = PipelineInput {
            ticker: ticker.clone(),
            start: self.start,
            end: self.end,
            horizon_years: self.horizon_years,
        };
        let cmd = if refresh {
            WorkerCommand::Refresh { input }
        } else {
            WorkerCommand::RunPipeline { input }
        };
        if self.worker_tx.send(cmd).is_ok() {
            self.tickers.fetch_in_progress = true;
            self.set_status(format!(
                "Forecasting {ticker} over {} year(s)...",
                self.horizon_years
            ));
        }
    }
}
