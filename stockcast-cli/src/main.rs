//! Stockcast CLI — fetch history and run forecasts without the TUI.
//!
//! Commands:
//! - `fetch` — download daily history and print a summary per ticker
//! - `forecast` — run the forecast pipeline, with optional CSV/JSON export

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stockcast_core::data::{CircuitBreaker, SyntheticProvider, Watchlist, YahooProvider};
use stockcast_core::{run_pipeline, DataProvider, Forecast, PipelineInput, SessionCache};

const DEFAULT_START: &str = "2015-01-01";

#[derive(Parser)]
#[command(
    name = "stockcast",
    about = "Stockcast CLI — stock history and seasonal-trend forecasts"
)]
struct Cli {
    /// Log filter (tracing syntax, e.g. "stockcast_core=debug").
    #[arg(long, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download daily history and print a summary per ticker.
    Fetch {
        /// Tickers to fetch. Defaults to the watchlist.
        tickers: Vec<String>,

        /// TOML watchlist file supplying the default tickers.
        #[arg(long)]
        watchlist: Option<PathBuf>,

        /// Start date (YYYY-MM-DD). Defaults to 2015-01-01.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Use the deterministic synthetic provider instead of Yahoo.
        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
    /// Fetch one ticker and run the seasonal-trend forecast.
    Forecast {
        /// Ticker symbol (e.g. AAPL).
        ticker: String,

        /// Forecast horizon in years (1-4).
        #[arg(long, default_value_t = 1)]
        years: u8,

        /// Start date (YYYY-MM-DD). Defaults to 2015-01-01.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Use the deterministic synthetic provider instead of Yahoo.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Write the future forecast points to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the full forecast (fit + future + profiles) to this JSON file.
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Fetch {
            tickers,
            watchlist,
            start,
            end,
            synthetic,
        } => run_fetch(
            tickers,
            watchlist.as_deref(),
            start.as_deref(),
            end.as_deref(),
            synthetic,
        ),
        Commands::Forecast {
            ticker,
            years,
            start,
            end,
            synthetic,
            csv,
            json,
        } => run_forecast(
            &ticker,
            years,
            start.as_deref(),
            end.as_deref(),
            synthetic,
            csv.as_deref(),
            json.as_deref(),
        ),
    }
}

fn make_provider(synthetic: bool) -> Box<dyn DataProvider> {
    if synthetic {
        Box::new(SyntheticProvider::default())
    } else {
        Box::new(YahooProvider::new(Arc::new(
            CircuitBreaker::default_provider(),
        )))
    }
}

fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::parse_from_str(start.unwrap_or(DEFAULT_START), "%Y-%m-%d")
        .context("invalid --start date")?;
    let end = match end {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").context("invalid --end date")?,
        None => chrono::Local::now().date_naive(),
    };
    if end < start {
        bail!("--end {end} is before --start {start}");
    }
    Ok((start, end))
}

/// Default tickers: an explicit TOML file if given, else the built-in set.
fn load_watchlist(path: Option<&Path>) -> Result<Watchlist> {
    match path {
        Some(p) => Watchlist::from_file(p).map_err(|e| anyhow::anyhow!(e)),
        None => Ok(Watchlist::default()),
    }
}

fn run_fetch(
    tickers: Vec<String>,
    watchlist: Option<&Path>,
    start: Option<&str>,
    end: Option<&str>,
    synthetic: bool,
) -> Result<()> {
    let (start, end) = parse_range(start, end)?;
    let provider = make_provider(synthetic);

    let tickers = if tickers.is_empty() {
        load_watchlist(watchlist)?.tickers
    } else {
        tickers
    };

    let mut failed = 0usize;
    for ticker in &tickers {
        match provider.fetch(ticker, start, end) {
            Ok(series) => {
                let first = series.first_date().map(|d| d.to_string()).unwrap_or_default();
                let last = series.last_date().map(|d| d.to_string()).unwrap_or_default();
                println!("{ticker}: {} bars, {first} to {last}", series.len());
                for bar in series.tail(5) {
                    println!(
                        "  {}  O {:>9.2}  H {:>9.2}  L {:>9.2}  C {:>9.2}  V {:>12}",
                        bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
                    );
                }
            }
            Err(e) => {
                eprintln!("Error for {ticker}: {e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} ticker(s) failed", tickers.len());
    }
    Ok(())
}

fn run_forecast(
    ticker: &str,
    years: u8,
    start: Option<&str>,
    end: Option<&str>,
    synthetic: bool,
    csv_path: Option<&Path>,
    json_path: Option<&Path>,
) -> Result<()> {
    if !(1..=4).contains(&years) {
        bail!("--years must be between 1 and 4, got {years}");
    }
    let (start, end) = parse_range(start, end)?;

    let provider = make_provider(synthetic);
    let mut cache = SessionCache::new();
    let input = PipelineInput {
        ticker: ticker.to_string(),
        start,
        end,
        horizon_years: years,
    };

    let output = run_pipeline(&mut cache, provider.as_ref(), &input)?;
    print_summary(&output.forecast, output.series.len(), output.truncated);

    if let Some(path) = csv_path {
        write_csv(path, &output.forecast)?;
        println!("CSV written to: {}", path.display());
    }
    if let Some(path) = json_path {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &output.forecast)?;
        println!("JSON written to: {}", path.display());
    }

    Ok(())
}

fn print_summary(forecast: &Forecast, bar_count: usize, truncated: bool) {
    let future = forecast.future_points();

    println!();
    println!("=== Forecast: {} ===", forecast.ticker);
    println!("History:        {bar_count} bars through {}", forecast.last_history_date);
    println!("Horizon:        {} days", forecast.horizon_days);
    if let (Some(first), Some(last)) = (future.first(), future.last()) {
        println!("Future range:   {} to {}", first.date, last.date);
        println!(
            "Final estimate: {:.2}  (80% interval {:.2} to {:.2})",
            last.yhat, last.yhat_lower, last.yhat_upper
        );
    }
    if truncated {
        println!("WARNING: history ends well before the requested end date");
    }

    println!();
    println!("--- Weekly effect ---");
    const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    for (name, v) in WEEKDAYS.iter().zip(forecast.weekly_profile.iter()) {
        println!("{name}: {v:>+8.3}");
    }

    println!();
    println!("--- Yearly effect ---");
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun",
        "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    for (name, v) in MONTHS.iter().zip(forecast.yearly_profile.iter()) {
        println!("{name}: {v:>+8.3}");
    }
    println!();
}

fn write_csv(path: &Path, forecast: &Forecast) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        "date",
        "yhat",
        "yhat_lower",
        "yhat_upper",
        "trend",
        "weekly",
        "yearly",
    ])?;
    for p in forecast.future_points() {
        writer.write_record([
            p.date.to_string(),
            format!("{:.4}", p.yhat),
            format!("{:.4}", p.yhat_lower),
            format!("{:.4}", p.yhat_upper),
            format!("{:.4}", p.trend),
            format!("{:.4}", p.weekly),
            format!("{:.4}", p.yearly),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
