//! Background worker thread — fetching and forecasting run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The worker
//! owns the session cache and the data provider, so the main thread never
//! blocks on the network or on model fitting.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use stockcast_core::{
    run_pipeline, DataError, DataProvider, PipelineError, PipelineInput, PipelineOutput,
    SessionCache,
};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    RunPipeline { input: PipelineInput },
    /// Drop the cached series for the ticker, then run the pipeline.
    Refresh { input: PipelineInput },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    PipelineStarted {
        ticker: String,
    },
    PipelineDone {
        output: Box<PipelineOutput>,
    },
    PipelineFailed {
        category: String,
        message: String,
        context: String,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    provider: Box<dyn DataProvider>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("stockcast-worker".into())
        .spawn(move || {
            worker_loop(rx, tx, provider);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    provider: Box<dyn DataProvider>,
) {
    let mut cache = SessionCache::new();

    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::RunPipeline { input }) => {
                handle_run(&mut cache, provider.as_ref(), input, &tx);
            }
            Ok(WorkerCommand::Refresh { input }) => {
                cache.invalidate(&input.ticker);
                handle_run(&mut cache, provider.as_ref(), input, &tx);
            }
        }
    }
}

fn handle_run(
    cache: &mut SessionCache,
    provider: &dyn DataProvider,
    input: PipelineInput,
    tx: &Sender<WorkerResponse>,
) {
    let _ = tx.send(WorkerResponse::PipelineStarted {
        ticker: input.ticker.clone(),
    });

    match run_pipeline(cache, provider, &input) {
        Ok(output) => {
            let _ = tx.send(WorkerResponse::PipelineDone {
                output: Box::new(output),
            });
        }
        Err(e) => {
            let _ = tx.send(WorkerResponse::PipelineFailed {
                category: categorize(&e).to_string(),
                message: e.to_string(),
                context: input.ticker,
            });
        }
    }
}

/// Coarse error category for status display and the error overlay.
fn categorize(err: &PipelineError) -> &'static str {
    match err {
        PipelineError::DataUnavailable(data_err) => match data_err {
            DataError::NetworkUnreachable(_)
            | DataError::RateLimited { .. }
            | DataError::CircuitBreakerTripped => "network",
            _ => "data",
        },
        PipelineError::Forecast(_) => "forecast",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::mpsc;
    use stockcast_core::data::SyntheticProvider;

    fn input(ticker: &str) -> PipelineInput {
        PipelineInput {
            ticker: ticker.to_string(),
            start: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
            horizon_years: 1,
        }
    }

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(cmd_rx, resp_tx, Box::new(SyntheticProvider::default()));
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn run_then_rerun_hits_cache() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(cmd_rx, resp_tx, Box::new(SyntheticProvider::default()));

        cmd_tx
            .send(WorkerCommand::RunPipeline { input: input("AAPL") })
            .unwrap();
        cmd_tx
            .send(WorkerCommand::RunPipeline { input: input("AAPL") })
            .unwrap();
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();

        let mut done = Vec::new();
        while let Ok(resp) = resp_rx.recv() {
            if let WorkerResponse::PipelineDone { output } = resp {
                done.push(output);
            }
        }
        handle.join().unwrap();

        assert_eq!(done.len(), 2);
        assert!(!done[0].cache_hit);
        assert!(done[1].cache_hit);
    }

    #[test]
    fn refresh_drops_the_cached_series() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(cmd_rx, resp_tx, Box::new(SyntheticProvider::default()));

        cmd_tx
            .send(WorkerCommand::RunPipeline { input: input("MSFT") })
            .unwrap();
        cmd_tx
            .send(WorkerCommand::Refresh { input: input("MSFT") })
            .unwrap();
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();

        let mut done = Vec::new();
        while let Ok(resp) = resp_rx.recv() {
            if let WorkerResponse::PipelineDone { output } = resp {
                done.push(output);
            }
        }
        handle.join().unwrap();

        assert_eq!(done.len(), 2);
        assert!(!done[0].cache_hit);
        assert!(!done[1].cache_hit);
    }

    #[test]
    fn bad_ticker_reports_failure_category() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(cmd_rx, resp_tx, Box::new(SyntheticProvider::default()));

        // Reversed date range makes the provider reject the request.
        let mut bad = input("AAPL");
        std::mem::swap(&mut bad.start, &mut bad.end);
        cmd_tx.send(WorkerCommand::RunPipeline { input: bad }).unwrap();
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();

        let mut failed = None;
        while let Ok(resp) = resp_rx.recv() {
            if let WorkerResponse::PipelineFailed { category, context, .. } = resp {
                failed = Some((category, context));
            }
        }
        handle.join().unwrap();

        let (category, context) = failed.expect("expected a failure response");
        assert_eq!(category, "data");
        assert_eq!(context, "AAPL");
    }
}
