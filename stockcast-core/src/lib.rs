//! stockcast core — everything behind the dashboard.
//!
//! - Domain types (price bars, validated price series)
//! - Data providers (Yahoo Finance, synthetic) behind the `DataProvider` trait
//! - In-memory session cache
//! - Seasonal-trend forecast model and the reshape adapter in front of it
//! - The pipeline that wires fetch → cache → forecast for one interaction

pub mod cache;
pub mod data;
pub mod domain;
pub mod forecast;
pub mod pipeline;

pub use cache::SessionCache;
pub use data::provider::{DataError, DataProvider};
pub use domain::{PriceBar, PriceSeries};
pub use forecast::{Forecast, ForecastError, ForecastPoint};
pub use pipeline::{run_pipeline, PipelineError, PipelineInput, PipelineOutput};
