//! Data source adapters and the watchlist.

pub mod circuit_breaker;
pub mod provider;
pub mod synthetic;
pub mod watchlist;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use provider::{DataError, DataProvider};
pub use synthetic::SyntheticProvider;
pub use watchlist::Watchlist;
pub use yahoo::YahooProvider;
