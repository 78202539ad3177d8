//! Domain types — price bars and the validated price series.

pub mod bar;
pub mod series;

pub use bar::PriceBar;
pub use series::PriceSeries;
