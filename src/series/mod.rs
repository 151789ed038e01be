//! Price series module
//!
//! Immutable, strictly ordered close-price series and the return helpers
//! every later pipeline stage builds on

mod returns;
mod types;

pub use returns::{log_returns, pct_returns, safe_div};
pub use types::{PricePoint, PriceSeries, SeriesError};
