//! Volatility model module
//!
//! Adaptive barrier width from exponentially weighted return volatility

mod volatility;

pub use volatility::{EwmStd, VolatilityEstimator, VolatilitySeries};
