//! Telemetry module
//!
//! Logging and pipeline counters

mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::{increment, record_symbol_duration, CounterMetric};

use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)
}
