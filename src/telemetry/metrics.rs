//! Pipeline counters
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the
//! embedding program installs a recorder.

use crate::labeling::{BarrierTouch, DropReason};

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// CUSUM events detected
    EventsDetected,
    /// Candidate events that did not qualify
    EventsDropped(DropReason),
    /// Resolved exits by barrier
    BarrierOutcome(BarrierTouch),
    /// Rows written to label tables
    LabelsWritten,
    /// Symbols that failed and were skipped
    SymbolsSkipped,
}

impl CounterMetric {
    fn name(&self) -> &'static str {
        match self {
            CounterMetric::EventsDetected => "triple_barrier_events_detected_total",
            CounterMetric::EventsDropped(_) => "triple_barrier_events_dropped_total",
            CounterMetric::BarrierOutcome(_) => "triple_barrier_barrier_outcomes_total",
            CounterMetric::LabelsWritten => "triple_barrier_labels_written_total",
            CounterMetric::SymbolsSkipped => "triple_barrier_symbols_skipped_total",
        }
    }
}

/// Add `value` to a counter
pub fn increment(metric: CounterMetric, value: u64) {
    if value == 0 {
        return;
    }
    let name = metric.name();
    match metric {
        CounterMetric::EventsDropped(reason) => {
            metrics::counter!(name, "reason" => reason.as_str()).increment(value)
        }
        CounterMetric::BarrierOutcome(touch) => {
            metrics::counter!(name, "barrier" => touch.as_str()).increment(value)
        }
        _ => metrics::counter!(name).increment(value),
    }

    tracing::trace!(metric = name, value, "Counter incremented");
}

/// Record the time spent on one symbol
pub fn record_symbol_duration(duration: std::time::Duration) {
    metrics::histogram!("triple_barrier_symbol_duration_seconds").record(duration.as_secs_f64());
}
