//! Sample weights for resolved events

use super::concurrency::{concurrency, span_on, Span};
use super::decay::decay_factors;
use super::uniqueness::{attributed_return, average_uniqueness};
use crate::labeling::{Event, EventId};
use crate::series::{log_returns, PriceSeries};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Weighting result for one event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventWeight {
    pub id: EventId,
    pub start: NaiveDateTime,
    /// Mean reciprocal concurrency over the event's bars
    pub average_uniqueness: f64,
    /// Absolute concurrency-shared log return before normalisation
    pub raw: f64,
    /// Normalised weight, after decay when enabled
    pub weight: f64,
}

/// Weighting options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightOptions {
    /// Decay factor for the oldest event; 1.0 disables decay
    pub oldest_weight: f64,
}

impl Default for WeightOptions {
    fn default() -> Self {
        Self { oldest_weight: 1.0 }
    }
}

/// Weight every resolved event against the full bar timeline
///
/// Events without an exit, or whose interval covers no bar, are left out.
/// Before decay the weights sum to 1; when every raw weight is zero each
/// event gets an equal share.
pub fn compute_weights(
    events: &[Event],
    series: &PriceSeries,
    options: &WeightOptions,
) -> Vec<EventWeight> {
    let timeline = series.times();

    let mut active: Vec<(&Event, Span)> = events
        .iter()
        .filter_map(|event| {
            let exit = event.exit_time()?;
            span_on(timeline, event.start, exit).map(|span| (event, span))
        })
        .collect();
    active.sort_by_key(|(event, _)| (event.start, event.id));

    let skipped = events.len() - active.len();
    if skipped > 0 {
        tracing::debug!(skipped, "Events left out of weighting");
    }
    if active.is_empty() {
        return Vec::new();
    }

    let spans: Vec<Span> = active.iter().map(|(_, span)| *span).collect();
    let counts = concurrency(timeline.len(), &spans);
    let returns = log_returns(series);

    let mut weights: Vec<EventWeight> = active
        .iter()
        .map(|(event, span)| EventWeight {
            id: event.id,
            start: event.start,
            average_uniqueness: average_uniqueness(*span, &counts),
            raw: attributed_return(*span, &returns, &counts),
            weight: 0.0,
        })
        .collect();

    let total: f64 = weights.iter().map(|w| w.raw).sum();
    let n = weights.len() as f64;
    for w in weights.iter_mut() {
        w.weight = if total > 0.0 { w.raw / total } else { 1.0 / n };
    }

    if options.oldest_weight != 1.0 {
        let normalised: Vec<f64> = weights.iter().map(|w| w.weight).collect();
        let factors = decay_factors(&normalised, options.oldest_weight);
        for (w, factor) in weights.iter_mut().zip(factors) {
            w.weight *= factor;
        }
    }

    tracing::debug!(
        events = weights.len(),
        max_concurrency = counts.iter().max().copied().unwrap_or(0),
        "Computed sample weights"
    );

    weights
}
