//! Per-event uniqueness and return attribution

use super::concurrency::Span;
use crate::series::safe_div;

/// Mean of `1 / concurrency` over the bars an event is active on
///
/// Every bar inside the span counts the event itself, so the result lies in
/// `(0, 1]`.
pub fn average_uniqueness(span: Span, concurrency: &[u32]) -> f64 {
    let total: f64 = span
        .indices()
        .map(|i| safe_div(1.0, f64::from(concurrency[i])))
        .sum();
    total / span.bars() as f64
}

/// Absolute sum of log returns shared out by concurrency over the span
///
/// The first bar of the series has no return and contributes nothing.
pub fn attributed_return(span: Span, log_returns: &[Option<f64>], concurrency: &[u32]) -> f64 {
    span.indices()
        .filter_map(|i| log_returns[i].map(|r| safe_div(r, f64::from(concurrency[i]))))
        .sum::<f64>()
        .abs()
}
