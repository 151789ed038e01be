//! Event concurrency over the bar timeline
//!
//! An event is active on every bar in `[start, exit]`. Counting uses a
//! difference array over bar indices instead of a bars x events indicator
//! matrix; the per-bar counts are identical.

use chrono::NaiveDateTime;

/// Inclusive bar-index range an event is active on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub first: usize,
    pub last: usize,
}

impl Span {
    /// Number of bars covered
    pub fn bars(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// Bars of `timeline` that fall inside `[start, end]`, `None` if no bar does
pub fn span_on(timeline: &[NaiveDateTime], start: NaiveDateTime, end: NaiveDateTime) -> Option<Span> {
    let first = timeline.partition_point(|t| *t < start);
    let last = timeline.partition_point(|t| *t <= end).checked_sub(1)?;
    (first <= last).then_some(Span { first, last })
}

/// Number of active events on each bar
pub fn concurrency(timeline_len: usize, spans: &[Span]) -> Vec<u32> {
    let mut delta = vec![0i64; timeline_len + 1];
    for span in spans {
        delta[span.first] += 1;
        delta[span.last + 1] -= 1;
    }

    delta
        .iter()
        .take(timeline_len)
        .scan(0i64, |active, d| {
            *active += d;
            Some(*active as u32)
        })
        .collect()
}
