//! Barrier resolution: walk each event's price path to its first exit

use super::types::{BarrierExit, BarrierTouch, Event};
use crate::series::PriceSeries;

/// Classify one path return against the horizontal barriers
///
/// Returns the touched barrier and whether both held at once. Stop-loss
/// wins a tie.
fn classify(ret: f64, upper: f64, lower: f64) -> Option<(BarrierTouch, bool)> {
    match (ret > upper, ret < lower) {
        (true, true) => Some((BarrierTouch::StopLoss, true)),
        (false, true) => Some((BarrierTouch::StopLoss, false)),
        (true, false) => Some((BarrierTouch::ProfitTake, false)),
        (false, false) => None,
    }
}

/// First exit of a single event, or `None` if its start is not a bar
///
/// The path runs from the start bar to the deadline, or to the last bar when
/// there is no deadline or the deadline lies beyond the series. If neither
/// horizontal barrier is touched the exit is that limit time.
pub fn resolve_event(event: &Event, series: &PriceSeries) -> Option<BarrierExit> {
    let start_index = series.position(event.start)?;
    let last_time = series.last_time()?;

    let (limit_time, timeout) = match event.deadline {
        Some(deadline) if deadline <= last_time => (deadline, BarrierTouch::VerticalBarrier),
        _ => (last_time, BarrierTouch::EndOfSeries),
    };
    let limit_time = limit_time.max(event.start);
    let end_index = series.asof(limit_time)?.max(start_index);

    let times = series.times();
    let prices = series.prices();
    let entry = prices[start_index];
    let sign = event.side.sign();
    let (upper, lower) = (event.upper_level(), event.lower_level());

    let touched = (start_index..=end_index).find_map(|i| {
        let ret = (prices[i] / entry - 1.0) * sign;
        classify(ret, upper, lower).map(|(touch, tie)| BarrierExit {
            time: times[i],
            touch,
            tie,
        })
    });

    if let Some(exit) = touched.filter(|e| e.tie) {
        tracing::warn!(
            event = %event.id,
            start = %event.start,
            time = %exit.time,
            "Profit-take and stop-loss touched together, resolving as stop-loss"
        );
    }

    Some(touched.unwrap_or(BarrierExit {
        time: limit_time,
        touch: timeout,
        tie: false,
    }))
}

/// Resolve every event in place; returns how many were resolved
pub fn resolve_barriers(events: &mut [Event], series: &PriceSeries) -> usize {
    let mut resolved = 0;
    for event in events.iter_mut() {
        event.exit = resolve_event(event, series);
        if event.exit.is_some() {
            resolved += 1;
        }
    }

    tracing::debug!(total = events.len(), resolved, "Resolved barriers");
    resolved
}
