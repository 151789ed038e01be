//! Label generation from resolved events

use super::types::{Bin, Event};
use crate::series::{safe_div, PriceSeries};

/// Sign of a return as a class label
pub fn label_of(ret: f64) -> i8 {
    if ret > 0.0 {
        1
    } else if ret < 0.0 {
        -1
    } else {
        0
    }
}

/// Side-adjusted return and label for every resolved event
///
/// The exit price is the most recent bar at or before the exit time, so
/// deadlines that fall between bars still price. Unresolved events are
/// skipped.
pub fn generate_labels(events: &[Event], series: &PriceSeries) -> Vec<Bin> {
    events
        .iter()
        .filter_map(|event| {
            let exit = event.exit?;
            let entry = series.price_at(event.start)?;
            let close = series.price_asof(exit.time)?;
            let ret = (safe_div(close, entry) - 1.0) * event.side.sign();

            Some(Bin {
                id: event.id,
                start: event.start,
                exit_time: exit.time,
                ret,
                label: label_of(ret),
                touch: exit.touch,
            })
        })
        .collect()
}
