//! Event definition: targets, sides and vertical barriers

use super::types::{BarrierParams, DropReason, DroppedEvent, Event, EventId, EventSetup, Side};
use crate::model::VolatilitySeries;
use crate::series::PriceSeries;
use chrono::{Duration, NaiveDateTime};
use std::collections::BTreeMap;

/// Deadline per event start
pub type Deadlines = BTreeMap<NaiveDateTime, NaiveDateTime>;

/// Trade direction per event start
pub type Sides = BTreeMap<NaiveDateTime, Side>;

/// Vertical barrier `horizon` after each event
///
/// The deadline is the first bar at or after `start + horizon`. Events whose
/// horizon runs past the last bar, or past the representable time range,
/// get no entry and are held to the end.
pub fn vertical_barriers(
    series: &PriceSeries,
    event_times: &[NaiveDateTime],
    horizon: Duration,
) -> Deadlines {
    event_times
        .iter()
        .filter_map(|&start| {
            let index = series.first_at_or_after(start.checked_add_signed(horizon)?)?;
            Some((start, series.times()[index]))
        })
        .collect()
}

/// Turn candidate timestamps into barrier-ready events
///
/// Each candidate takes the volatility at its timestamp as `target`.
/// Candidates are dropped, not failed, when the volatility is undefined,
/// the target is not above `min_return`, the time is not a bar of the
/// series, the deadline precedes the start, or a side map lacks the time.
pub fn define_events(
    series: &PriceSeries,
    event_times: &[NaiveDateTime],
    volatility: &VolatilitySeries,
    params: &BarrierParams,
    deadlines: Option<&Deadlines>,
    sides: Option<&Sides>,
) -> EventSetup {
    let mut candidates = event_times.to_vec();
    candidates.sort();
    candidates.dedup();

    let mut setup = EventSetup::default();
    for time in candidates {
        match qualify(series, time, volatility, params, deadlines, sides) {
            Ok((target, side, deadline)) => setup.events.push(Event {
                id: EventId(setup.events.len()),
                start: time,
                target,
                side,
                profit_multiple: params.profit_multiple,
                loss_multiple: params.loss_multiple,
                deadline,
                exit: None,
            }),
            Err(reason) => setup.dropped.push(DroppedEvent { time, reason }),
        }
    }

    tracing::debug!(
        kept = setup.events.len(),
        dropped = setup.dropped.len(),
        min_return = params.min_return,
        "Defined events"
    );

    setup
}

fn qualify(
    series: &PriceSeries,
    time: NaiveDateTime,
    volatility: &VolatilitySeries,
    params: &BarrierParams,
    deadlines: Option<&Deadlines>,
    sides: Option<&Sides>,
) -> Result<(f64, Side, Option<NaiveDateTime>), DropReason> {
    if series.position(time).is_none() {
        return Err(DropReason::NotInSeries);
    }

    let target = volatility
        .at(time)
        .filter(|v| v.is_finite())
        .ok_or(DropReason::UndefinedVolatility)?;
    if target <= params.min_return {
        return Err(DropReason::BelowMinReturn { target });
    }

    let side = match sides {
        Some(map) => *map.get(&time).ok_or(DropReason::MissingSide)?,
        None => Side::Long,
    };

    let deadline = deadlines.and_then(|map| map.get(&time).copied());
    if matches!(deadline, Some(d) if d < time) {
        return Err(DropReason::DeadlineBeforeStart);
    }

    Ok((target, side, deadline))
}
